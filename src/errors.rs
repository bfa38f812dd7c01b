use axum::http::StatusCode;

use crate::upstream::Endpoint;

#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    #[error("{endpoint} endpoint unavailable: {reason}")]
    UpstreamUnavailable { endpoint: Endpoint, reason: String },

    #[error("{endpoint} endpoint returned a malformed response: {reason}")]
    MalformedResponse { endpoint: Endpoint, reason: String },
}

impl PipelineError {
    pub fn unavailable(endpoint: Endpoint, reason: impl ToString) -> Self {
        Self::UpstreamUnavailable {
            endpoint,
            reason: reason.to_string(),
        }
    }

    pub fn malformed(endpoint: Endpoint, reason: impl ToString) -> Self {
        Self::MalformedResponse {
            endpoint,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse boundary dataset {path}: {reason}")]
    Boundary { path: String, reason: String },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_ready(output: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: format!("{output} has not been refreshed yet"),
        }
    }

    pub fn not_loaded(what: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("{what} are not loaded"),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
