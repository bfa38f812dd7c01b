use crate::config::Config;
use crate::errors::PipelineError;
use crate::models::{AreaPayload, TrendPayload};
use serde::de::DeserializeOwned;
use std::{fmt, time::Duration};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    // daily counts plus global totals
    Trend,
    // per-province statistics with nested cities
    Area,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Trend => f.write_str("trend"),
            Endpoint::Area => f.write_str("area"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    trend_url: String,
    area_url: String,
}

impl UpstreamClient {
    pub fn new(
        trend_url: impl Into<String>,
        area_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            trend_url: trend_url.into(),
            area_url: area_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.trend_url.clone(),
            config.area_url.clone(),
            config.upstream_timeout,
        )
    }

    fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Trend => &self.trend_url,
            Endpoint::Area => &self.area_url,
        }
    }

    /// One GET, no retry. The next tick is the retry.
    pub async fn fetch(&self, endpoint: Endpoint) -> Result<serde_json::Value, PipelineError> {
        let url = self.url(endpoint);
        debug!(%endpoint, url, "fetching upstream");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| PipelineError::unavailable(endpoint, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::unavailable(endpoint, format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| PipelineError::unavailable(endpoint, err))?;

        serde_json::from_slice(&body).map_err(|err| PipelineError::malformed(endpoint, err))
    }

    pub async fn fetch_trend(&self) -> Result<TrendPayload, PipelineError> {
        let document = self.fetch(Endpoint::Trend).await?;
        decode(Endpoint::Trend, document)
    }

    pub async fn fetch_area(&self) -> Result<AreaPayload, PipelineError> {
        let document = self.fetch(Endpoint::Area).await?;
        decode(Endpoint::Area, document)
    }
}

pub fn decode<T: DeserializeOwned>(
    endpoint: Endpoint,
    document: serde_json::Value,
) -> Result<T, PipelineError> {
    serde_json::from_value(document).map_err(|err| PipelineError::malformed(endpoint, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_accepts_well_formed_trend_payload() {
        let payload: TrendPayload = decode(
            Endpoint::Trend,
            json!({
                "data": {
                    "wuwei_ww_cn_day_counts": [
                        {"date": "1/23", "confirm": 100, "suspect": "50", "dead": 2, "heal": 5}
                    ],
                    "wuwei_ww_global_vars": [
                        {"confirmCount": 1, "suspectCount": 2, "deadCount": 3, "cure": 4}
                    ]
                }
            }),
        )
        .unwrap();
        assert_eq!(payload.data.day_counts.len(), 1);
        let records = crate::trend::decode_records(&payload.data.day_counts).unwrap();
        assert_eq!(records[0].suspect, 50);
        assert_eq!(payload.data.global_vars.len(), 1);
    }

    #[test]
    fn decode_rejects_missing_top_level_key() {
        let err = decode::<AreaPayload>(Endpoint::Area, json!({"data": {}})).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MalformedResponse { endpoint: Endpoint::Area, .. }
        ));
    }

    #[test]
    fn decode_rejects_negative_counts() {
        let err = decode::<AreaPayload>(
            Endpoint::Area,
            json!({"data": {"getAreaStat": [{
                "provinceName": "湖北省",
                "confirmedCount": -1,
                "suspectedCount": 0,
                "curedCount": 0,
                "deadCount": 0
            }]}}),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::MalformedResponse { .. }));
    }
}
