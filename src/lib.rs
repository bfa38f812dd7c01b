pub mod app;
pub mod boundaries;
pub mod config;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;
pub mod refresh;
pub mod regions;
pub mod snapshot;
pub mod state;
pub mod trend;
pub mod ui;
pub mod upstream;

pub use app::router;
pub use boundaries::Boundaries;
pub use config::{read_map_token, Config};
pub use refresh::{refresh_once, spawn_scheduler};
pub use state::AppState;
pub use upstream::UpstreamClient;
