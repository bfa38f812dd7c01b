use crate::boundaries::Boundaries;
use crate::config::Config;
use crate::models::{RegionRecord, TrendSeries, Totals};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Default, Serialize)]
pub struct EndpointStatus {
    pub last_success: Option<String>,
    pub last_error: Option<String>,
    pub failures: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RegionOutput {
    pub rows: Vec<RegionRecord>,
    pub unmatched: Vec<String>,
}

// A stage that fails keeps its previous value.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub trend: Option<TrendSeries>,
    pub totals: Option<Totals>,
    pub provinces: Option<RegionOutput>,
    pub cities: Option<RegionOutput>,
    pub ticks: u64,
    pub trend_status: EndpointStatus,
    pub area_status: EndpointStatus,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub boundaries: Arc<Boundaries>,
    pub map_token: Option<Arc<str>>,
    pub dashboard: Arc<Mutex<Dashboard>>,
}

impl AppState {
    pub fn new(config: Config, boundaries: Boundaries, map_token: Option<String>) -> Self {
        Self {
            config: Arc::new(config),
            boundaries: Arc::new(boundaries),
            map_token: map_token.map(Arc::from),
            dashboard: Arc::new(Mutex::new(Dashboard::default())),
        }
    }
}
