use crate::errors::{ExportError, PipelineError};
use crate::export::write_city_csv;
use crate::models::{AreaPayload, TrendSeries, Totals};
use crate::regions::{self, RegionTables};
use crate::snapshot;
use crate::state::{AppState, EndpointStatus, RegionOutput};
use crate::trend;
use crate::upstream::UpstreamClient;
use chrono::{Local, NaiveDateTime};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info, warn};

#[derive(Debug)]
pub struct TickReport {
    pub trend: Result<usize, PipelineError>,
    pub totals: Result<(), PipelineError>,
    pub regions: Result<usize, PipelineError>,
    // None when the area fetch failed and no export was attempted
    pub export: Option<Result<(), ExportError>>,
}

impl TickReport {
    pub fn is_success(&self) -> bool {
        self.trend.is_ok()
            && self.totals.is_ok()
            && self.regions.is_ok()
            && matches!(self.export, Some(Ok(())))
    }
}

struct TrendOutputs {
    series: Result<TrendSeries, PipelineError>,
    totals: Result<Totals, PipelineError>,
}

struct AreaOutputs {
    provinces: RegionOutput,
    cities: RegionOutput,
}

async fn trend_stage(client: &UpstreamClient, year: i32, now: NaiveDateTime) -> TrendOutputs {
    match client.fetch_trend().await {
        Ok(payload) => TrendOutputs {
            series: trend::decode_records(&payload.data.day_counts)
                .and_then(|records| trend::build_series(&records, year)),
            totals: snapshot::publish(&payload.data.global_vars, now),
        },
        Err(err) => TrendOutputs {
            series: Err(err.clone()),
            totals: Err(err),
        },
    }
}

fn area_outputs(state: &AppState, payload: &AreaPayload) -> AreaOutputs {
    let RegionTables {
        provinces,
        cities,
        skipped,
    } = regions::build_tables(&payload.data.area_stat);
    if !skipped.is_empty() {
        warn!(?skipped, "provinces skipped in city table");
    }

    let province_misses = state.boundaries.provinces.missing(&provinces);
    let city_misses = state.boundaries.cities.missing(&cities);
    if !province_misses.is_empty() {
        warn!(unmatched = ?province_misses, "provinces missing from boundary dataset");
    }
    if !city_misses.is_empty() {
        warn!(unmatched = ?city_misses, "cities missing from boundary dataset");
    }

    AreaOutputs {
        provinces: RegionOutput {
            rows: provinces,
            unmatched: province_misses,
        },
        cities: RegionOutput {
            rows: cities,
            unmatched: city_misses,
        },
    }
}

fn record(status: &mut EndpointStatus, outcome: Result<(), &PipelineError>, stamp: &str) {
    match outcome {
        Ok(()) => {
            status.last_success = Some(stamp.to_string());
            status.last_error = None;
        }
        Err(err) => {
            status.failures = status.failures.saturating_add(1);
            status.last_error = Some(err.to_string());
        }
    }
}

/// Runs one refresh cycle. Outputs that fail leave the previously published
/// value in place; the rest are swapped in together at the end.
pub async fn refresh_once(client: &UpstreamClient, state: &AppState) -> TickReport {
    let now = Local::now().naive_local();
    let stamp = now.format("%Y-%m-%d %H:%M:%S").to_string();

    let TrendOutputs { series, totals } = trend_stage(client, state.config.series_year, now).await;

    let area = client
        .fetch_area()
        .await
        .map(|payload| area_outputs(state, &payload));

    let export = match &area {
        Ok(outputs) => {
            let written = write_city_csv(&state.config.city_csv_path, &outputs.cities.rows).await;
            if let Err(err) = &written {
                warn!(path = %state.config.city_csv_path.display(), "city export failed: {err}");
            }
            Some(written)
        }
        Err(_) => None,
    };

    let mut dashboard = state.dashboard.lock().await;
    dashboard.ticks = dashboard.ticks.saturating_add(1);

    let trend_outcome = series.as_ref().and(totals.as_ref()).map(|_| ());
    record(&mut dashboard.trend_status, trend_outcome, &stamp);
    let area_outcome = area.as_ref().map(|_| ());
    record(&mut dashboard.area_status, area_outcome, &stamp);

    let report = TickReport {
        trend: series.map(|series| {
            let len = series.len();
            dashboard.trend = Some(series);
            len
        }),
        totals: totals.map(|totals| {
            dashboard.totals = Some(totals);
        }),
        regions: area.map(|outputs| {
            let len = outputs.cities.rows.len();
            dashboard.provinces = Some(outputs.provinces);
            dashboard.cities = Some(outputs.cities);
            len
        }),
        export,
    };

    if let Err(err) = &report.trend {
        error!("trend refresh failed: {err}");
    }
    if let Err(err) = &report.totals {
        error!("totals refresh failed: {err}");
    }
    if let Err(err) = &report.regions {
        error!("region refresh failed: {err}");
    }
    info!(
        tick = dashboard.ticks,
        days = report.trend.as_ref().ok(),
        cities = report.regions.as_ref().ok(),
        complete = report.is_success(),
        "refresh finished"
    );

    report
}

// First tick is immediate. Ticks run in one task and never overlap.
pub fn spawn_scheduler(client: UpstreamClient, state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(state.config.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(every = ?state.config.refresh_interval, "refresh scheduler started");
        loop {
            ticker.tick().await;
            refresh_once(&client, &state).await;
        }
    })
}
