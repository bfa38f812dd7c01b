use crate::boundaries::BoundaryDataset;
use crate::errors::AppError;
use crate::models::{MapSettings, Totals, TrendResponse};
use crate::state::{AppState, EndpointStatus, RegionOutput};
use crate::trend::SERIES;
use crate::ui::render_index;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub ticks: u64,
    pub refresh_interval_secs: u64,
    pub trend: EndpointStatus,
    pub area: EndpointStatus,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let dashboard = state.dashboard.lock().await;
    Html(render_index(dashboard.totals.as_ref()))
}

pub async fn get_trend(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let dashboard = state.dashboard.lock().await;
    let series = dashboard.trend.as_ref().ok_or_else(|| AppError::not_ready("trend"))?;
    let body = serde_json::to_value(TrendResponse {
        data: series,
        series: SERIES,
    })?;
    Ok(Json(body))
}

pub async fn get_totals(State(state): State<AppState>) -> Result<Json<Totals>, AppError> {
    let dashboard = state.dashboard.lock().await;
    dashboard
        .totals
        .clone()
        .map(Json)
        .ok_or_else(|| AppError::not_ready("totals"))
}

pub async fn get_provinces(State(state): State<AppState>) -> Result<Json<RegionOutput>, AppError> {
    let dashboard = state.dashboard.lock().await;
    dashboard
        .provinces
        .clone()
        .map(Json)
        .ok_or_else(|| AppError::not_ready("province table"))
}

pub async fn get_cities(State(state): State<AppState>) -> Result<Json<RegionOutput>, AppError> {
    let dashboard = state.dashboard.lock().await;
    dashboard
        .cities
        .clone()
        .map(Json)
        .ok_or_else(|| AppError::not_ready("city table"))
}

pub async fn get_map_settings(State(state): State<AppState>) -> Json<MapSettings> {
    Json(MapSettings {
        style: "carto-darkmatter",
        zoom: 3,
        center_lat: 35.110573,
        center_lon: 106.493924,
        colorscale: "Reds",
        reversescale: true,
        marker_opacity: 0.8,
        marker_line_width: 0.8,
        province_feature_key: state.boundaries.provinces.feature_id_key(),
        city_feature_key: state.boundaries.cities.feature_id_key(),
        access_token: state.map_token.as_deref().map(str::to_string),
    })
}

fn geojson_response(dataset: &BoundaryDataset, name: &str) -> Result<Response, AppError> {
    let raw = dataset.raw().ok_or_else(|| AppError::not_loaded(name))?;
    Ok(([(header::CONTENT_TYPE, "application/geo+json")], raw.to_string()).into_response())
}

pub async fn get_province_boundaries(State(state): State<AppState>) -> Result<Response, AppError> {
    geojson_response(&state.boundaries.provinces, "province boundaries")
}

pub async fn get_city_boundaries(State(state): State<AppState>) -> Result<Response, AppError> {
    geojson_response(&state.boundaries.cities, "city boundaries")
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let dashboard = state.dashboard.lock().await;
    Json(StatusResponse {
        ticks: dashboard.ticks,
        refresh_interval_secs: state.config.refresh_interval.as_secs(),
        trend: dashboard.trend_status.clone(),
        area: dashboard.area_status.clone(),
    })
}
