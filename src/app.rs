use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/trend", get(handlers::get_trend))
        .route("/api/totals", get(handlers::get_totals))
        .route("/api/provinces", get(handlers::get_provinces))
        .route("/api/cities", get(handlers::get_cities))
        .route("/api/map", get(handlers::get_map_settings))
        .route("/api/geo/provinces", get(handlers::get_province_boundaries))
        .route("/api/geo/cities", get(handlers::get_city_boundaries))
        .route("/api/status", get(handlers::get_status))
        .with_state(state)
}
