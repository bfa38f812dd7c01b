use ncov_dashboard::{
    read_map_token, refresh::spawn_scheduler, router, AppState, Boundaries, Config, UpstreamClient,
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let boundaries = Boundaries::load(&config.province_geojson_path, &config.city_geojson_path)?;
    let map_token = read_map_token(&config.mapbox_token_path)?;
    let client = UpstreamClient::from_config(&config)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config, boundaries, map_token);
    let scheduler = spawn_scheduler(client, state.clone());

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.abort();
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
