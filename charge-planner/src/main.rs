use charge_planner::catalog::{StationCatalog, load_station_file};
use charge_planner::config::ServerConfig;
use charge_planner::planner::{LocalPlanner, PlannerConfig};
use charge_planner::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env().expect("Invalid server configuration");

    // Fail fast without station data
    let stations = load_station_file(&config.station_data).expect("Failed to load station data");
    let mut catalog = StationCatalog::new();
    catalog.load(stations);
    info!(stations = catalog.len(), "catalog ready");

    let state = AppState::new(LocalPlanner::new(PlannerConfig::default(), catalog));
    let app = create_router(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind listener");
    info!(addr = %config.addr, "charge planner listening");
    info!("  GET  /health                  - Health check");
    info!("  GET  /api/superchargers       - Station catalog");
    info!("  GET  /api/superchargers/:id   - One station");
    info!("  POST /api/trips/plan          - Plan a trip");

    axum::serve(listener, app).await.expect("Server error");
}
