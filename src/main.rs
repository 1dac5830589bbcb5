use std::net::SocketAddr;
use std::time::Duration;
use tokio::task;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seat_map::{
    AppState,
    config::Config,
    controllers,
    services::cleanup::CleanupService,
};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // В production пишем JSON-логи, локально - обычный формат
    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log));
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    info!("Starting Seat Map API");

    // Create the shared application state
    let app_state = AppState::new(config.clone())?;

    // --- Start background tasks ---

    // Task to evict idle seat map sessions
    let cleanup = CleanupService::new(app_state.clone());
    let interval = Duration::from_secs(config.sessions.cleanup_interval_seconds.max(1));
    task::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            cleanup.cleanup_idle_sessions().await;
        }
    });

    // --- Start the web server ---

    let app = controllers::app(app_state);

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
