pub mod events;
pub mod legend;
pub mod seatmaps;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(seatmaps::routes())
        .merge(events::routes())
        .merge(legend::routes())
}

/// Полный роутер приложения: служебные маршруты и `/api`.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Seat Map API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
