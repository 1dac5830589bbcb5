use axum::{routing::get, Json, Router};
use std::sync::Arc;

use crate::services::legend::{legend, Legend};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/legend", get(get_legend))
}

// GET /api/legend
async fn get_legend() -> Json<Legend> {
    Json(legend())
}
