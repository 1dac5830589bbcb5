//! seatmaps.rs
//!
//! HTTP-интерфейс к сессиям карты мест.
//!
//! Каждая сессия - отдельный контроллер выбора. Обработчики только разбирают
//! запрос, берут блокировку сессии и вызывают контроллер; правила выбора
//! живут в `services::selection`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{AircraftProfile, RowView, SeatId, SeatInfo, SelectionChanged};
use crate::services::selection::{SelectionController, ToggleOutcome};
use crate::services::sessions::{SeatMapSession, SharedSession};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seatmaps", post(create_seatmap))
        .route("/seatmaps/{id}", get(get_seatmap).delete(delete_seatmap))
        .route("/seatmaps/{id}/selection", get(get_selection))
        .route("/seatmaps/{id}/seats/toggle", patch(toggle_seat))
        .route("/seatmaps/{id}/hover", put(hover_seat).delete(clear_hover))
        .route("/seatmaps/{id}/max-selection", patch(set_max_selection))
        .route("/seatmaps/{id}/blocked-seats", put(set_blocked_seats))
        .route("/seatmaps/{id}/heat-map", patch(set_heat_map))
        .route("/seatmaps/{id}/aircraft", put(set_aircraft))
}

/* ---------- helpers ---------- */

pub(crate) async fn find_session(
    state: &AppState,
    id: Uuid,
) -> Result<SharedSession, (StatusCode, String)> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Карта мест не найдена".to_string()))
}

#[derive(Debug, Serialize)]
pub struct SeatMapResponse {
    pub id: Uuid,
    pub model: String,
    pub max_selection: usize,
    pub show_heat_map: bool,
    pub rows: Vec<RowView>,
    pub selection: SelectionChanged,
    pub selection_label: String,
    pub hovered_seat: Option<SeatInfo>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl SeatMapResponse {
    fn from_session(session: &SeatMapSession) -> Self {
        let controller = &session.controller;
        Self {
            id: session.id,
            model: controller.profile().model.clone(),
            max_selection: controller.max_selection(),
            show_heat_map: controller.show_heat_map(),
            rows: controller.rows().to_vec(),
            selection: controller.selection(),
            selection_label: controller.selection_label(),
            hovered_seat: controller.hovered_seat_info(),
            created_at: session.created_at,
            last_active: session.last_active,
        }
    }
}

/* ---------- SEAT MAPS ---------- */

// POST /api/seatmaps
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateSeatMapRequest {
    pub blocked_seats: Vec<String>,
    pub max_selection: Option<usize>,
    pub show_heat_map: Option<bool>,
    pub popularity_seed: Option<u64>,
    pub aircraft: Option<AircraftProfile>,
}

async fn create_seatmap(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CreateSeatMapRequest>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let mut options = state.config.seat_map_options();
    options.blocked_seats = req.blocked_seats;
    if let Some(max_selection) = req.max_selection {
        options.max_selection = max_selection;
    }
    if let Some(show_heat_map) = req.show_heat_map {
        options.show_heat_map = show_heat_map;
    }
    if req.popularity_seed.is_some() {
        options.popularity_seed = req.popularity_seed;
    }

    let aircraft = req.aircraft.unwrap_or_else(|| state.aircraft.clone());
    let controller = SelectionController::new(aircraft, options).map_err(|e| {
        tracing::warn!("create_seatmap rejected: {}", e);
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let (_, session) = state.sessions.create(controller).await;
    let session = session.lock().await;
    Ok((StatusCode::CREATED, Json(SeatMapResponse::from_session(&session))))
}

// GET /api/seatmaps/{id}
async fn get_seatmap(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = find_session(&state, id).await?;
    let session = session.lock().await;
    Ok(Json(SeatMapResponse::from_session(&session)))
}

// DELETE /api/seatmaps/{id}
async fn delete_seatmap(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Карта мест не найдена".to_string()))
    }
}

// GET /api/seatmaps/{id}/selection
async fn get_selection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = find_session(&state, id).await?;
    let session = session.lock().await;
    Ok(Json(session.controller.selection()))
}

/* ---------- SEATS ---------- */

#[derive(Debug, Deserialize)]
struct SeatRequest {
    seat_id: String,
}

#[derive(Debug, Serialize)]
struct ToggleResponse {
    outcome: ToggleOutcome,
    selection: SelectionChanged,
}

// PATCH /api/seatmaps/{id}/seats/toggle
async fn toggle_seat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<SeatRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.touch();

    let outcome = session.controller.toggle_seat(&req.seat_id);
    if outcome == ToggleOutcome::LimitExceeded {
        let max_selection = session.controller.max_selection();
        return Err((
            StatusCode::CONFLICT,
            format!("You can only select {} seat(s)", max_selection),
        ));
    }

    Ok(Json(ToggleResponse {
        outcome,
        selection: session.controller.selection(),
    }))
}

#[derive(Debug, Serialize)]
struct HoverResponse {
    hovered_seat: Option<SeatInfo>,
}

// PUT /api/seatmaps/{id}/hover
async fn hover_seat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<SeatRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.touch();

    session.controller.hover(&req.seat_id);
    Ok(Json(HoverResponse {
        hovered_seat: session.controller.hovered_seat_info(),
    }))
}

// DELETE /api/seatmaps/{id}/hover
async fn clear_hover(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.touch();

    session.controller.clear_hover();
    Ok(Json(HoverResponse { hovered_seat: None }))
}

/* ---------- SETTINGS ---------- */

#[derive(Debug, Deserialize)]
struct MaxSelectionRequest {
    max_selection: usize,
}

// PATCH /api/seatmaps/{id}/max-selection
async fn set_max_selection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<MaxSelectionRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.touch();

    session
        .controller
        .set_max_selection(req.max_selection)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(Json(serde_json::json!({
        "max_selection": session.controller.max_selection(),
        "selected": session.controller.selected_ids().len(),
    })))
}

#[derive(Debug, Deserialize)]
struct BlockedSeatsRequest {
    seat_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct BlockedSeatsResponse {
    released: Vec<SeatId>,
    selection: SelectionChanged,
}

// PUT /api/seatmaps/{id}/blocked-seats
async fn set_blocked_seats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<BlockedSeatsRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.touch();

    let released = session.controller.set_blocked_seats(&req.seat_ids);
    Ok(Json(BlockedSeatsResponse {
        released,
        selection: session.controller.selection(),
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HeatMapRequest {
    enabled: Option<bool>,
}

// PATCH /api/seatmaps/{id}/heat-map
async fn set_heat_map(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    body: Option<Json<HeatMapRequest>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.touch();

    // Без явного значения - переключаем
    match body.and_then(|Json(req)| req.enabled) {
        Some(enabled) => session.controller.set_heat_map(enabled),
        None => {
            session.controller.toggle_heat_map();
        }
    }

    Ok(Json(SeatMapResponse::from_session(&session)))
}

// PUT /api/seatmaps/{id}/aircraft
async fn set_aircraft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(profile): Json<AircraftProfile>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.touch();

    session.controller.set_aircraft(profile).map_err(|e| {
        tracing::warn!("set_aircraft rejected for {}: {}", id, e);
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    Ok(Json(SeatMapResponse::from_session(&session)))
}
