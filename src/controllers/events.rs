use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::controllers::seatmaps::find_session;
use crate::models::SeatMapEvent;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seatmaps/{id}/events", get(seatmap_events))
}

// GET /api/seatmaps/{id}/events - поток уведомлений сессии по WebSocket
async fn seatmap_events(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, (StatusCode, String)> {
    let session = find_session(&state, id).await?;
    let events = session.lock().await.controller.subscribe();

    info!("Event stream requested for seat map {}", id);
    Ok(ws.on_upgrade(move |socket| stream_events(socket, events, id)))
}

async fn stream_events(socket: WebSocket, mut events: broadcast::Receiver<SeatMapEvent>, id: Uuid) {
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let payload = match serde_json::to_string(&event) {
                        Ok(payload) => payload,
                        Err(e) => {
                            warn!("Failed to serialize seat map event: {}", e);
                            continue;
                        }
                    };
                    if sender.send(Message::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event stream for {} lagged, {} events skipped", id, skipped);
                }
                // Сессия удалена - контроллер и канал вместе с ней
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    let _ = sender.close().await;
    debug!("Event stream for seat map {} closed", id);
}
