use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::AppState;

pub struct CleanupService {
    state: Arc<AppState>,
}

impl CleanupService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Удаляет сессии карты мест, которые простаивают дольше TTL
    pub async fn cleanup_idle_sessions(&self) -> usize {
        let Some(ttl) = self.state.config.sessions.ttl() else {
            warn!(
                "⚠️ Session TTL {}s is out of range, skipping cleanup",
                self.state.config.sessions.ttl_seconds
            );
            return 0;
        };
        let evicted = self.state.sessions.evict_idle(ttl, Utc::now()).await;

        if evicted == 0 {
            info!("🧹 No idle seat map sessions to cleanup");
        } else {
            info!(
                "🧹 Removed {} idle seat map sessions, {} still active",
                evicted,
                self.state.sessions.len().await
            );
        }
        evicted
    }
}
