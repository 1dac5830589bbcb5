//! sessions.rs
//!
//! Реестр сессий карты мест.
//!
//! Каждая сессия - отдельный контроллер выбора одного пользователя, поэтому
//! два пользователя никогда не мутируют одно хранилище мест. Мьютекс сессии
//! гарантирует, что события одной сессии обрабатываются по одному.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::services::selection::SelectionController;

pub struct SeatMapSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub controller: SelectionController,
}

impl SeatMapSession {
    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    pub fn is_idle(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.last_active > ttl
    }
}

pub type SharedSession = Arc<Mutex<SeatMapSession>>;

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, controller: SelectionController) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let session = Arc::new(Mutex::new(SeatMapSession {
            id,
            created_at: now,
            last_active: now,
            controller,
        }));

        self.sessions.write().await.insert(id, session.clone());
        info!("Seat map session {} created", id);
        (id, session)
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!("Seat map session {} closed", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Удаляет сессии, неактивные дольше `ttl`. Возвращает число удалённых.
    ///
    /// Сессия, чей мьютекс сейчас занят обработчиком, считается активной.
    /// Простой перепроверяется под блокировкой на запись, так что сессия,
    /// тронутая между проходами, не удаляется.
    pub async fn evict_idle(&self, ttl: Duration, now: DateTime<Utc>) -> usize {
        let candidates: Vec<Uuid> = self
            .sessions
            .read()
            .await
            .iter()
            .filter(|(_, session)| Self::idle_now(session, ttl, now))
            .map(|(id, _)| *id)
            .collect();

        if candidates.is_empty() {
            return 0;
        }

        let mut sessions = self.sessions.write().await;
        candidates
            .iter()
            .filter(|&id| {
                let still_idle = sessions
                    .get(id)
                    .is_some_and(|session| Self::idle_now(session, ttl, now));
                still_idle && sessions.remove(id).is_some()
            })
            .count()
    }

    fn idle_now(session: &SharedSession, ttl: Duration, now: DateTime<Utc>) -> bool {
        session
            .try_lock()
            .is_ok_and(|session| session.is_idle(ttl, now))
    }
}
