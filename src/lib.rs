pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use error::SeatMapError;
pub use models::{AircraftProfile, Seat, SeatClass, SeatId, SeatMapEvent, SeatPosition};
pub use services::selection::{SeatMapOptions, SelectionController, ToggleOutcome};
pub use store::SeatStore;

use std::sync::Arc;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub aircraft: AircraftProfile,
    pub sessions: services::sessions::SessionRegistry,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Arc<Self>, SeatMapError> {
        // Профиль проверяется один раз при старте, а не на каждую сессию
        let aircraft = config.aircraft_profile()?;
        tracing::info!(
            "Aircraft profile {}: {} rows, {} seats",
            aircraft.model,
            aircraft.row_count(),
            aircraft.seat_count()
        );

        Ok(Arc::new(Self {
            config,
            aircraft,
            sessions: services::sessions::SessionRegistry::new(),
        }))
    }
}
