use anyhow::Context;
use chrono::Duration;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::error::SeatMapError;
use crate::models::AircraftProfile;
use crate::services::selection::{SeatMapOptions, DEFAULT_MAX_SELECTION};

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub seat_map: SeatMapConfig,
    pub sessions: SessionConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Настройки карты мест по умолчанию для новых сессий
#[derive(Debug, Clone, Deserialize)]
pub struct SeatMapConfig {
    /// Путь к профилю самолёта (TOML/JSON). Без него - Boeing 737-800.
    pub aircraft_profile: Option<String>,
    pub max_selection: usize,
    pub show_heat_map: bool,
    pub popularity_seed: Option<u64>,
}

// Настройки жизненного цикла сессий
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_seconds: u64,
    pub cleanup_interval_seconds: u64,
}

impl SessionConfig {
    /// TTL сессии. `None`, если значение не помещается в `chrono::Duration`.
    pub fn ttl(&self) -> Option<Duration> {
        i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(name: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var_or(name, default)
        .parse()
        .with_context(|| format!("{} must be a valid value", name))
}

fn parse_optional_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} must be a valid value", name)),
        _ => Ok(None),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Config {
            app: AppConfig {
                host: var_or("HOST", "0.0.0.0"),
                port: parse_var("PORT", "8000")?,
                environment: var_or("ENVIRONMENT", "development"),
                rust_log: var_or("RUST_LOG", "seat_map=debug,tower_http=debug"),
            },
            seat_map: SeatMapConfig {
                aircraft_profile: env::var("AIRCRAFT_PROFILE").ok().filter(|p| !p.is_empty()),
                max_selection: parse_var("MAX_SELECTION", &DEFAULT_MAX_SELECTION.to_string())?,
                show_heat_map: parse_var("SHOW_HEAT_MAP", "false")?,
                popularity_seed: parse_optional_var("POPULARITY_SEED")?,
            },
            sessions: SessionConfig {
                ttl_seconds: parse_var("SESSION_TTL_SECONDS", "1800")?,
                cleanup_interval_seconds: parse_var("SESSION_CLEANUP_INTERVAL_SECONDS", "300")?,
            },
        };

        if config.sessions.ttl().is_none() {
            anyhow::bail!(
                "SESSION_TTL_SECONDS is out of range: {}",
                config.sessions.ttl_seconds
            );
        }
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// Профиль самолёта для новых сессий.
    pub fn aircraft_profile(&self) -> Result<AircraftProfile, SeatMapError> {
        match &self.seat_map.aircraft_profile {
            Some(path) => AircraftProfile::from_file(path),
            None => Ok(AircraftProfile::boeing_737_800()),
        }
    }

    /// Параметры новой сессии по умолчанию.
    pub fn seat_map_options(&self) -> SeatMapOptions {
        SeatMapOptions {
            max_selection: self.seat_map.max_selection,
            show_heat_map: self.seat_map.show_heat_map,
            blocked_seats: Vec::new(),
            popularity_seed: self.seat_map.popularity_seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                environment: "development".to_string(),
                rust_log: "seat_map=debug,tower_http=debug".to_string(),
            },
            seat_map: SeatMapConfig {
                aircraft_profile: None,
                max_selection: DEFAULT_MAX_SELECTION,
                show_heat_map: false,
                popularity_seed: None,
            },
            sessions: SessionConfig {
                ttl_seconds: 1800,
                cleanup_interval_seconds: 300,
            },
        }
    }
}
