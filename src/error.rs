//! error.rs
//!
//! Ошибки ядра карты мест.
//!
//! Ссылки на несуществующие или заблокированные места ошибками не считаются:
//! контроллер выбора молча их игнорирует. Сюда попадает только то, что
//! должно прервать операцию целиком: некорректный профиль самолёта,
//! неверный лимит выбора и ошибки загрузки профиля из файла.

use thiserror::Error;

use crate::models::{SeatClass, SeatId};

/// Ошибки ядра карты мест.
#[derive(Debug, Error)]
pub enum SeatMapError {
    /// Профиль самолёта не прошёл проверку, раскладка не строится.
    #[error("invalid aircraft profile: {0}")]
    InvalidProfile(#[from] ProfileError),

    /// Лимит выбора должен быть положительным.
    #[error("max selection must be a positive integer")]
    InvalidMaxSelection,

    /// Не удалось прочитать профиль самолёта из файла.
    #[error("failed to load aircraft profile: {0}")]
    ProfileLoad(#[from] ::config::ConfigError),
}

/// Нарушения структуры профиля самолёта.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("{seat_class} section has an empty row range {first}..={last}")]
    EmptySection {
        seat_class: SeatClass,
        first: u32,
        last: u32,
    },

    #[error("cabin must start at row 1, found {0}")]
    FirstRow(u32),

    #[error("{seat_class} section must start at row {expected}, found {found}")]
    RowGap {
        seat_class: SeatClass,
        expected: u32,
        found: u32,
    },

    #[error("{seat_class} section has {count} seats on one side, expected 2 or 3")]
    SideWidth { seat_class: SeatClass, count: usize },

    #[error("{seat_class} section uses invalid column letter {letter:?}")]
    InvalidColumn { seat_class: SeatClass, letter: char },

    #[error("{seat_class} section repeats column letter {letter:?}")]
    DuplicateColumn { seat_class: SeatClass, letter: char },

    #[error("{seat_class} section reaches row {row}, rows above {max} are not supported")]
    RowLimit { seat_class: SeatClass, row: u32, max: u32 },

    #[error("cabin has {count} seats, at most {max} are supported")]
    SeatLimit { count: usize, max: usize },

    #[error("emergency row {row} is outside the cabin (rows 1..={last_row})")]
    EmergencyRowOutOfRange { row: u32, last_row: u32 },

    #[error("seat {0} generated twice")]
    DuplicateSeat(SeatId),
}

/// Строка не является идентификатором места вида `12C`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid seat id: {0:?}")]
pub struct ParseSeatIdError(pub String);
