use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseSeatIdError;

// Идентификатор места: номер ряда + буква колонки ("12C")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatId {
    row: u32,
    letter: char,
}

impl SeatId {
    pub fn new(row: u32, letter: char) -> Self {
        Self { row, letter }
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn letter(&self) -> char {
        self.letter
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.letter)
    }
}

impl FromStr for SeatId {
    type Err = ParseSeatIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSeatIdError(s.to_string());

        let split = s.find(|c: char| !c.is_ascii_digit()).ok_or_else(invalid)?;
        let (digits, rest) = s.split_at(split);

        // "08A" не то же самое, что "8A"
        if digits.is_empty() || digits.starts_with('0') {
            return Err(invalid());
        }
        let row: u32 = digits.parse().map_err(|_| invalid())?;

        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_uppercase() => Ok(Self { row, letter }),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for SeatId {
    type Error = ParseSeatIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatId> for String {
    fn from(id: SeatId) -> Self {
        id.to_string()
    }
}

// Класс обслуживания - задаётся секцией салона
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeatClass {
    Business,
    EconomyPlus,
    Economy,
}

impl SeatClass {
    pub const ALL: [SeatClass; 3] = [SeatClass::Business, SeatClass::EconomyPlus, SeatClass::Economy];

    /// Статическая таблица цен по классу.
    pub fn price(&self) -> u32 {
        match self {
            SeatClass::Business => 1200,
            SeatClass::EconomyPlus => 350,
            SeatClass::Economy => 200,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeatClass::Business => "business",
            SeatClass::EconomyPlus => "economy-plus",
            SeatClass::Economy => "economy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeatClass::Business => "Business",
            SeatClass::EconomyPlus => "Economy Plus",
            SeatClass::Economy => "Economy",
        }
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatPosition {
    Window,
    Middle,
    Aisle,
}

impl SeatPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatPosition::Window => "window",
            SeatPosition::Middle => "middle",
            SeatPosition::Aisle => "aisle",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeatPosition::Window => "Window",
            SeatPosition::Middle => "Middle",
            SeatPosition::Aisle => "Aisle",
        }
    }
}

/// Одно физическое место в салоне.
///
/// Все экземпляры принадлежат `SeatStore`. Наружу отдаются только ссылки
/// на чтение или копии, поэтому неизменяемые поля (`row`, `letter`,
/// `seat_class`, `position`, `is_emergency_exit`, `price`) после создания
/// не меняются.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub row: u32,
    pub letter: char,
    pub seat_class: SeatClass,
    pub position: SeatPosition,
    pub is_available: bool,
    pub is_selected: bool,
    pub is_emergency_exit: bool,
    pub price: u32,
    pub popularity_score: u8,
}

impl Seat {
    pub fn new(
        id: SeatId,
        seat_class: SeatClass,
        position: SeatPosition,
        is_emergency_exit: bool,
        is_available: bool,
    ) -> Self {
        Self {
            id,
            row: id.row(),
            letter: id.letter(),
            seat_class,
            position,
            is_available,
            is_selected: false,
            is_emergency_exit,
            price: seat_class.price(),
            popularity_score: 0,
        }
    }
}

/// Карточка места под курсором.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatInfo {
    pub seat_id: SeatId,
    pub class_label: &'static str,
    pub position_label: &'static str,
    pub price: u32,
    pub is_emergency_exit: bool,
    pub is_available: bool,
    pub popularity_score: u8,
}

impl From<&Seat> for SeatInfo {
    fn from(seat: &Seat) -> Self {
        Self {
            seat_id: seat.id,
            class_label: seat.seat_class.label(),
            position_label: seat.position.label(),
            price: seat.price,
            is_emergency_exit: seat.is_emergency_exit,
            is_available: seat.is_available,
            popularity_score: seat.popularity_score,
        }
    }
}
