use serde::{Deserialize, Serialize};

use crate::models::{Seat, SeatClass, SeatId};
use crate::services::heat_map::HeatMapColor;

/// Скелет ряда: только идентификаторы мест, данные живут в `SeatStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabinRow {
    pub row_number: u32,
    pub seat_class: SeatClass,
    pub left_seats: Vec<SeatId>,
    pub right_seats: Vec<SeatId>,
    pub is_emergency_row: bool,
}

impl CabinRow {
    pub fn seat_ids(&self) -> impl Iterator<Item = &SeatId> {
        self.left_seats.iter().chain(&self.right_seats)
    }
}

/// Место, подготовленное для отображения.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    #[serde(flatten)]
    pub seat: Seat,
    pub computed_class: String,
    pub heat_map_color: Option<HeatMapColor>,
    pub heat_map_style: String,
}

/// Ряд, подготовленный для отображения. Пересобирается после каждой мутации.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub row_number: u32,
    pub is_business_class: bool,
    pub is_economy_plus: bool,
    pub is_economy: bool,
    pub is_emergency_row: bool,
    pub row_class: String,
    pub aisle_class: String,
    pub left_seats: Vec<SeatView>,
    pub right_seats: Vec<SeatView>,
}

impl RowView {
    pub fn seat_class(&self) -> SeatClass {
        if self.is_business_class {
            SeatClass::Business
        } else if self.is_economy_plus {
            SeatClass::EconomyPlus
        } else {
            SeatClass::Economy
        }
    }

    pub fn seats(&self) -> impl Iterator<Item = &SeatView> {
        self.left_seats.iter().chain(&self.right_seats)
    }
}
