//! view.rs
//!
//! Пересборка рядов для отображения.
//!
//! Каждый раз данные мест читаются заново из хранилища, а не из прошлых
//! копий. Функции чистые: повторный вызов без мутаций между ними даёт
//! тот же результат.

use crate::models::{CabinRow, RowView, Seat, SeatClass, SeatId, SeatView};
use crate::services::heat_map::HeatMapColor;
use crate::store::SeatStore;

pub fn seat_classes(seat: &Seat, show_heat_map: bool) -> String {
    let mut classes = seat.seat_class.as_str().to_string();
    if show_heat_map && seat.is_available {
        classes.push_str(" heat-map-seat");
    }
    classes
}

pub fn render_seat(seat: &Seat, show_heat_map: bool) -> SeatView {
    // Цвет только для доступных мест и только в режиме тепловой карты
    let heat_map_color = (show_heat_map && seat.is_available)
        .then(|| HeatMapColor::for_score(seat.popularity_score));

    SeatView {
        seat: seat.clone(),
        computed_class: seat_classes(seat, show_heat_map),
        heat_map_style: heat_map_color.map(|c| c.style()).unwrap_or_default(),
        heat_map_color,
    }
}

pub fn render_row(row: &CabinRow, store: &SeatStore, show_heat_map: bool) -> RowView {
    let render_side = |ids: &[SeatId]| -> Vec<SeatView> {
        ids.iter()
            .filter_map(|id| store.get(id))
            .map(|seat| render_seat(seat, show_heat_map))
            .collect()
    };

    let mut row_class = String::from("seat-row");
    if row.is_emergency_row {
        row_class.push_str(" emergency-row");
    }

    let is_business_class = row.seat_class == SeatClass::Business;

    RowView {
        row_number: row.row_number,
        is_business_class,
        is_economy_plus: row.seat_class == SeatClass::EconomyPlus,
        is_economy: row.seat_class == SeatClass::Economy,
        is_emergency_row: row.is_emergency_row,
        row_class,
        aisle_class: if is_business_class { "aisle business-aisle" } else { "aisle" }.to_string(),
        left_seats: render_side(&row.left_seats),
        right_seats: render_side(&row.right_seats),
    }
}

pub fn render_rows(layout: &[CabinRow], store: &SeatStore, show_heat_map: bool) -> Vec<RowView> {
    layout
        .iter()
        .map(|row| render_row(row, store, show_heat_map))
        .collect()
}
