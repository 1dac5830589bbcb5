use serde::Serialize;

use crate::models::{Seat, SeatId};

/// Текущий выбор пассажира вместе с итоговой ценой.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionChanged {
    pub selected_seats: Vec<Seat>,
    pub total_price: u32,
}

/// Уведомления контроллера выбора для внешних потребителей.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeatMapEvent {
    SelectionChanged(SelectionChanged),
    SelectionLimitExceeded { max_selection: usize, message: String },
    HoverChanged { seat_id: Option<SeatId> },
}

impl SeatMapEvent {
    pub fn limit_exceeded(max_selection: usize) -> Self {
        SeatMapEvent::SelectionLimitExceeded {
            max_selection,
            message: format!("You can only select {} seat(s)", max_selection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SeatClass, SeatPosition};

    #[test]
    fn events_are_tagged_on_the_wire() {
        let seat = Seat::new(SeatId::new(1, 'A'), SeatClass::Business, SeatPosition::Window, false, true);
        let event = SeatMapEvent::SelectionChanged(SelectionChanged {
            selected_seats: vec![seat],
            total_price: 1200,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "selection_changed");
        assert_eq!(json["total_price"], 1200);
        assert_eq!(json["selected_seats"][0]["id"], "1A");

        let json = serde_json::to_value(SeatMapEvent::limit_exceeded(2)).unwrap();
        assert_eq!(json["type"], "selection_limit_exceeded");
        assert_eq!(json["message"], "You can only select 2 seat(s)");

        let json = serde_json::to_value(SeatMapEvent::HoverChanged { seat_id: None }).unwrap();
        assert_eq!(json["type"], "hover_changed");
        assert!(json["seat_id"].is_null());
    }
}
