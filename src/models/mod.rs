pub mod aircraft;
pub mod notification;
pub mod row;
pub mod seat;

pub use aircraft::{AircraftProfile, CabinSection, ColumnLayout, RowRange, SectionColumns};
pub use notification::{SeatMapEvent, SelectionChanged};
pub use row::{CabinRow, RowView, SeatView};
pub use seat::{Seat, SeatClass, SeatId, SeatInfo, SeatPosition};
