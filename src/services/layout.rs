//! layout.rs
//!
//! Генератор раскладки салона.
//!
//! По профилю самолёта и списку заблокированных мест строит упорядоченный
//! список рядов (бизнес → эконом плюс → эконом) и заполняет хранилище мест.
//! Профиль проверяется до создания первого места: при ошибке хранилище
//! остаётся нетронутым.

use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

use crate::error::{ProfileError, SeatMapError};
use crate::models::{AircraftProfile, CabinRow, Seat, SeatClass, SeatId, SeatPosition};
use crate::store::SeatStore;

/// Разбирает внешний список заблокированных мест.
///
/// Строки, которые не являются идентификатором места, ни с одним местом
/// совпасть не могут и просто пропускаются.
pub fn parse_blocked_seats<I, S>(ids: I) -> HashSet<SeatId>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .filter_map(|raw| match raw.as_ref().parse::<SeatId>() {
            Ok(id) => Some(id),
            Err(e) => {
                debug!("Skipping blocked seat entry: {}", e);
                None
            }
        })
        .collect()
}

/// Строит раскладку и заменяет содержимое хранилища.
///
/// Повторный вызов с теми же входными данными даёт места с теми же
/// неизменяемыми полями; выбор и оценки популярности сбрасываются.
pub fn generate_layout(
    profile: &AircraftProfile,
    blocked: &HashSet<SeatId>,
    store: &mut SeatStore,
) -> Result<Vec<CabinRow>, SeatMapError> {
    profile.validate()?;

    let mut seats = BTreeMap::new();
    let mut rows = Vec::with_capacity(profile.row_count());

    for section in profile.sections() {
        for row_number in section.rows.iter() {
            let is_emergency_row = profile.is_emergency_row(row_number);
            let mut builder = RowBuilder {
                row_number,
                seat_class: section.seat_class,
                is_emergency_row,
                blocked,
                seats: &mut seats,
            };

            let left_seats = section
                .columns
                .left_positions()
                .map(|(letter, position)| builder.create_seat(letter, position))
                .collect::<Result<Vec<_>, _>>()?;
            let right_seats = section
                .columns
                .right_positions()
                .map(|(letter, position)| builder.create_seat(letter, position))
                .collect::<Result<Vec<_>, _>>()?;

            rows.push(CabinRow {
                row_number,
                seat_class: section.seat_class,
                left_seats,
                right_seats,
                is_emergency_row,
            });
        }
    }

    let blocked_count = seats.values().filter(|s: &&Seat| !s.is_available).count();
    store.replace(seats);

    info!(
        "Seat layout generated for {}: {} rows, {} seats, {} blocked",
        profile.model,
        rows.len(),
        store.len(),
        blocked_count
    );

    Ok(rows)
}

struct RowBuilder<'a> {
    row_number: u32,
    seat_class: SeatClass,
    is_emergency_row: bool,
    blocked: &'a HashSet<SeatId>,
    seats: &'a mut BTreeMap<SeatId, Seat>,
}

impl RowBuilder<'_> {
    fn create_seat(&mut self, letter: char, position: SeatPosition) -> Result<SeatId, ProfileError> {
        let id = SeatId::new(self.row_number, letter);
        let seat = Seat::new(
            id,
            self.seat_class,
            position,
            self.is_emergency_row,
            !self.blocked.contains(&id),
        );

        if self.seats.insert(id, seat).is_some() {
            return Err(ProfileError::DuplicateSeat(id));
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RowRange;

    fn reference_layout(blocked: &[&str]) -> (Vec<CabinRow>, SeatStore) {
        let mut store = SeatStore::new();
        let rows = generate_layout(
            &AircraftProfile::boeing_737_800(),
            &parse_blocked_seats(blocked),
            &mut store,
        )
        .unwrap();
        (rows, store)
    }

    #[test]
    fn reference_profile_produces_162_seats_in_28_rows() {
        let (rows, store) = reference_layout(&[]);
        assert_eq!(rows.len(), 28);
        assert_eq!(store.len(), 162);

        let numbers: Vec<u32> = rows.iter().map(|r| r.row_number).collect();
        assert_eq!(numbers, (1..=28).collect::<Vec<_>>());
    }

    #[test]
    fn sections_get_their_class_and_columns() {
        let (rows, store) = reference_layout(&[]);

        let business = &rows[0];
        assert_eq!(business.seat_class, SeatClass::Business);
        assert_eq!(business.left_seats.len(), 2);
        assert_eq!(business.right_seats.len(), 2);

        let seat = store.lookup("2D").unwrap();
        assert_eq!(seat.seat_class, SeatClass::Business);
        assert_eq!(seat.position, SeatPosition::Window);
        assert_eq!(seat.price, 1200);

        let seat = store.lookup("5B").unwrap();
        assert_eq!(seat.seat_class, SeatClass::EconomyPlus);
        assert_eq!(seat.position, SeatPosition::Middle);

        let seat = store.lookup("28D").unwrap();
        assert_eq!(seat.seat_class, SeatClass::Economy);
        assert_eq!(seat.position, SeatPosition::Aisle);

        assert!(store.lookup("2E").is_none());
        assert!(store.lookup("29A").is_none());
    }

    #[test]
    fn emergency_rows_are_flagged() {
        let (rows, store) = reference_layout(&[]);
        let emergency: Vec<u32> = rows
            .iter()
            .filter(|r| r.is_emergency_row)
            .map(|r| r.row_number)
            .collect();
        assert_eq!(emergency, vec![8, 20]);
        assert!(store.lookup("8C").unwrap().is_emergency_exit);
        assert!(store.lookup("20F").unwrap().is_emergency_exit);
        assert!(!store.lookup("9A").unwrap().is_emergency_exit);
    }

    #[test]
    fn blocked_seats_are_unavailable() {
        let (_, store) = reference_layout(&["8A", "12C", "garbage", "99A"]);
        assert!(!store.lookup("8A").unwrap().is_available);
        assert!(!store.lookup("12C").unwrap().is_available);
        assert_eq!(store.iter().filter(|s| !s.is_available).count(), 2);
    }

    #[test]
    fn regeneration_clears_previous_store() {
        let mut store = SeatStore::new();
        let blocked = HashSet::new();
        generate_layout(&AircraftProfile::boeing_737_800(), &blocked, &mut store).unwrap();

        let mut smaller = AircraftProfile::boeing_737_800();
        smaller.economy_rows = RowRange::new(9, 10);
        smaller.emergency_row_numbers = vec![8];
        let rows = generate_layout(&smaller, &blocked, &mut store).unwrap();

        assert_eq!(rows.len(), 10);
        assert_eq!(store.len(), 12 + 30 + 12);
        assert!(store.lookup("28A").is_none());
    }

    #[test]
    fn invalid_profile_leaves_store_untouched() {
        let mut store = SeatStore::new();
        let blocked = HashSet::new();
        generate_layout(&AircraftProfile::boeing_737_800(), &blocked, &mut store).unwrap();

        let mut broken = AircraftProfile::boeing_737_800();
        broken.economy_rows = RowRange::new(12, 28);
        let result = generate_layout(&broken, &blocked, &mut store);

        assert!(matches!(result, Err(SeatMapError::InvalidProfile(_))));
        assert_eq!(store.len(), 162);
    }

    #[test]
    fn regeneration_is_idempotent_for_fixed_fields() {
        let (rows_a, store_a) = reference_layout(&["3C"]);
        let (rows_b, store_b) = reference_layout(&["3C"]);
        assert_eq!(rows_a, rows_b);
        assert!(store_a.iter().eq(store_b.iter()));
    }
}
