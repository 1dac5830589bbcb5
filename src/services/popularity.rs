//! popularity.rs
//!
//! Оценка популярности мест для тепловой карты.
//!
//! Оценка складывается из эвристических весов (окно, проход, класс, близость
//! к носу, аварийный ряд) и случайного сдвига в диапазоне [-10, 9], после чего
//! ограничивается диапазоном [0, 100]. Источник случайности передаётся
//! снаружи, поэтому тесты могут использовать детерминированный генератор.

use rand::Rng;
use tracing::debug;

use crate::models::{Seat, SeatClass, SeatPosition};
use crate::store::SeatStore;

const BASE_SCORE: i32 = 50;
const WINDOW_BONUS: i32 = 30;
const AISLE_BONUS: i32 = 20;
const BUSINESS_BONUS: i32 = 25;
const FRONT_ROW_BONUS: i32 = 15;
const FORWARD_ROW_BONUS: i32 = 10;
const EMERGENCY_EXIT_BONUS: i32 = 20;
const MIDDLE_PENALTY: i32 = 30;
const BACK_ROW_PENALTY: i32 = 15;

pub const JITTER_RANGE: std::ops::Range<i32> = -10..10;

/// Оценка места без ограничения диапазона.
pub fn raw_score(seat: &Seat, jitter: i32) -> i32 {
    let mut score = BASE_SCORE;

    match seat.position {
        SeatPosition::Window => score += WINDOW_BONUS,
        SeatPosition::Aisle => score += AISLE_BONUS,
        SeatPosition::Middle => score -= MIDDLE_PENALTY,
    }

    if seat.seat_class == SeatClass::Business {
        score += BUSINESS_BONUS;
    }

    if seat.row <= 5 {
        score += FRONT_ROW_BONUS;
    } else if seat.row <= 10 {
        score += FORWARD_ROW_BONUS;
    }

    if seat.is_emergency_exit {
        score += EMERGENCY_EXIT_BONUS;
    }

    if seat.row > 20 {
        score -= BACK_ROW_PENALTY;
    }

    score + jitter
}

pub fn popularity_score(seat: &Seat, jitter: i32) -> u8 {
    raw_score(seat, jitter).clamp(0, 100) as u8
}

pub fn random_jitter<R: Rng>(rng: &mut R) -> i32 {
    rng.gen_range(JITTER_RANGE)
}

/// Проставляет оценку каждому месту в хранилище. Запускается один раз после
/// генерации раскладки; изменения выбора оценки не пересчитывают.
pub fn score_seats<R: Rng>(store: &mut SeatStore, rng: &mut R) {
    for seat in store.iter_mut() {
        seat.popularity_score = popularity_score(seat, random_jitter(rng));
    }
    debug!("Popularity scores assigned to {} seats", store.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AircraftProfile, SeatId};
    use crate::services::layout::generate_layout;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn seat(row: u32, letter: char, class: SeatClass, position: SeatPosition, exit: bool) -> Seat {
        Seat::new(SeatId::new(row, letter), class, position, exit, true)
    }

    #[test]
    fn business_window_front_row_clamps_to_100() {
        let s = seat(2, 'A', SeatClass::Business, SeatPosition::Window, false);
        assert_eq!(raw_score(&s, 0), 120);
        assert_eq!(popularity_score(&s, 0), 100);
    }

    #[test]
    fn back_row_middle_seat_is_least_popular() {
        let s = seat(25, 'B', SeatClass::Economy, SeatPosition::Middle, false);
        assert_eq!(raw_score(&s, 0), 50 - 30 - 15);
        assert_eq!(popularity_score(&s, -10), 0);
    }

    #[test]
    fn emergency_row_and_row_bands() {
        let s = seat(8, 'C', SeatClass::EconomyPlus, SeatPosition::Aisle, true);
        assert_eq!(raw_score(&s, 0), 50 + 20 + 10 + 20);

        let s = seat(15, 'A', SeatClass::Economy, SeatPosition::Window, false);
        assert_eq!(raw_score(&s, 0), 80);

        let s = seat(21, 'D', SeatClass::Economy, SeatPosition::Aisle, false);
        assert_eq!(raw_score(&s, 3), 50 + 20 - 15 + 3);
    }

    #[test]
    fn jitter_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let jitter = random_jitter(&mut rng);
            assert!((-10..=9).contains(&jitter));
        }
    }

    #[test]
    fn seeded_scoring_is_reproducible() {
        let profile = AircraftProfile::boeing_737_800();
        let mut first = SeatStore::new();
        let mut second = SeatStore::new();
        generate_layout(&profile, &HashSet::new(), &mut first).unwrap();
        generate_layout(&profile, &HashSet::new(), &mut second).unwrap();

        score_seats(&mut first, &mut StdRng::seed_from_u64(42));
        score_seats(&mut second, &mut StdRng::seed_from_u64(42));

        let a: Vec<u8> = first.iter().map(|s| s.popularity_score).collect();
        let b: Vec<u8> = second.iter().map(|s| s.popularity_score).collect();
        assert_eq!(a, b);
        assert!(a.iter().all(|&score| score <= 100));
    }
}
