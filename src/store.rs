//! store.rs
//!
//! Хранилище мест: единственный источник правды о состоянии каждого места.
//!
//! Хранилище принадлежит контроллеру выбора. Генератор раскладки получает его
//! по `&mut` и целиком заменяет содержимое одной операцией, поэтому снаружи
//! нельзя увидеть наполовину построенную карту. Мутировать места могут только
//! модули этого крейта; наружу отдаются ссылки на чтение.

use std::collections::{BTreeMap, HashSet};

use crate::models::{Seat, SeatId};

#[derive(Debug, Clone, Default)]
pub struct SeatStore {
    seats: BTreeMap<SeatId, Seat>,
}

impl SeatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &SeatId) -> Option<&Seat> {
        self.seats.get(id)
    }

    /// Поиск по строковому идентификатору. Некорректная строка - просто `None`.
    pub fn lookup(&self, raw_id: &str) -> Option<&Seat> {
        raw_id.parse::<SeatId>().ok().and_then(|id| self.seats.get(&id))
    }

    pub fn contains(&self, id: &SeatId) -> bool {
        self.seats.contains_key(id)
    }

    /// Места в порядке ряд → буква.
    pub fn iter(&self) -> impl Iterator<Item = &Seat> {
        self.seats.values()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Seat> {
        self.seats.values_mut()
    }

    // Полная замена содержимого: старые записи не переживают регенерацию
    pub(crate) fn replace(&mut self, seats: BTreeMap<SeatId, Seat>) {
        self.seats = seats;
    }

    pub(crate) fn set_selected(&mut self, id: &SeatId, selected: bool) -> bool {
        match self.seats.get_mut(id) {
            Some(seat) => {
                seat.is_selected = selected;
                true
            }
            None => false,
        }
    }

    /// Пересчитывает доступность по новому списку заблокированных мест.
    ///
    /// Выбранное место, которое стало заблокированным, теряет выбор.
    /// Возвращает идентификаторы таких мест.
    pub(crate) fn apply_blocked(&mut self, blocked: &HashSet<SeatId>) -> Vec<SeatId> {
        let mut released = Vec::new();
        for seat in self.seats.values_mut() {
            seat.is_available = !blocked.contains(&seat.id);
            if !seat.is_available && seat.is_selected {
                seat.is_selected = false;
                released.push(seat.id);
            }
        }
        released
    }
}
