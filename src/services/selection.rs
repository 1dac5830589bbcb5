//! selection.rs
//!
//! Контроллер выбора мест.
//!
//! Ключевые обязанности:
//! 1.  **Владение состоянием**: хранилище мест, скелет рядов, список выбранных
//!     мест и место под курсором принадлежат контроллеру. Никакого глобального
//!     состояния нет.
//! 2.  **Правила выбора**: переключение места, лимит выбора, запрет выбора
//!     заблокированных мест, принудительное снятие выбора при блокировке.
//! 3.  **Производные данные**: после каждой мутации ряды для отображения
//!     пересобираются из хранилища.
//! 4.  **Уведомления**: изменения выбора, превышение лимита и смена места под
//!     курсором публикуются в broadcast-канал.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::error::SeatMapError;
use crate::models::{
    AircraftProfile, CabinRow, RowView, Seat, SeatClass, SeatId, SeatInfo, SeatMapEvent,
    SelectionChanged,
};
use crate::services::{layout, popularity, view};
use crate::store::SeatStore;

pub const DEFAULT_MAX_SELECTION: usize = 999;
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Параметры, с которыми создаётся карта мест.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatMapOptions {
    pub max_selection: usize,
    pub show_heat_map: bool,
    pub blocked_seats: Vec<String>,
    /// Зерно генератора для оценок популярности. `None` - системный источник.
    pub popularity_seed: Option<u64>,
}

impl Default for SeatMapOptions {
    fn default() -> Self {
        Self {
            max_selection: DEFAULT_MAX_SELECTION,
            show_heat_map: false,
            blocked_seats: Vec::new(),
            popularity_seed: None,
        }
    }
}

/// Результат переключения места.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    /// Лимит выбора исчерпан, состояние не изменилось.
    LimitExceeded,
    /// Места нет или оно заблокировано.
    Ignored,
}

pub struct SelectionController {
    profile: AircraftProfile,
    store: SeatStore,
    layout: Vec<CabinRow>,
    rows: Vec<RowView>,
    blocked: HashSet<SeatId>,
    selected: Vec<SeatId>,
    hovered: Option<SeatId>,
    max_selection: usize,
    show_heat_map: bool,
    rng: StdRng,
    events: broadcast::Sender<SeatMapEvent>,
}

impl SelectionController {
    pub fn new(profile: AircraftProfile, options: SeatMapOptions) -> Result<Self, SeatMapError> {
        if options.max_selection == 0 {
            return Err(SeatMapError::InvalidMaxSelection);
        }

        let rng = match options.popularity_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let mut controller = Self {
            profile: profile.clone(),
            store: SeatStore::new(),
            layout: Vec::new(),
            rows: Vec::new(),
            blocked: layout::parse_blocked_seats(&options.blocked_seats),
            selected: Vec::new(),
            hovered: None,
            max_selection: options.max_selection,
            show_heat_map: options.show_heat_map,
            rng,
            events,
        };
        controller.rebuild(profile)?;
        Ok(controller)
    }

    /// Карта для Boeing 737-800.
    pub fn with_reference_profile(options: SeatMapOptions) -> Result<Self, SeatMapError> {
        Self::new(AircraftProfile::boeing_737_800(), options)
    }

    /// Полная регенерация под новый профиль самолёта.
    ///
    /// При ошибке профиля текущая карта остаётся как была. При успехе выбор
    /// сбрасывается; если он был не пуст, публикуется `SelectionChanged`.
    pub fn set_aircraft(&mut self, profile: AircraftProfile) -> Result<(), SeatMapError> {
        let had_selection = !self.selected.is_empty();
        self.rebuild(profile)?;
        if had_selection {
            self.publish_selection();
        }
        Ok(())
    }

    fn rebuild(&mut self, profile: AircraftProfile) -> Result<(), SeatMapError> {
        self.layout = layout::generate_layout(&profile, &self.blocked, &mut self.store)?;
        self.profile = profile;
        self.selected.clear();
        self.hovered = None;
        popularity::score_seats(&mut self.store, &mut self.rng);
        self.refresh_rows();
        Ok(())
    }

    /// Переключает выбор места.
    ///
    /// Несуществующее или заблокированное место молча игнорируется. Снять
    /// выбор можно всегда, даже если лимит исчерпан.
    pub fn toggle_seat(&mut self, seat_id: &str) -> ToggleOutcome {
        let Some(seat) = self.store.lookup(seat_id) else {
            debug!("Toggle ignored: unknown seat {:?}", seat_id);
            return ToggleOutcome::Ignored;
        };
        if !seat.is_available {
            debug!("Toggle ignored: seat {} is blocked", seat.id);
            return ToggleOutcome::Ignored;
        }
        let id = seat.id;

        let outcome = if let Some(index) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(index);
            self.store.set_selected(&id, false);
            ToggleOutcome::Deselected
        } else if self.selected.len() >= self.max_selection {
            warn!(
                "Selection limit reached: {} of {} seats, {} rejected",
                self.selected.len(),
                self.max_selection,
                id
            );
            self.publish(SeatMapEvent::limit_exceeded(self.max_selection));
            return ToggleOutcome::LimitExceeded;
        } else {
            self.selected.push(id);
            self.store.set_selected(&id, true);
            ToggleOutcome::Selected
        };

        self.refresh_rows();
        self.publish_selection();
        outcome
    }

    /// Запоминает место под курсором. Неизвестное место игнорируется.
    pub fn hover(&mut self, seat_id: &str) -> bool {
        let Some(id) = self.store.lookup(seat_id).map(|s| s.id) else {
            return false;
        };
        self.hovered = Some(id);
        self.publish(SeatMapEvent::HoverChanged { seat_id: Some(id) });
        true
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
        self.publish(SeatMapEvent::HoverChanged { seat_id: None });
    }

    /// Новый лимит действует только на последующие переключения:
    /// уже выбранные места не вытесняются.
    pub fn set_max_selection(&mut self, max_selection: usize) -> Result<(), SeatMapError> {
        if max_selection == 0 {
            return Err(SeatMapError::InvalidMaxSelection);
        }
        self.max_selection = max_selection;
        Ok(())
    }

    /// Обновляет список заблокированных мест.
    ///
    /// Выбранные места, которые стали заблокированными, снимаются с выбора;
    /// в этом случае публикуется `SelectionChanged`. Возвращает снятые места.
    pub fn set_blocked_seats<I, S>(&mut self, ids: I) -> Vec<SeatId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blocked = layout::parse_blocked_seats(ids);
        let released = self.store.apply_blocked(&self.blocked);
        self.selected.retain(|id| !released.contains(id));

        info!(
            "Blocked seats refreshed: {} blocked, {} released from selection",
            self.blocked.len(),
            released.len()
        );

        self.refresh_rows();
        if !released.is_empty() {
            self.publish_selection();
        }
        released
    }

    pub fn set_heat_map(&mut self, enabled: bool) {
        self.show_heat_map = enabled;
        self.refresh_rows();
    }

    pub fn toggle_heat_map(&mut self) -> bool {
        self.set_heat_map(!self.show_heat_map);
        self.show_heat_map
    }

    /// Пересобирает ряды для отображения из хранилища.
    pub fn refresh_rows(&mut self) -> &[RowView] {
        self.rows = view::render_rows(&self.layout, &self.store, self.show_heat_map);
        &self.rows
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SeatMapEvent> {
        self.events.subscribe()
    }

    // === Чтение ===

    pub fn profile(&self) -> &AircraftProfile {
        &self.profile
    }

    pub fn store(&self) -> &SeatStore {
        &self.store
    }

    pub fn seat(&self, seat_id: &str) -> Option<&Seat> {
        self.store.lookup(seat_id)
    }

    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn rows_in(&self, seat_class: SeatClass) -> impl Iterator<Item = &RowView> {
        self.rows.iter().filter(move |row| row.seat_class() == seat_class)
    }

    pub fn selected_ids(&self) -> &[SeatId] {
        &self.selected
    }

    /// Выбранные места в порядке выбора.
    pub fn selected_seats(&self) -> Vec<&Seat> {
        self.selected
            .iter()
            .filter_map(|id| self.store.get(id))
            .collect()
    }

    pub fn total_price(&self) -> u32 {
        self.selected_seats().iter().map(|s| s.price).sum()
    }

    pub fn selection(&self) -> SelectionChanged {
        let selected_seats: Vec<Seat> = self.selected_seats().into_iter().cloned().collect();
        let total_price = selected_seats.iter().map(|s| s.price).sum();
        SelectionChanged {
            selected_seats,
            total_price,
        }
    }

    /// Идентификаторы выбранных мест через запятую.
    pub fn selection_label(&self) -> String {
        self.selected
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn hovered_seat(&self) -> Option<&Seat> {
        self.hovered.as_ref().and_then(|id| self.store.get(id))
    }

    pub fn hovered_seat_info(&self) -> Option<SeatInfo> {
        self.hovered_seat().map(SeatInfo::from)
    }

    pub fn max_selection(&self) -> usize {
        self.max_selection
    }

    pub fn show_heat_map(&self) -> bool {
        self.show_heat_map
    }

    // Отправка без подписчиков - не ошибка
    fn publish(&self, event: SeatMapEvent) {
        let _ = self.events.send(event);
    }

    fn publish_selection(&self) {
        self.publish(SeatMapEvent::SelectionChanged(self.selection()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(max_selection: usize, blocked: &[&str]) -> SelectionController {
        SelectionController::with_reference_profile(SeatMapOptions {
            max_selection,
            blocked_seats: blocked.iter().map(|s| s.to_string()).collect(),
            popularity_seed: Some(1),
            ..SeatMapOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn zero_max_selection_is_rejected() {
        let result = SelectionController::with_reference_profile(SeatMapOptions {
            max_selection: 0,
            ..SeatMapOptions::default()
        });
        assert!(matches!(result, Err(SeatMapError::InvalidMaxSelection)));

        let mut c = controller(2, &[]);
        assert!(c.set_max_selection(0).is_err());
        assert_eq!(c.max_selection(), 2);
    }

    #[test]
    fn toggle_selects_then_deselects() {
        let mut c = controller(DEFAULT_MAX_SELECTION, &[]);
        assert_eq!(c.toggle_seat("12C"), ToggleOutcome::Selected);
        assert!(c.seat("12C").unwrap().is_selected);
        assert_eq!(c.total_price(), 200);

        assert_eq!(c.toggle_seat("12C"), ToggleOutcome::Deselected);
        assert!(!c.seat("12C").unwrap().is_selected);
        assert!(c.selected_ids().is_empty());
        assert_eq!(c.total_price(), 0);
    }

    #[test]
    fn limit_rejects_without_mutation() {
        let mut c = controller(2, &[]);
        assert_eq!(c.toggle_seat("1A"), ToggleOutcome::Selected);
        assert_eq!(c.toggle_seat("1B"), ToggleOutcome::Selected);
        assert_eq!(c.toggle_seat("1C"), ToggleOutcome::LimitExceeded);

        assert_eq!(c.selection_label(), "1A, 1B");
        assert!(!c.seat("1C").unwrap().is_selected);
        assert_eq!(c.total_price(), 2400);
    }

    #[test]
    fn unknown_and_blocked_seats_are_ignored() {
        let mut c = controller(DEFAULT_MAX_SELECTION, &["8A"]);
        assert_eq!(c.toggle_seat("8A"), ToggleOutcome::Ignored);
        assert_eq!(c.toggle_seat("99Z"), ToggleOutcome::Ignored);
        assert_eq!(c.toggle_seat("bogus"), ToggleOutcome::Ignored);
        assert!(c.selected_ids().is_empty());
        assert!(!c.seat("8A").unwrap().is_selected);
    }

    #[test]
    fn rows_reflect_selection_after_toggle() {
        let mut c = controller(DEFAULT_MAX_SELECTION, &[]);
        c.toggle_seat("1A");
        let seat = &c.rows()[0].left_seats[0];
        assert_eq!(seat.seat.id.to_string(), "1A");
        assert!(seat.seat.is_selected);
    }

    #[test]
    fn hover_tracks_without_mutating() {
        let mut c = controller(DEFAULT_MAX_SELECTION, &["3C"]);
        assert!(c.hover("3C"));
        let info = c.hovered_seat_info().unwrap();
        assert_eq!(info.class_label, "Business");
        assert_eq!(info.position_label, "Aisle");
        assert!(!c.seat("3C").unwrap().is_selected);

        assert!(!c.hover("77Q"));
        assert_eq!(c.hovered_seat().unwrap().id.to_string(), "3C");

        c.clear_hover();
        assert!(c.hovered_seat().is_none());
    }

    #[test]
    fn lowering_limit_keeps_existing_selection() {
        let mut c = controller(3, &[]);
        c.toggle_seat("10A");
        c.toggle_seat("10B");
        c.toggle_seat("10C");
        c.set_max_selection(1).unwrap();

        assert_eq!(c.selected_ids().len(), 3);
        assert_eq!(c.toggle_seat("11A"), ToggleOutcome::LimitExceeded);
        assert_eq!(c.toggle_seat("10B"), ToggleOutcome::Deselected);
        assert_eq!(c.selection_label(), "10A, 10C");
    }

    #[test]
    fn blocking_selected_seat_force_deselects() {
        let mut c = controller(DEFAULT_MAX_SELECTION, &[]);
        let mut rx = c.subscribe();
        c.toggle_seat("5A");
        c.toggle_seat("5B");
        let _ = rx.try_recv();
        let _ = rx.try_recv();

        let released = c.set_blocked_seats(["5A", "6F"]);
        assert_eq!(released, vec![SeatId::new(5, 'A')]);
        assert_eq!(c.selection_label(), "5B");
        assert!(!c.seat("5A").unwrap().is_available);
        assert!(!c.seat("5A").unwrap().is_selected);

        match rx.try_recv().unwrap() {
            SeatMapEvent::SelectionChanged(change) => {
                assert_eq!(change.selected_seats.len(), 1);
                assert_eq!(change.total_price, 350);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn unblocking_restores_availability_only() {
        let mut c = controller(DEFAULT_MAX_SELECTION, &["7D"]);
        let released = c.set_blocked_seats(Vec::<String>::new());
        assert!(released.is_empty());
        assert!(c.seat("7D").unwrap().is_available);
        assert_eq!(c.toggle_seat("7D"), ToggleOutcome::Selected);
    }

    #[test]
    fn heat_map_toggle_recolors_rows() {
        let mut c = controller(DEFAULT_MAX_SELECTION, &[]);
        assert!(c.rows()[0].left_seats[0].heat_map_color.is_none());
        assert!(c.toggle_heat_map());
        assert!(c.rows()[0].left_seats[0].heat_map_color.is_some());
        assert!(!c.toggle_heat_map());
        assert!(c.rows()[0].left_seats[0].heat_map_color.is_none());
    }

    #[test]
    fn changing_aircraft_clears_selection() {
        let mut c = controller(DEFAULT_MAX_SELECTION, &[]);
        c.toggle_seat("1A");

        let mut profile = AircraftProfile::boeing_737_800();
        profile.model = "Boeing 737-800 (short)".to_string();
        profile.economy_rows = crate::models::RowRange::new(9, 12);
        profile.emergency_row_numbers = vec![8];
        c.set_aircraft(profile).unwrap();

        assert!(c.selected_ids().is_empty());
        assert_eq!(c.rows().len(), 12);
        assert!(c.seat("20A").is_none());
        assert_eq!(c.rows_in(SeatClass::Economy).count(), 4);
    }

    #[test]
    fn broken_aircraft_keeps_current_map() {
        let mut c = controller(DEFAULT_MAX_SELECTION, &[]);
        c.toggle_seat("1A");

        let mut broken = AircraftProfile::boeing_737_800();
        broken.business_rows = crate::models::RowRange::new(0, 3);
        assert!(c.set_aircraft(broken).is_err());

        assert_eq!(c.profile().model, "Boeing 737-800");
        assert_eq!(c.store().len(), 162);
        assert_eq!(c.selection_label(), "1A");
    }

    #[test]
    fn limit_exceeded_is_published() {
        let mut c = controller(1, &[]);
        let mut rx = c.subscribe();
        c.toggle_seat("9A");
        c.toggle_seat("9B");

        assert!(matches!(rx.try_recv().unwrap(), SeatMapEvent::SelectionChanged(_)));
        assert_eq!(rx.try_recv().unwrap(), SeatMapEvent::limit_exceeded(1));
    }
}
