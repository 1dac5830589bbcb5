//! aircraft.rs
//!
//! Профиль самолёта: границы секций салона, раскладка колонок по секциям и
//! аварийные ряды. По умолчанию используется Boeing 737-800; профиль можно
//! загрузить из TOML/JSON файла через крейт `config`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{ProfileError, SeatMapError};
use crate::models::{SeatClass, SeatPosition};

/// Наибольший допустимый номер ряда в профиле.
pub const MAX_ROW_NUMBER: u32 = 150;

/// Наибольшее число мест в салоне (сертифицированный максимум A380).
pub const MAX_SEAT_COUNT: usize = 853;

/// Диапазон рядов секции, включительно с обеих сторон.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub first: u32,
    pub last: u32,
}

impl RowRange {
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u32> {
        self.first..=self.last
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.last - self.first + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first == 0 || self.first > self.last
    }

    pub fn contains(&self, row: u32) -> bool {
        self.iter().contains(&row)
    }
}

/// Колонки по обе стороны от прохода, слева направо.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub left: Vec<char>,
    pub right: Vec<char>,
}

impl ColumnLayout {
    pub fn new(left: &[char], right: &[char]) -> Self {
        Self {
            left: left.to_vec(),
            right: right.to_vec(),
        }
    }

    /// Левая сторона: крайняя колонка у окна, последняя у прохода.
    pub fn left_positions(&self) -> impl Iterator<Item = (char, SeatPosition)> + '_ {
        let last = self.left.len().saturating_sub(1);
        self.left.iter().enumerate().map(move |(i, &letter)| {
            let position = if i == 0 {
                SeatPosition::Window
            } else if i == last {
                SeatPosition::Aisle
            } else {
                SeatPosition::Middle
            };
            (letter, position)
        })
    }

    /// Правая сторона: первая колонка у прохода, крайняя у окна.
    pub fn right_positions(&self) -> impl Iterator<Item = (char, SeatPosition)> + '_ {
        let last = self.right.len().saturating_sub(1);
        self.right.iter().enumerate().map(move |(i, &letter)| {
            let position = if i == 0 {
                SeatPosition::Aisle
            } else if i == last {
                SeatPosition::Window
            } else {
                SeatPosition::Middle
            };
            (letter, position)
        })
    }

    pub fn seats_per_row(&self) -> usize {
        self.left.len() + self.right.len()
    }

    fn validate(&self, seat_class: SeatClass) -> Result<(), ProfileError> {
        for side in [&self.left, &self.right] {
            if !(2..=3).contains(&side.len()) {
                return Err(ProfileError::SideWidth {
                    seat_class,
                    count: side.len(),
                });
            }
        }

        let mut seen = HashSet::new();
        for &letter in self.left.iter().chain(&self.right) {
            if !letter.is_ascii_uppercase() {
                return Err(ProfileError::InvalidColumn { seat_class, letter });
            }
            if !seen.insert(letter) {
                return Err(ProfileError::DuplicateColumn { seat_class, letter });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionColumns {
    pub business: ColumnLayout,
    pub economy_plus: ColumnLayout,
    pub economy: ColumnLayout,
}

/// Секция салона в том порядке, в котором она идёт от носа к хвосту.
#[derive(Debug, Clone, Copy)]
pub struct CabinSection<'a> {
    pub seat_class: SeatClass,
    pub rows: RowRange,
    pub columns: &'a ColumnLayout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftProfile {
    pub model: String,
    pub business_rows: RowRange,
    pub economy_plus_rows: RowRange,
    pub economy_rows: RowRange,
    pub columns_per_section: SectionColumns,
    #[serde(default)]
    pub emergency_row_numbers: Vec<u32>,
}

impl AircraftProfile {
    /// Типовая компоновка Boeing 737-800: бизнес 1-3 (2-2),
    /// эконом плюс 4-8 (3-3), эконом 9-28 (3-3), аварийные ряды 8 и 20.
    pub fn boeing_737_800() -> Self {
        let three_three = ColumnLayout::new(&['A', 'B', 'C'], &['D', 'E', 'F']);
        Self {
            model: "Boeing 737-800".to_string(),
            business_rows: RowRange::new(1, 3),
            economy_plus_rows: RowRange::new(4, 8),
            economy_rows: RowRange::new(9, 28),
            columns_per_section: SectionColumns {
                business: ColumnLayout::new(&['A', 'B'], &['C', 'D']),
                economy_plus: three_three.clone(),
                economy: three_three,
            },
            emergency_row_numbers: vec![8, 20],
        }
    }

    /// Загружает профиль из файла (формат определяется по расширению).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SeatMapError> {
        let profile: AircraftProfile = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()))
            .build()?
            .try_deserialize()?;

        profile.validate()?;
        Ok(profile)
    }

    pub fn sections(&self) -> [CabinSection<'_>; 3] {
        [
            CabinSection {
                seat_class: SeatClass::Business,
                rows: self.business_rows,
                columns: &self.columns_per_section.business,
            },
            CabinSection {
                seat_class: SeatClass::EconomyPlus,
                rows: self.economy_plus_rows,
                columns: &self.columns_per_section.economy_plus,
            },
            CabinSection {
                seat_class: SeatClass::Economy,
                rows: self.economy_rows,
                columns: &self.columns_per_section.economy,
            },
        ]
    }

    pub fn is_emergency_row(&self, row: u32) -> bool {
        self.emergency_row_numbers.contains(&row)
    }

    pub fn row_count(&self) -> usize {
        self.sections().iter().map(|s| s.rows.len()).sum()
    }

    pub fn seat_count(&self) -> usize {
        self.sections()
            .iter()
            .map(|s| s.rows.len() * s.columns.seats_per_row())
            .sum()
    }

    /// Проверяет профиль целиком до того, как будет создано хоть одно место.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let sections = self.sections();

        for section in &sections {
            if section.rows.is_empty() {
                return Err(ProfileError::EmptySection {
                    seat_class: section.seat_class,
                    first: section.rows.first,
                    last: section.rows.last,
                });
            }
            if section.rows.last > MAX_ROW_NUMBER {
                return Err(ProfileError::RowLimit {
                    seat_class: section.seat_class,
                    row: section.rows.last,
                    max: MAX_ROW_NUMBER,
                });
            }
            section.columns.validate(section.seat_class)?;
        }

        // Размер проверяется до того, как под раскладку выделяется память
        let seat_count = self.seat_count();
        if seat_count > MAX_SEAT_COUNT {
            return Err(ProfileError::SeatLimit {
                count: seat_count,
                max: MAX_SEAT_COUNT,
            });
        }

        if self.business_rows.first != 1 {
            return Err(ProfileError::FirstRow(self.business_rows.first));
        }

        // Секции идут подряд, без пропущенных номеров рядов
        for pair in sections.windows(2) {
            let expected = pair[0].rows.last.checked_add(1).ok_or(ProfileError::RowLimit {
                seat_class: pair[0].seat_class,
                row: pair[0].rows.last,
                max: MAX_ROW_NUMBER,
            })?;
            if pair[1].rows.first != expected {
                return Err(ProfileError::RowGap {
                    seat_class: pair[1].seat_class,
                    expected,
                    found: pair[1].rows.first,
                });
            }
        }

        let last_row = self.economy_rows.last;
        if let Some(&row) = self
            .emergency_row_numbers
            .iter()
            .find(|&&row| row == 0 || row > last_row)
        {
            return Err(ProfileError::EmergencyRowOutOfRange { row, last_row });
        }

        Ok(())
    }
}

impl Default for AircraftProfile {
    fn default() -> Self {
        Self::boeing_737_800()
    }
}
