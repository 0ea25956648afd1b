//! Anchor resolvers: find the date and time slot governing a cell.

use crate::config::ScanConfig;
use crate::core::tokens::{cell_date, cell_time, parse_date};
use crate::errors::{AppError, AppResult};
use crate::models::{CellValue, TimeRange};
use crate::sheet::Sheet;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Scan upward in `col` from `row` (inclusive), `lookback` rows at most.
///
/// Within the window a native date beats a text date; each kind prefers the
/// nearest row.
pub fn date_up_scan(
    sheet: &Sheet,
    row: u32,
    col: u32,
    lookback: u32,
    year: i32,
) -> AppResult<NaiveDate> {
    let lowest = row.saturating_sub(lookback.saturating_sub(1)).max(1);
    let window = move || (lowest..=row).rev().map(move |r| sheet.cell_value(r, col));

    if let Some(date) = window().find_map(CellValue::as_date) {
        return Ok(date);
    }
    window()
        .find_map(|v| v.as_text().and_then(|s| parse_date(s, year)))
        .ok_or(AppError::DateNotFound { row, col })
}

/// Nearest time range or lone start time at or above `row` in `col`.
pub fn time_up_scan(sheet: &Sheet, row: u32, col: u32) -> Option<TimeRange> {
    (1..=row)
        .rev()
        .find_map(|r| cell_time(sheet.cell_value(r, col)))
}

/// Per-column time slots taken from header rows.
#[derive(Debug, Clone, Default)]
pub struct ColumnTimes {
    slots: BTreeMap<u32, TimeRange>,
    last_header_row: u32,
}

impl ColumnTimes {
    /// For each column: the time at `time_header_row` when configured and
    /// present, otherwise the first time found in the header window.
    pub fn build(sheet: &Sheet, columns: impl IntoIterator<Item = u32>, scan: &ScanConfig) -> Self {
        let header_last = scan.max_header_rows.min(sheet.max_row());
        let mut times = ColumnTimes::default();

        for col in columns {
            let at_header_row = scan
                .time_header_row
                .and_then(|r| cell_time(sheet.cell_value(r, col)).map(|slot| (r, slot)));

            let found = at_header_row.or_else(|| {
                (1..=header_last)
                    .find_map(|r| cell_time(sheet.cell_value(r, col)).map(|slot| (r, slot)))
            });

            if let Some((row, slot)) = found {
                times.slots.insert(col, slot);
                times.last_header_row = times.last_header_row.max(row);
            }
        }

        times
    }

    /// Lowest row a time header was taken from (0 when none).
    pub fn last_header_row(&self) -> u32 {
        self.last_header_row
    }

    pub fn get(&self, col: u32) -> Option<TimeRange> {
        self.slots.get(&col).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// "Current date" per column, advanced row by row from the top.
#[derive(Debug, Clone, Default)]
pub struct ColumnDates {
    year: i32,
    current: BTreeMap<u32, NaiveDate>,
    latest: Option<NaiveDate>,
}

impl ColumnDates {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    /// Record every date-bearing cell of `row` in columns `1..=last_col`.
    pub fn observe_row(&mut self, sheet: &Sheet, row: u32, last_col: u32) {
        for col in 1..=last_col {
            if let Some(date) = cell_date(sheet.cell_value(row, col), self.year) {
                self.current.insert(col, date);
                self.latest = Some(date);
            }
        }
    }

    /// Replay all rows above `before_row` so earlier anchors are known.
    pub fn prime(&mut self, sheet: &Sheet, before_row: u32, last_col: u32) {
        for row in 1..before_row {
            self.observe_row(sheet, row, last_col);
        }
    }

    pub fn get(&self, col: u32) -> Option<NaiveDate> {
        self.current.get(&col).copied()
    }

    /// Most recent date seen in any column.
    pub fn latest(&self) -> Option<NaiveDate> {
        self.latest
    }
}
