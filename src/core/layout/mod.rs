//! Layout detection and the scanning strategies built on it.
//!
//! Two layouts are supported:
//! - [`ClassicLayout`]: day columns × time rows, the time range of each row in column A
//! - [`RowWiseLayout`]: day columns carrying their own time headers, dates
//!   refreshed top-down as rows are scanned

mod classic;
mod rowwise;

pub use classic::ClassicLayout;
pub use rowwise::RowWiseLayout;

use crate::config::{Config, ScanConfig};
use crate::core::synth::Synthesizer;
use crate::core::tokens::day_name;
use crate::errors::AppResult;
use crate::models::{ResolvedAnchor, ScheduleEvent, TimeRange};
use crate::sheet::Sheet;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Column index → weekday name, read from the header window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayColumns {
    map: BTreeMap<u32, &'static str>,
    last_row: u32,
}

impl DayColumns {
    /// Every cell of rows `1..=max_header_rows` whose text is exactly a weekday.
    /// Merged headers count for each column they span.
    pub fn detect(sheet: &Sheet, scan: &ScanConfig) -> Self {
        let mut days = DayColumns::default();
        let last_row = scan.max_header_rows.min(sheet.max_row());

        for row in 1..=last_row {
            for col in 1..=sheet.max_col() {
                if let Some(name) = sheet.cell_value(row, col).as_text().and_then(day_name) {
                    days.map.insert(col, name);
                    days.last_row = days.last_row.max(row);
                }
            }
        }

        days
    }

    pub fn columns(&self) -> impl Iterator<Item = u32> + '_ {
        self.map.keys().copied()
    }

    pub fn get(&self, col: u32) -> Option<&'static str> {
        self.map.get(&col).copied()
    }

    pub fn first_col(&self) -> Option<u32> {
        self.map.keys().next().copied()
    }

    /// Lowest header row holding a weekday name.
    pub fn last_row(&self) -> u32 {
        self.last_row
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Everything a strategy needs besides the sheet.
pub struct ExtractContext<'a> {
    pub cfg: &'a Config,
    pub days: DayColumns,
    pub synth: Synthesizer<'a>,
}

impl<'a> ExtractContext<'a> {
    pub fn new(sheet: &Sheet, cfg: &'a Config) -> AppResult<Self> {
        Ok(Self {
            cfg,
            days: DayColumns::detect(sheet, &cfg.scan),
            synth: Synthesizer::new(cfg)?,
        })
    }

    pub fn scan(&self) -> &ScanConfig {
        &self.cfg.scan
    }
}

/// Time and date anchors of one cell, as a strategy resolves them.
#[derive(Debug)]
pub struct CellAnchors {
    pub time: Option<TimeRange>,
    pub date: AppResult<NaiveDate>,
}

impl CellAnchors {
    /// Completed anchor, or `None` when either half is missing.
    pub fn resolve(&self, default_minutes: u32) -> Option<ResolvedAnchor> {
        let date = *self.date.as_ref().ok()?;
        ResolvedAnchor::resolve(date, self.time?, default_minutes)
    }
}

/// A way of walking the sheet to find candidate cells and their anchors.
pub trait LayoutStrategy: Sync {
    fn name(&self) -> &'static str;

    /// Whether the sheet carries this layout's evidence.
    fn detect(&self, sheet: &Sheet, ctx: &ExtractContext) -> bool;

    /// Anchors for a single cell, identical to what [`extract`](Self::extract)
    /// would use at that position.
    fn anchors(&self, sheet: &Sheet, ctx: &ExtractContext, row: u32, col: u32) -> CellAnchors;

    /// Synthesize events in iteration order.
    fn extract(&self, sheet: &Sheet, ctx: &ExtractContext) -> AppResult<Vec<ScheduleEvent>>;
}

static STRATEGIES: [&dyn LayoutStrategy; 2] = [&ClassicLayout, &RowWiseLayout];

/// First strategy whose evidence is present. `None` when no weekday header
/// was found: such a sheet holds no schedule.
pub fn select_layout(sheet: &Sheet, ctx: &ExtractContext) -> Option<&'static dyn LayoutStrategy> {
    if ctx.days.is_empty() {
        return None;
    }
    STRATEGIES.iter().copied().find(|s| s.detect(sheet, ctx))
}
