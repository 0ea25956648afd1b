//! In-memory worksheet grid with merged-range resolution.
//!
//! Coordinates are 1-based `(row, col)` as in the spreadsheet UI. Only the
//! top-left cell of a merged range stores a value; every other member reads
//! through to it via [`Sheet::cell_value`].

pub mod workbook;

use crate::models::CellValue;
use std::collections::HashMap;

pub use workbook::load_sheet;

/// Inclusive rectangle of merged cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRange {
    pub min_row: u32,
    pub min_col: u32,
    pub max_row: u32,
    pub max_col: u32,
}

impl MergedRange {
    pub fn new(min_row: u32, min_col: u32, max_row: u32, max_col: u32) -> Self {
        Self {
            min_row: min_row.min(max_row),
            min_col: min_col.min(max_col),
            max_row: min_row.max(max_row),
            max_col: min_col.max(max_col),
        }
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.min_row..=self.max_row).contains(&row) && (self.min_col..=self.max_col).contains(&col)
    }

    pub fn top_left(&self) -> (u32, u32) {
        (self.min_row, self.min_col)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    cells: HashMap<(u32, u32), CellValue>,
    merges: Vec<MergedRange>,
    // cell → index into `merges`
    merge_index: HashMap<(u32, u32), usize>,
    max_row: u32,
    max_col: u32,
}

static EMPTY: CellValue = CellValue::Empty;

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store a value. Row and column 0 are ignored.
    pub fn set(&mut self, row: u32, col: u32, value: CellValue) -> &mut Self {
        if row == 0 || col == 0 {
            return self;
        }
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
        self
    }

    /// Shorthand for text cells.
    pub fn set_text(&mut self, row: u32, col: u32, text: &str) -> &mut Self {
        self.set(row, col, CellValue::text(text))
    }

    /// Register a merged range. Cells already claimed by an earlier range keep it.
    pub fn merge(&mut self, range: MergedRange) -> &mut Self {
        if range.min_row == 0 || range.min_col == 0 {
            return self;
        }
        let idx = self.merges.len();
        self.merges.push(range);
        for r in range.min_row..=range.max_row {
            for c in range.min_col..=range.max_col {
                self.merge_index.entry((r, c)).or_insert(idx);
            }
        }
        self.max_row = self.max_row.max(range.max_row);
        self.max_col = self.max_col.max(range.max_col);
        self
    }

    /// The cell's own stored value, without merge resolution.
    pub fn raw_value(&self, row: u32, col: u32) -> &CellValue {
        self.cells.get(&(row, col)).unwrap_or(&EMPTY)
    }

    /// Effective value: own value if present, else the top-left of the
    /// enclosing merged range, else `Empty`.
    pub fn cell_value(&self, row: u32, col: u32) -> &CellValue {
        let own = self.raw_value(row, col);
        if !own.is_empty() {
            return own;
        }
        match self.merged_range_at(row, col) {
            Some(range) => {
                let (r, c) = range.top_left();
                self.raw_value(r, c)
            }
            None => &EMPTY,
        }
    }

    /// True when the cell is not merged or is exactly the top-left of its range.
    pub fn is_top_left(&self, row: u32, col: u32) -> bool {
        match self.merged_range_at(row, col) {
            Some(range) => range.top_left() == (row, col),
            None => true,
        }
    }

    pub fn merged_range_at(&self, row: u32, col: u32) -> Option<&MergedRange> {
        self.merge_index
            .get(&(row, col))
            .and_then(|idx| self.merges.get(*idx))
    }

    pub fn merged_ranges(&self) -> &[MergedRange] {
        &self.merges
    }

    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    pub fn max_col(&self) -> u32 {
        self.max_col
    }

    /// Number of non-empty stored cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
