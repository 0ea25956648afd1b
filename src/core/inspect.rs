//! Single-cell diagnostics: what the extractor sees at one coordinate.

use crate::config::Config;
use crate::core::anchors::{date_up_scan, time_up_scan};
use crate::core::layout::{CellAnchors, ExtractContext, select_layout};
use crate::core::synth::candidate_text;
use crate::errors::AppResult;
use crate::models::{ScheduleEvent, TimeRange};
use crate::sheet::{MergedRange, Sheet};
use crate::utils::to_a1;

#[derive(Debug, Clone)]
pub struct CellReport {
    pub reference: String,
    pub raw: String,
    pub resolved: String,
    pub kind: &'static str,
    pub merged: Option<MergedRange>,
    pub top_left: bool,
    pub day: Option<&'static str>,
    pub layout: Option<&'static str>,
    pub candidate: bool,
    pub row_header: Option<String>,
    pub time: Option<String>,
    pub date: Result<String, String>,
    pub event: Option<ScheduleEvent>,
}

impl CellReport {
    /// Label/value pairs in display order.
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        let none = || "-".to_string();
        vec![
            ("cell", self.reference.clone()),
            ("raw value", self.raw.clone()),
            ("resolved value", format!("{} ({})", self.resolved, self.kind)),
            (
                "merged range",
                self.merged
                    .map(|m| {
                        format!(
                            "{}:{}",
                            to_a1(m.min_row, m.min_col),
                            to_a1(m.max_row, m.max_col)
                        )
                    })
                    .unwrap_or_else(none),
            ),
            ("top-left", self.top_left.to_string()),
            ("day column", self.day.map(str::to_string).unwrap_or_else(none)),
            ("layout", self.layout.map(str::to_string).unwrap_or_else(none)),
            ("candidate", self.candidate.to_string()),
            ("row header", self.row_header.clone().unwrap_or_else(none)),
            ("time anchor", self.time.clone().unwrap_or_else(none)),
            (
                "date anchor",
                match &self.date {
                    Ok(d) => d.clone(),
                    Err(e) => format!("({e})"),
                },
            ),
            (
                "event",
                self.event
                    .as_ref()
                    .map(|e| format!("{} {} {}", e.date_str(), e.time_str(), e.summary))
                    .unwrap_or_else(none),
            ),
        ]
    }
}

/// Inspect `(row, col)`. The event, if any, is taken from a full extraction
/// pass so it matches the feed exactly.
pub fn inspect_cell(sheet: &Sheet, cfg: &Config, row: u32, col: u32) -> AppResult<CellReport> {
    let ctx = ExtractContext::new(sheet, cfg)?;
    let layout = select_layout(sheet, &ctx);
    let scan = ctx.scan();

    // Without a layout, show the bare scans so the sheet can still be debugged.
    let anchors = match layout {
        Some(l) => l.anchors(sheet, &ctx, row, col),
        None => CellAnchors {
            time: time_up_scan(sheet, row, col),
            date: date_up_scan(sheet, row, col, scan.date_scan_up, cfg.year),
        },
    };

    let time = anchors.time.map(|slot| match slot.complete(scan.default_duration_minutes) {
        Some((start, end)) => TimeRange::new(start, end).to_string(),
        None => slot.to_string(),
    });

    let date = anchors
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|e| e.to_string());

    let header = sheet.cell_value(row, 1);
    let row_header = (!header.is_blank()).then(|| header.to_string());

    let event = match layout {
        Some(l) => l
            .extract(sheet, &ctx)
            .ok()
            .and_then(|events| events.into_iter().find(|e| e.row == row && e.col == col)),
        None => None,
    };

    let resolved = sheet.cell_value(row, col);

    Ok(CellReport {
        reference: to_a1(row, col),
        raw: sheet.raw_value(row, col).to_string(),
        resolved: resolved.to_string(),
        kind: resolved.kind(),
        merged: sheet.merged_range_at(row, col).copied(),
        top_left: sheet.is_top_left(row, col),
        day: ctx.days.get(col),
        layout: layout.map(|l| l.name()),
        candidate: candidate_text(sheet, row, col).is_some(),
        row_header,
        time,
        date,
        event,
    })
}
