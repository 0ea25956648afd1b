use super::{CellAnchors, ExtractContext, LayoutStrategy};
use crate::core::anchors::{ColumnDates, ColumnTimes, date_up_scan, time_up_scan};
use crate::core::synth::candidate_text;
use crate::errors::AppResult;
use crate::models::ScheduleEvent;
use crate::sheet::Sheet;
use chrono::NaiveDate;
use std::ops::RangeInclusive;

/// Day columns with their own time headers; dates are tracked per column as
/// rows are scanned from the top.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowWiseLayout;

impl RowWiseLayout {
    /// Configured event columns, defaulting to first day column .. last used column.
    pub fn event_columns(sheet: &Sheet, ctx: &ExtractContext) -> RangeInclusive<u32> {
        let scan = ctx.scan();
        let start = scan
            .event_col_start
            .or(ctx.days.first_col())
            .unwrap_or(1);
        let end = scan.event_col_end.unwrap_or(sheet.max_col()).max(start);
        start..=end
    }

    /// Configured first event row, defaulting to the row after the lowest header
    /// (weekday names or column times found in the header window).
    pub fn first_event_row(ctx: &ExtractContext, times: &ColumnTimes) -> u32 {
        let scan = ctx.scan();
        if let Some(row) = scan.first_event_row {
            return row;
        }
        let header_bottom = ctx
            .days
            .last_row()
            .max(scan.time_header_row.unwrap_or(0))
            .max(times.last_header_row());
        header_bottom + 1
    }

    /// Date for one cell: nearby date above it, else the column's current
    /// date, else the latest date seen anywhere.
    fn resolve_date(
        sheet: &Sheet,
        ctx: &ExtractContext,
        dates: &ColumnDates,
        row: u32,
        col: u32,
    ) -> AppResult<NaiveDate> {
        date_up_scan(sheet, row, col, ctx.scan().date_scan_up, ctx.cfg.year)
            .or_else(|e| dates.get(col).or(dates.latest()).ok_or(e))
    }

    /// Time from the column header table, else the nearest time above.
    fn resolve_cell(
        sheet: &Sheet,
        ctx: &ExtractContext,
        times: &ColumnTimes,
        dates: &ColumnDates,
        row: u32,
        col: u32,
    ) -> CellAnchors {
        CellAnchors {
            time: times.get(col).or_else(|| time_up_scan(sheet, row, col)),
            date: Self::resolve_date(sheet, ctx, dates, row, col),
        }
    }
}

impl LayoutStrategy for RowWiseLayout {
    fn name(&self) -> &'static str {
        "row-wise"
    }

    fn detect(&self, _sheet: &Sheet, ctx: &ExtractContext) -> bool {
        !ctx.days.is_empty()
    }

    /// Rebuilds the column tables and replays dates through `row`, as the
    /// top-down scan would have seen them.
    fn anchors(&self, sheet: &Sheet, ctx: &ExtractContext, row: u32, col: u32) -> CellAnchors {
        let times = ColumnTimes::build(sheet, Self::event_columns(sheet, ctx), ctx.scan());
        let mut dates = ColumnDates::new(ctx.cfg.year);
        dates.prime(sheet, row + 1, sheet.max_col());
        Self::resolve_cell(sheet, ctx, &times, &dates, row, col)
    }

    fn extract(&self, sheet: &Sheet, ctx: &ExtractContext) -> AppResult<Vec<ScheduleEvent>> {
        let scan = ctx.scan();
        let columns = Self::event_columns(sheet, ctx);
        let times = ColumnTimes::build(sheet, columns.clone(), scan);
        let first_row = Self::first_event_row(ctx, &times);
        let last_row = scan.last_row(sheet.max_row());

        log::debug!(
            "Row-wise scan: rows {first_row}..={last_row}, columns {columns:?}, {} timed columns",
            times.len()
        );

        let mut dates = ColumnDates::new(ctx.cfg.year);
        dates.prime(sheet, first_row, sheet.max_col());

        let mut events = Vec::new();
        for row in first_row..=last_row {
            dates.observe_row(sheet, row, sheet.max_col());

            for col in columns.clone() {
                let Some(text) = candidate_text(sheet, row, col) else {
                    continue;
                };

                let anchors = Self::resolve_cell(sheet, ctx, &times, &dates, row, col);
                if anchors.time.is_none() {
                    log::debug!("Skipping cell {row},{col}: no time anchor");
                    continue;
                }
                if let Err(e) = &anchors.date {
                    log::debug!("Skipping cell {row},{col}: {e}");
                    continue;
                }

                let Some(anchor) = anchors.resolve(scan.default_duration_minutes) else {
                    continue;
                };

                if let Some(event) = ctx.synth.synthesize(text, anchor, row, col) {
                    events.push(event);
                }
            }
        }

        Ok(events)
    }
}
