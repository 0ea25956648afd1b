use super::{CellAnchors, ExtractContext, LayoutStrategy};
use crate::config::ScanConfig;
use crate::core::anchors::date_up_scan;
use crate::core::synth::candidate_text;
use crate::core::tokens::parse_time_range;
use crate::errors::AppResult;
use crate::models::{ResolvedAnchor, ScheduleEvent, TimeRange};
use crate::sheet::Sheet;
use std::collections::BTreeMap;

/// Day columns × time rows; the time range of each row lives in column A.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicLayout;

const TIME_COLUMN: u32 = 1;

impl ClassicLayout {
    /// Rows whose column-A text carries a time range.
    pub fn time_rows(sheet: &Sheet, scan: &ScanConfig) -> BTreeMap<u32, TimeRange> {
        (1..=scan.last_row(sheet.max_row()))
            .filter_map(|row| {
                let text = sheet.cell_value(row, TIME_COLUMN).as_text()?;
                parse_time_range(text).map(|slot| (row, slot))
            })
            .collect()
    }
}

impl LayoutStrategy for ClassicLayout {
    fn name(&self) -> &'static str {
        "classic"
    }

    fn detect(&self, sheet: &Sheet, ctx: &ExtractContext) -> bool {
        !Self::time_rows(sheet, ctx.scan()).is_empty()
    }

    fn anchors(&self, sheet: &Sheet, ctx: &ExtractContext, row: u32, col: u32) -> CellAnchors {
        let scan = ctx.scan();
        CellAnchors {
            time: sheet
                .cell_value(row, TIME_COLUMN)
                .as_text()
                .and_then(parse_time_range),
            date: date_up_scan(sheet, row, col, scan.date_scan_up, ctx.cfg.year),
        }
    }

    fn extract(&self, sheet: &Sheet, ctx: &ExtractContext) -> AppResult<Vec<ScheduleEvent>> {
        let scan = ctx.scan();
        let mut events = Vec::new();

        for row in Self::time_rows(sheet, scan).into_keys() {
            for col in ctx.days.columns() {
                let Some(text) = candidate_text(sheet, row, col) else {
                    continue;
                };

                let anchors = self.anchors(sheet, ctx, row, col);
                let date = match anchors.date {
                    Ok(date) => date,
                    Err(e) if scan.strict_dates => return Err(e),
                    Err(e) => {
                        log::warn!("Skipping cell {row},{col}: {e}");
                        continue;
                    }
                };

                let Some(anchor) = anchors
                    .time
                    .and_then(|slot| ResolvedAnchor::resolve(date, slot, scan.default_duration_minutes))
                else {
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
