//! Feed assembler: one pass over a sheet produces the events and the
//! serialized calendar together.

use crate::config::Config;
use crate::core::layout::{ExtractContext, select_layout};
use crate::errors::AppResult;
use crate::export::ics::render_calendar;
use crate::export::json::EventView;
use crate::models::ScheduleEvent;
use crate::sheet::{Sheet, load_sheet};
use crate::source::WorkbookSource;

/// A complete, immutable feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    pub events: Vec<ScheduleEvent>,
    pub ics: String,
}

impl Feed {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// JSON-ready view of the same events the calendar was rendered from.
    pub fn to_json_view(&self, highlight_color: &str) -> Vec<EventView> {
        self.events
            .iter()
            .map(|e| EventView::from_event(e, highlight_color))
            .collect()
    }
}

/// Detect the layout and extract events in iteration order.
///
/// A sheet without weekday headers yields no events.
pub fn extract_events(sheet: &Sheet, cfg: &Config) -> AppResult<Vec<ScheduleEvent>> {
    let ctx = ExtractContext::new(sheet, cfg)?;

    let Some(layout) = select_layout(sheet, &ctx) else {
        log::info!("No weekday headers found on sheet '{}'", sheet.name());
        return Ok(Vec::new());
    };

    log::debug!(
        "Sheet '{}': {} layout, {} day columns",
        sheet.name(),
        layout.name(),
        ctx.days.len()
    );

    let events = layout.extract(sheet, &ctx)?;
    log::info!("Extracted {} events from sheet '{}'", events.len(), sheet.name());
    Ok(events)
}

pub fn build_feed(sheet: &Sheet, cfg: &Config) -> AppResult<Feed> {
    let events = extract_events(sheet, cfg)?;
    let ics = render_calendar(&events, cfg)?;
    Ok(Feed { events, ics })
}

/// Retrieve the workbook and load the configured sheet.
pub fn fetch_sheet(source: &dyn WorkbookSource, cfg: &Config) -> AppResult<Sheet> {
    log::info!("Fetching workbook from {}", source.describe());
    let bytes = source.fetch()?;
    load_sheet(&bytes, cfg.sheet_name.as_deref())
}

/// Full pipeline: retrieve, parse, extract, render.
pub fn fetch_feed(source: &dyn WorkbookSource, cfg: &Config) -> AppResult<Feed> {
    let sheet = fetch_sheet(source, cfg)?;
    build_feed(&sheet, cfg)
}
