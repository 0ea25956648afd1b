// src/sheet/workbook.rs

use super::{MergedRange, Sheet};
use crate::errors::{AppError, AppResult};
use crate::models::CellValue;
use calamine::{Data, DataType, Reader, Xlsx};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use std::io::Cursor;

/// Parse xlsx bytes and return the selected worksheet as a [`Sheet`].
///
/// - `sheet_name = None` picks the first sheet of the workbook
/// - merged regions are loaded so members resolve to their top-left value
pub fn load_sheet(bytes: &[u8], sheet_name: Option<&str>) -> AppResult<Sheet> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| AppError::Workbook(format!("Failed to open workbook: {e}")))?;

    workbook
        .load_merged_regions()
        .map_err(|e| AppError::Workbook(format!("Failed to load merged regions: {e}")))?;

    let names = workbook.sheet_names();
    let name = match sheet_name {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| AppError::SheetNotFound(wanted.to_string()))?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| AppError::Workbook("Workbook contains no sheets".into()))?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| AppError::Workbook(format!("Failed to read sheet '{name}': {e}")))?;

    let merged = workbook
        .worksheet_merge_cells(&name)
        .unwrap_or(Ok(Vec::new()))
        .unwrap_or_default();

    let mut sheet = Sheet::new(name.as_str());

    // calamine is 0-based and relative to the range start
    let (row0, col0) = range.start().unwrap_or((0, 0));
    for (r, c, data) in range.used_cells() {
        let row = row0 + r as u32 + 1;
        let col = col0 + c as u32 + 1;
        sheet.set(row, col, to_cell_value(data));
    }

    for dim in merged {
        sheet.merge(MergedRange::new(
            dim.start.0 + 1,
            dim.start.1 + 1,
            dim.end.0 + 1,
            dim.end.1 + 1,
        ));
    }

    log::debug!(
        "Loaded sheet '{}': {} cells, {} merged ranges, {}x{}",
        sheet.name(),
        sheet.len(),
        sheet.merged_ranges().len(),
        sheet.max_row(),
        sheet.max_col()
    );

    Ok(sheet)
}

/// Map a calamine cell onto the tagged value used by the extraction engine.
fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Number(if *b { 1.0 } else { 0.0 }),
        Data::DateTimeIso(s) => parse_iso(s).unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DateTime(_) => match data.as_datetime() {
            Some(dt) => from_datetime(dt),
            None => CellValue::Number(data.as_f64().unwrap_or_default()),
        },
        _ => CellValue::Empty,
    }
}

/// Serials below 1 land on the 1899-12-30/31 epoch: those cells hold a time
/// of day, not a date.
fn from_datetime(dt: NaiveDateTime) -> CellValue {
    if dt.year() < 1900 {
        CellValue::Time(dt.time())
    } else if dt.time() == NaiveTime::MIN {
        CellValue::Date(dt.date())
    } else {
        CellValue::DateTime(dt)
    }
}

fn parse_iso(s: &str) -> Option<CellValue> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(CellValue::Date(d));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(from_datetime)
        .or_else(|| {
            ["%H:%M:%S", "%H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
                .map(CellValue::Time)
        })
}
