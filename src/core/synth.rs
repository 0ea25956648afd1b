//! Event synthesizer: turn a candidate cell's text plus its anchors into a
//! [`ScheduleEvent`].

use crate::config::{Config, Vocabulary};
use crate::core::tokens::is_header_only;
use crate::errors::AppResult;
use crate::models::{ResolvedAnchor, ScheduleEvent};
use crate::sheet::Sheet;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

// Authors use wide gaps instead of explicit line breaks.
static WIDE_GAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{3,}").expect("valid gap regex"));

static NUMERIC_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:[.,]\d+)?$").expect("valid numeric regex"));

/// Summary and description split out of a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellText {
    pub summary: String,
    pub description: Vec<String>,
}

impl CellText {
    pub fn description_text(&self) -> String {
        self.description.join("\n")
    }
}

/// Collapse runs of three or more whitespace characters into line breaks.
pub fn normalize(text: &str) -> String {
    WIDE_GAP_RE.replace_all(text, "\n").into_owned()
}

/// Split raw cell text into summary/description and promote key markers.
///
/// Returns `None` when the text has no non-empty line.
pub fn split_cell_text(text: &str, vocabulary: &Vocabulary) -> Option<CellText> {
    let normalized = normalize(text);
    let mut lines = normalized
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string);

    let mut summary = lines.next()?;
    let mut description: Vec<String> = lines.filter(|l| !NUMERIC_LINE_RE.is_match(l)).collect();

    if vocabulary.is_key_marker(&summary) && !description.is_empty() {
        let first = description.remove(0);
        summary = format!("{summary} — {first}");
    }

    Some(CellText {
        summary,
        description,
    })
}

/// `{prefix}{YYYY-MM-DD}-{HHMM}-{uuid5(summary)}`
pub fn make_uid(prefix: &str, date: NaiveDate, start: NaiveTime, summary: &str) -> String {
    format!(
        "{}{}-{:02}{:02}-{}",
        prefix,
        date.format("%Y-%m-%d"),
        start.hour(),
        start.minute(),
        Uuid::new_v5(&Uuid::NAMESPACE_DNS, summary.as_bytes())
    )
}

/// Text of a cell eligible to become an event, or `None` when it must be skipped.
///
/// Skipped: merge-interior cells, blank or non-text values, and header-only
/// text (weekday names, lone times or time ranges, dates).
pub fn candidate_text(sheet: &Sheet, row: u32, col: u32) -> Option<&str> {
    if !sheet.is_top_left(row, col) {
        return None;
    }
    let value = sheet.cell_value(row, col);
    if value.is_blank() {
        return None;
    }
    let text = value.as_text()?;
    if is_header_only(text) {
        return None;
    }
    Some(text)
}

/// Builds events with the configured zone, identifier prefix and vocabulary.
#[derive(Debug, Clone)]
pub struct Synthesizer<'a> {
    tz: Tz,
    uid_prefix: &'a str,
    vocabulary: &'a Vocabulary,
}

impl<'a> Synthesizer<'a> {
    pub fn new(cfg: &'a Config) -> AppResult<Self> {
        Ok(Self {
            tz: cfg.tz()?,
            uid_prefix: &cfg.uid_prefix,
            vocabulary: &cfg.vocabulary,
        })
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    fn instant(&self, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Tz>> {
        self.tz.from_local_datetime(&date.and_time(time)).earliest()
    }

    pub fn synthesize(
        &self,
        text: &str,
        anchor: ResolvedAnchor,
        row: u32,
        col: u32,
    ) -> Option<ScheduleEvent> {
        let parts = split_cell_text(text, self.vocabulary)?;
        let description = parts.description_text();

        let (Some(start), Some(end)) = (
            self.instant(anchor.date, anchor.start),
            self.instant(anchor.date, anchor.end),
        ) else {
            log::warn!(
                "Skipping cell {row},{col}: local time {} {}-{} does not exist in {}",
                anchor.date,
                anchor.start,
                anchor.end,
                self.tz
            );
            return None;
        };

        let special = self.vocabulary.is_special(&parts.summary, &description);
        let uid = make_uid(self.uid_prefix, anchor.date, anchor.start, &parts.summary);

        Some(ScheduleEvent {
            uid,
            summary: parts.summary,
            description,
            start,
            end,
            special,
            row,
            col,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;
    use crate::sheet::MergedRange;

    fn cfg() -> Config {
        Config::from_yaml("public_link: x\nyear: 2025\nuid_prefix: \"ivt-\"\n").unwrap()
    }

    fn anchor() -> ResolvedAnchor {
        ResolvedAnchor {
            date: NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn wide_gaps_become_line_breaks() {
        let parts = split_cell_text("Математика    ауд. 101", &Vocabulary::default()).unwrap();
        assert_eq!(parts.summary, "Математика");
        assert_eq!(parts.description, vec!["ауд. 101"]);
    }

    #[test]
    fn numeric_only_lines_are_dropped() {
        let parts =
            split_cell_text("Физика\n  101 \nдоц. Петров\n2,5", &Vocabulary::default()).unwrap();
        assert_eq!(parts.description, vec!["доц. Петров"]);
    }

    #[test]
    fn key_marker_folds_next_line() {
        let parts = split_cell_text("начало\nпара 3\nауд. 5", &Vocabulary::default()).unwrap();
        assert_eq!(parts.summary, "начало — пара 3");
        assert_eq!(parts.description, vec!["ауд. 5"]);
    }

    #[test]
    fn lone_key_marker_stays_as_is() {
        let parts = split_cell_text("Экзамен", &Vocabulary::default()).unwrap();
        assert_eq!(parts.summary, "Экзамен");
        assert!(parts.description.is_empty());
    }

    #[test]
    fn blank_text_has_no_parts() {
        assert_eq!(split_cell_text(" \n\t ", &Vocabulary::default()), None);
    }

    #[test]
    fn uid_is_deterministic_and_summary_sensitive() {
        let a = anchor();
        let u1 = make_uid("p-", a.date, a.start, "Математика");
        let u2 = make_uid("p-", a.date, a.start, "Математика");
        let u3 = make_uid("p-", a.date, a.start, "Физика");
        assert_eq!(u1, u2);
        assert_ne!(u1, u3);
        assert!(u1.starts_with("p-2025-09-03-0900-"));
    }

    #[test]
    fn synthesize_builds_zoned_event() {
        let cfg = cfg();
        let synth = Synthesizer::new(&cfg).unwrap();
        let ev = synth
            .synthesize("Математика\nауд. 101", anchor(), 5, 2)
            .unwrap();
        assert_eq!(ev.summary, "Математика");
        assert_eq!(ev.description, "ауд. 101");
        assert_eq!(ev.start.to_rfc3339(), "2025-09-03T09:00:00+03:00");
        assert_eq!(ev.end.to_rfc3339(), "2025-09-03T10:30:00+03:00");
        assert!(!ev.special);
        assert!(ev.uid.starts_with("ivt-2025-09-03-0900-"));
    }

    #[test]
    fn exam_anywhere_marks_special() {
        let cfg = cfg();
        let synth = Synthesizer::new(&cfg).unwrap();
        let ev = synth
            .synthesize("Физика\nконсультация, экзамен в 14", anchor(), 5, 2)
            .unwrap();
        assert!(ev.special);
    }

    #[test]
    fn candidate_text_filters_headers_merges_and_numbers() {
        let mut sheet = Sheet::new("t");
        sheet.set_text(1, 2, "понедельник");
        sheet.set_text(2, 2, "9:00-10:30");
        sheet.set(3, 2, CellValue::Number(42.0));
        sheet.set_text(4, 2, "Химия");
        sheet.merge(MergedRange::new(4, 2, 5, 2));
        sheet.set_text(6, 2, "   ");

        assert_eq!(candidate_text(&sheet, 1, 2), None);
        assert_eq!(candidate_text(&sheet, 2, 2), None);
        assert_eq!(candidate_text(&sheet, 3, 2), None);
        assert_eq!(candidate_text(&sheet, 4, 2), Some("Химия"));
        assert_eq!(candidate_text(&sheet, 5, 2), None);
        assert_eq!(candidate_text(&sheet, 6, 2), None);
    }
}
