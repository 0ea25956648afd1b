use chrono::DateTime;
use chrono_tz::Tz;

/// One timetable entry synthesized from a sheet cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEvent {
    pub uid: String,
    pub summary: String,
    pub description: String, // empty when the cell had a single line
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub special: bool,
    pub row: u32, // ⇔ source cell (1-based)
    pub col: u32,
}

impl ScheduleEvent {
    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }

    pub fn date_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        format!(
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}
