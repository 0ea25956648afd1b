use crate::models::ScheduleEvent;
use serde::{Deserialize, Serialize};

/// Flat event record served as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub start: String, // RFC 3339, zone offset included
    pub end: String,
    pub special: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl EventView {
    pub fn from_event(event: &ScheduleEvent, highlight_color: &str) -> Self {
        Self {
            uid: event.uid.clone(),
            summary: event.summary.clone(),
            description: event.description.clone(),
            start: event.start.to_rfc3339(),
            end: event.end.to_rfc3339(),
            special: event.special,
            color: event.special.then(|| highlight_color.to_string()),
        }
    }
}
