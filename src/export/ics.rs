//! iCalendar serialization of a list of events.

use crate::config::Config;
use crate::errors::AppResult;
use crate::models::ScheduleEvent;
use icalendar::{Calendar, Component, Event, Property};

pub const PRODID: &str = "-//schedics//";
const LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";

fn zoned_property(key: &str, value: &str, tzid: &str) -> Property {
    let mut prop = Property::new(key, value);
    prop.add_parameter("TZID", tzid);
    prop
}

fn to_vevent(event: &ScheduleEvent, cfg: &Config) -> Event {
    let mut vevent = Event::new();
    vevent.uid(&event.uid);
    vevent.summary(&event.summary);
    if event.has_description() {
        vevent.description(&event.description);
    }

    vevent.append_property(zoned_property(
        "DTSTART",
        &event.start.format(LOCAL_FORMAT).to_string(),
        &cfg.timezone,
    ));
    vevent.append_property(zoned_property(
        "DTEND",
        &event.end.format(LOCAL_FORMAT).to_string(),
        &cfg.timezone,
    ));

    if event.special {
        vevent.add_property("COLOR", &cfg.highlight_color);
        vevent.add_property("CATEGORIES", "highlight");
    }

    vevent.done()
}

/// Render all events, in order, as one VCALENDAR document.
pub fn render_calendar(events: &[ScheduleEvent], cfg: &Config) -> AppResult<String> {
    let mut calendar = Calendar::empty();
    calendar.append_property(Property::new("VERSION", "2.0"));
    calendar.append_property(Property::new("PRODID", PRODID));
    calendar.append_property(Property::new("CALSCALE", "GREGORIAN"));
    calendar.append_property(Property::new("X-WR-TIMEZONE", cfg.timezone.as_str()));

    for event in events {
        calendar.push(to_vevent(event, cfg));
    }

    Ok(calendar.to_string())
}
