//! Minimal HTML page listing the events of a feed, grouped by day.

use crate::models::ScheduleEvent;
use chrono::Datelike;
use std::fmt::Write;

const WEEKDAYS_SHORT: [&str; 7] = ["пн", "вт", "ср", "чт", "пт", "сб", "вс"];

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Events flattened to table cells: time, summary, description.
fn events_to_rows(events: &[&ScheduleEvent]) -> Vec<[String; 3]> {
    events
        .iter()
        .map(|e| {
            [
                e.time_str(),
                escape(&e.summary),
                escape(&e.description).replace('\n', "<br>"),
            ]
        })
        .collect()
}

pub fn render_preview(title: &str, events: &[ScheduleEvent], highlight_color: &str) -> String {
    let mut html = String::new();
    let title = escape(title);

    // writing into a String cannot fail
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"ru\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n\
         body {{ font-family: sans-serif; margin: 2em; }}\n\
         table {{ border-collapse: collapse; margin-bottom: 1.5em; }}\n\
         td, th {{ border: 1px solid #ccc; padding: 4px 8px; vertical-align: top; }}\n\
         tr.special td {{ color: {color}; font-weight: bold; }}\n\
         </style>\n</head>\n<body>\n<h1>{title}</h1>\n\
         <p><a href=\"/schedule.ics\">schedule.ics</a> · {count} events</p>\n",
        color = escape(highlight_color),
        count = events.len(),
    );

    if events.is_empty() {
        html.push_str("<p>No events.</p>\n");
    }

    let mut day_start = 0;
    while day_start < events.len() {
        let day = events[day_start].date_str();
        let day_end = events[day_start..]
            .iter()
            .position(|e| e.date_str() != day)
            .map_or(events.len(), |n| day_start + n);
        let group: Vec<&ScheduleEvent> = events[day_start..day_end].iter().collect();

        let _ = write!(
            html,
            "<h2>{day} ({weekday})</h2>\n<table>\n",
            weekday = WEEKDAYS_SHORT[events[day_start].start.weekday().num_days_from_monday() as usize]
        );
        for (event, [time, summary, description]) in group.iter().zip(events_to_rows(&group)) {
            let class = if event.special { " class=\"special\"" } else { "" };
            let _ = writeln!(
                html,
                "<tr{class}><td>{time}</td><td>{summary}</td><td>{description}</td></tr>"
            );
        }
        html.push_str("</table>\n");

        day_start = day_end;
    }

    html.push_str("</body>\n</html>\n");
    html
}
