use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;
use std::fmt;

/// Time slot of an event. `end` is unknown when a header only carries a start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: Option<NaiveTime>,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn open(start: NaiveTime) -> Self {
        Self { start, end: None }
    }

    /// Fill a missing end with `start + default_minutes`.
    ///
    /// Returns `None` when the computed end would wrap past midnight, since the
    /// slot would no longer satisfy `start < end`.
    pub fn complete(self, default_minutes: u32) -> Option<(NaiveTime, NaiveTime)> {
        match self.end {
            Some(end) if end > self.start => Some((self.start, end)),
            Some(_) => None,
            None => {
                let (end, wrapped) = self
                    .start
                    .overflowing_add_signed(Duration::minutes(i64::from(default_minutes)));
                if wrapped != 0 || end <= self.start {
                    None
                } else {
                    Some((self.start, end))
                }
            }
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}-{}", self.start.format("%H:%M"), end.format("%H:%M")),
            None => write!(f, "{}-?", self.start.format("%H:%M")),
        }
    }
}

/// Date and completed time slot governing one candidate cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedAnchor {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ResolvedAnchor {
    pub fn resolve(date: NaiveDate, time: TimeRange, default_minutes: u32) -> Option<Self> {
        let (start, end) = time.complete(default_minutes)?;
        Some(Self { date, start, end })
    }
}
