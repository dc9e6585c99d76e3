//! Date range for filtering events.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{EventlyError, EventlyResult};

/// Inclusive date range. The range only filters when both bounds are set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        DateRange {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Parse optional YYYY-MM-DD bounds. Empty strings count as unset.
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> EventlyResult<Self> {
        Ok(DateRange {
            from: parse_bound(from)?,
            to: parse_bound(to)?,
        })
    }

    pub fn is_active(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    /// Whether an event date string falls inside the range. Always true when
    /// the range is inactive; never true for an unparseable date otherwise.
    pub fn contains(&self, date: &str) -> bool {
        let (Some(from), Some(to)) = (self.from, self.to) else {
            return true;
        };

        match parse_event_date(date) {
            Some(d) => d >= from && d <= to,
            None => false,
        }
    }
}

fn parse_bound(s: Option<&str>) -> EventlyResult<Option<NaiveDate>> {
    match s.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                EventlyError::Validation(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
            }),
    }
}

/// Parse the calendar date of an event's `date` field.
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` and RFC 3339.
pub fn parse_event_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}
