use chrono::NaiveDate;

use crate::{Error, Result};

/// Wire format of all membership dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in local time.
///
/// Read this once at the edge and pass it down; nothing
/// in this crate looks at the clock by itself.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date. A trailing time component
/// (`2024-01-31T18:00:00`) is accepted and ignored.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let date = match (trimmed.get(..10), trimmed.get(10..)) {
        (Some(date), Some(rest)) if rest.starts_with(['T', ' ']) => date,
        _ => trimmed,
    };
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| Error::MalformedDate {
        field,
        value: value.to_string(),
    })
}

/// Count the days from one date to another.
/// Dates carry no time of day, so the difference is always
/// a whole number of days and negative if `other` lies before.
pub trait CountDays {
    fn count_days(&self, other: &Self) -> i64;
}

impl CountDays for NaiveDate {
    fn count_days(&self, other: &Self) -> i64 {
        other.signed_duration_since(*self).num_days()
    }
}

/// Signed number of days left until `expiry`, as seen from `today`.
pub fn days_remaining(today: NaiveDate, expiry: NaiveDate) -> i64 {
    today.count_days(&expiry)
}
