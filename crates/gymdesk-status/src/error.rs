use chrono::NaiveDate;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A date field could not be read as a calendar date.
    #[error("Malformed {field} date: {value:?}")]
    MalformedDate { field: &'static str, value: String },
    #[error("Adding {months} months to {date} leaves the calendar range")]
    DateOutOfRange { date: NaiveDate, months: u32 },
}
