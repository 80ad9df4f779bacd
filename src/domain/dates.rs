use crate::domain::error::DomainError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses a calendar date, dropping any time-of-day component.
///
/// Accepts `2024-01-31`, RFC 3339 timestamps (the date is taken in the
/// timestamp's own offset) and offset-less `2024-01-31T08:30:00`.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, DomainError> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(local) = NaiveDateTime::parse_from_str(raw, LOCAL_DATETIME_FORMAT) {
        return Ok(local.date());
    }

    Err(DomainError::Validation(format!("Invalid date: {:?}", raw)))
}
