//! Form definitions backing the back-office routes.
//!
//! Each form deserializes the raw request and converts into a payload of
//! validated domain values with `TryFrom`; services only ever see payloads.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;
use validator::ValidationErrors;

pub mod auth;
pub mod content;
pub mod enrollments;
pub mod files;
pub mod jobs;
pub mod leads;
pub mod mail;
pub mod reports;
pub mod team;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid url")]
    InvalidUrl,

    #[error("invalid id")]
    InvalidId,

    #[error("invalid status")]
    InvalidStatus,

    #[error("invalid text")]
    InvalidText,

    #[error("invalid date")]
    InvalidDate,

    #[error("invalid time")]
    InvalidTime,

    #[error("nothing selected")]
    EmptySelection,

    #[error("could not read upload: {0}")]
    Upload(String),

    #[error("malformed form data: {0}")]
    Malformed(String),
}

/// Empty or whitespace-only inputs count as "not provided".
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| FormError::InvalidDate)
}

/// Accepts `HH:MM` as sent by `<input type="time">`, with optional seconds.
pub(crate) fn parse_time(value: &str) -> Result<NaiveTime, FormError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| FormError::InvalidTime)
}

/// Accepts `datetime-local` values or a bare date (read as midnight).
pub(crate) fn parse_datetime(value: &str) -> Result<NaiveDateTime, FormError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| parse_date(value).map(|date| date.and_time(NaiveTime::MIN)))
        .map_err(|_| FormError::InvalidDate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_dropped() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some(" x ".into())), Some("x".into()));
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn browser_date_and_time_inputs_parse() {
        assert_eq!(
            parse_time("09:30").expect("time"),
            NaiveTime::from_hms_opt(9, 30, 0).expect("valid")
        );
        assert!(parse_time("9.30").is_err());

        let reminder = parse_datetime("2026-03-01T14:15").expect("datetime");
        assert_eq!(reminder.to_string(), "2026-03-01 14:15:00");
        let midnight = parse_datetime("2026-03-01").expect("date");
        assert_eq!(midnight.to_string(), "2026-03-01 00:00:00");
        assert!(matches!(parse_date("01/03/2026"), Err(FormError::InvalidDate)));
    }
}
