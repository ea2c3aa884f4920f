//! Timestamp handling for the reservation API.
//!
//! The service speaks two formats. Requests carry minute-precision local
//! strings (`2050-12-26 12:00`), with the literal `"now"` accepted as a
//! start date meaning "immediately". Responses come back as ISO-8601 with
//! microseconds (`2050-12-26T12:00:00.000000`). Callers comparing the two
//! must normalize; the helpers here do that.

use chrono::{NaiveDateTime, Utc};

use crate::error::{ReservationError, ReservationResult};

/// Minute-precision format used in request bodies.
pub const REQUEST_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Microsecond ISO-8601 format returned by the service.
pub const RESPONSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Start-date sentinel meaning "start the lease immediately".
pub const START_NOW: &str = "now";

/// Format a timestamp for a request body.
#[must_use]
pub fn format_request(at: NaiveDateTime) -> String {
    at.format(REQUEST_FORMAT).to_string()
}

/// Parse a request-format timestamp (`YYYY-MM-DD HH:MM`).
///
/// # Errors
///
/// Returns [`ReservationError::InvalidDate`] if the value does not match
/// the request format.
pub fn parse_request(value: &str) -> ReservationResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, REQUEST_FORMAT).map_err(|source| {
        ReservationError::InvalidDate {
            value: value.to_owned(),
            source,
        }
    })
}

/// Parse a response timestamp (ISO-8601, with or without fractional seconds).
///
/// # Errors
///
/// Returns [`ReservationError::InvalidDate`] if the value does not match
/// the response format.
pub fn parse_response(value: &str) -> ReservationResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, RESPONSE_FORMAT).map_err(|source| {
        ReservationError::InvalidDate {
            value: value.to_owned(),
            source,
        }
    })
}

/// Build a `("now", end)` request window ending the given number of minutes
/// from the current time.
#[must_use]
pub fn window_from_now(minutes: i64) -> (String, String) {
    let end = Utc::now().naive_utc() + chrono::Duration::minutes(minutes);
    (START_NOW.to_owned(), format_request(end))
}

/// Whether two timestamps fall within the same calendar minute.
///
/// The service stores request dates at minute precision but reports them
/// back with microseconds, so equality checks have to truncate.
#[must_use]
pub fn same_minute(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.format(REQUEST_FORMAT).to_string() == b.format(REQUEST_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_format_parses_with_microseconds() {
        let parsed = parse_response("2050-12-26T12:00:00.000000").unwrap();
        assert_eq!(format_request(parsed), "2050-12-26 12:00");
    }

    #[test]
    fn response_format_parses_without_fraction() {
        let parsed = parse_response("2050-12-26T12:00:00").unwrap();
        assert_eq!(format_request(parsed), "2050-12-26 12:00");
    }

    #[test]
    fn request_format_round_trips() {
        let parsed = parse_request("2050-12-27 09:30").unwrap();
        assert_eq!(format_request(parsed), "2050-12-27 09:30");
    }

    #[test]
    fn rejects_wrong_format() {
        let err = parse_response("2050-12-26 12:00").unwrap_err();
        assert!(matches!(err, ReservationError::InvalidDate { .. }));
        assert!(parse_request("not a date").is_err());
    }

    #[test]
    fn window_starts_at_the_sentinel() {
        let (start, end) = window_from_now(10);
        assert_eq!(start, START_NOW);
        // the end must be a valid request-format timestamp
        parse_request(&end).unwrap();
    }

    #[test]
    fn same_minute_truncates_seconds() {
        let a = parse_response("2050-12-26T12:00:01.000000").unwrap();
        let b = parse_response("2050-12-26T12:00:59.999999").unwrap();
        let c = parse_response("2050-12-26T12:01:00.000000").unwrap();
        assert!(same_minute(a, b));
        assert!(!same_minute(b, c));
    }
}
