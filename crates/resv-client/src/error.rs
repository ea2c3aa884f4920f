//! Reservation client error types.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the reservation client and waiters.
///
/// Nothing in this crate recovers from an error locally; every variant
/// propagates to the caller, which is the only layer expected to assert on
/// or tolerate specific kinds.
#[derive(Error, Debug)]
pub enum ReservationError {
    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not decode as the expected JSON shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a status code the operation did not declare
    /// acceptable
    #[error("unexpected status {got} (expected {expected}): {body}")]
    UnexpectedStatus {
        expected: u16,
        got: u16,
        body: String,
    },

    /// Remote resource is absent (404).
    ///
    /// A genuine error for most operations; the termination waiter treats it
    /// as the success signal.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Authorization rejection (403), surfaced unmodified
    #[error("forbidden: {message}")]
    Forbidden { message: String },

    /// The waited-on resource entered the absorbing ERROR status
    #[error("lease {resource_id} went to ERROR while waiting")]
    LeaseError { resource_id: String },

    /// ERROR observed while waiting for a resource to disappear
    #[error("lease {resource_id} hit ERROR during termination")]
    DeleteError { resource_id: String },

    /// A waiter exhausted its budget without reaching a terminal condition
    #[error("timed out after {waited:?} waiting on {resource_id}")]
    Timeout {
        resource_id: String,
        waited: Duration,
    },

    /// CRUD operation this client tier deliberately does not support
    #[error("operation not supported by this client: {operation}")]
    NotImplemented { operation: &'static str },

    /// Response timestamp did not parse
    #[error("invalid timestamp {value:?}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl ReservationError {
    pub(crate) const fn not_implemented(operation: &'static str) -> Self {
        Self::NotImplemented { operation }
    }

    /// Whether this error means the resource is gone.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether a caller choosing to retry could plausibly succeed.
    ///
    /// The client itself never retries; this exists for callers that layer
    /// their own policy on top.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::UnexpectedStatus {
                    got: 429 | 500..=599,
                    ..
                }
        )
    }
}

/// Result type for reservation operations.
pub type ReservationResult<T> = Result<T, ReservationError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn unexpected(got: u16) -> ReservationError {
        ReservationError::UnexpectedStatus {
            expected: 200,
            got,
            body: String::new(),
        }
    }

    #[test]
    fn retryable_covers_server_side_failures_only() {
        assert!(unexpected(500).is_retryable());
        assert!(unexpected(503).is_retryable());
        assert!(unexpected(429).is_retryable());
        assert!(!unexpected(409).is_retryable());
        assert!(
            !ReservationError::NotFound {
                resource: "/leases/x".into()
            }
            .is_retryable()
        );
        assert!(
            !ReservationError::LeaseError {
                resource_id: "x".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn not_found_predicate() {
        assert!(
            ReservationError::NotFound {
                resource: "/leases/x".into()
            }
            .is_not_found()
        );
        assert!(!unexpected(404).is_not_found());
    }

    #[test]
    fn display_carries_observed_and_expected_codes() {
        let message = unexpected(502).to_string();
        assert!(message.contains("502"));
        assert!(message.contains("200"));
    }
}
