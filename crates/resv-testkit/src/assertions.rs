//! Panic-with-context checks over the client's error taxonomy.
//!
//! Each helper states what it expected and prints the actual error on
//! failure, so a broken test names the divergence instead of a bare `false`.

use resv_client::ReservationError;

/// # Panics
///
/// Panics unless the error is `NotFound`.
pub fn assert_not_found(error: &ReservationError) {
    assert!(error.is_not_found(), "expected NotFound, got {error:?}");
}

/// # Panics
///
/// Panics unless the error is `Forbidden`.
pub fn assert_forbidden(error: &ReservationError) {
    match error {
        ReservationError::Forbidden { .. } => {}
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

/// # Panics
///
/// Panics unless the error is `NotImplemented`.
pub fn assert_not_implemented(error: &ReservationError) {
    match error {
        ReservationError::NotImplemented { .. } => {}
        other => panic!("expected NotImplemented, got {other:?}"),
    }
}

/// # Panics
///
/// Panics unless the error is `UnexpectedStatus` carrying `got`.
pub fn assert_unexpected_status(error: &ReservationError, got: u16) {
    match error {
        ReservationError::UnexpectedStatus { got: actual, .. } if *actual == got => {}
        other => panic!("expected UnexpectedStatus with {got}, got {other:?}"),
    }
}

/// # Panics
///
/// Panics unless the error is `Timeout`.
pub fn assert_timeout(error: &ReservationError) {
    match error {
        ReservationError::Timeout { .. } => {}
        other => panic!("expected Timeout, got {other:?}"),
    }
}

/// # Panics
///
/// Panics unless the error is `LeaseError` for the given resource.
pub fn assert_lease_error(error: &ReservationError, resource_id: &str) {
    match error {
        ReservationError::LeaseError { resource_id: actual } if actual == resource_id => {}
        other => panic!("expected LeaseError on {resource_id}, got {other:?}"),
    }
}

/// # Panics
///
/// Panics unless the error is `DeleteError` for the given resource.
pub fn assert_delete_error(error: &ReservationError, resource_id: &str) {
    match error {
        ReservationError::DeleteError { resource_id: actual } if actual == resource_id => {}
        other => panic!("expected DeleteError on {resource_id}, got {other:?}"),
    }
}
