//! Polling waiters for asynchronous service state.
//!
//! The service acknowledges mutations before acting on them, so callers
//! observe progress by re-fetching and inspecting the reported status. The
//! waiters here poll on a fixed cadence and translate terminal statuses into
//! typed errors. Every waiter performs at least one fetch before consulting
//! its deadline, so a zero timeout still yields one status evaluation.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::error::{ReservationError, ReservationResult};

/// Absorbing failure status shared by leases and reservations.
pub const ERROR_STATUS: &str = "ERROR";

/// Anything with a polled lifecycle status.
pub trait HasStatus {
    fn status(&self) -> &str;

    /// Sub-status for resources that expose an in-flight task marker.
    fn task_state(&self) -> Option<&str> {
        None
    }
}

/// Poll until the resource reports one of `targets`.
///
/// `ERROR` short-circuits with [`ReservationError::LeaseError`] unless it is
/// itself listed as a target; tests asserting failure paths wait for `ERROR`
/// deliberately.
///
/// # Errors
///
/// Returns [`ReservationError::LeaseError`] on an unexpected `ERROR` status,
/// [`ReservationError::Timeout`] once the deadline passes, or whatever error
/// the fetch itself produced.
pub async fn wait_for_status<F, Fut, R>(
    resource_id: &str,
    targets: &[&str],
    interval: Duration,
    timeout: Duration,
    fetch: F,
) -> ReservationResult<R>
where
    F: Fn() -> Fut,
    Fut: Future<Output = ReservationResult<R>>,
    R: HasStatus,
{
    let started = Instant::now();
    loop {
        let resource = fetch().await?;
        let status = resource.status();

        if targets.contains(&status) {
            debug!(resource_id, status, "target status reached");
            return Ok(resource);
        }
        if status == ERROR_STATUS {
            return Err(ReservationError::LeaseError {
                resource_id: resource_id.to_string(),
            });
        }
        if started.elapsed() >= timeout {
            return Err(ReservationError::Timeout {
                resource_id: resource_id.to_string(),
                waited: started.elapsed(),
            });
        }

        debug!(resource_id, status, ?targets, "status not reached yet");
        sleep(interval).await;
    }
}

/// Poll until the resource disappears.
///
/// A `404` from the fetch is the success condition. With `ignore_error` set,
/// an `ERROR` status is tolerated while the service finishes tearing the
/// resource down; otherwise it aborts the wait.
///
/// # Errors
///
/// Returns [`ReservationError::DeleteError`] on `ERROR` (unless ignored),
/// [`ReservationError::Timeout`] once the deadline passes, or any non-404
/// fetch error.
pub async fn wait_for_termination<F, Fut, R>(
    resource_id: &str,
    interval: Duration,
    timeout: Duration,
    ignore_error: bool,
    fetch: F,
) -> ReservationResult<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = ReservationResult<R>>,
    R: HasStatus,
{
    let started = Instant::now();
    let mut previous: Option<String> = None;
    loop {
        let resource = match fetch().await {
            Ok(resource) => resource,
            Err(error) if error.is_not_found() => {
                debug!(resource_id, "resource gone");
                return Ok(());
            }
            Err(error) => return Err(error),
        };

        let status = resource.status().to_string();
        if previous.as_deref() != Some(status.as_str()) {
            if let Some(from) = &previous {
                debug!(resource_id, from = from.as_str(), to = status.as_str(), "status transition");
            }
            previous = Some(status.clone());
        }

        if status == ERROR_STATUS && !ignore_error {
            return Err(ReservationError::DeleteError {
                resource_id: resource_id.to_string(),
            });
        }
        if started.elapsed() >= timeout {
            return Err(ReservationError::Timeout {
                resource_id: resource_id.to_string(),
                waited: started.elapsed(),
            });
        }

        sleep(interval).await;
    }
}

/// Poll until the resource reports the given task marker, or lands on one of
/// `failure_statuses`.
///
/// A failure status returns the resource rather than an error: callers use
/// this to inspect scheduling faults on a resource that was never going to
/// reach the marker.
///
/// # Errors
///
/// Returns [`ReservationError::Timeout`] once the deadline passes, or
/// whatever error the fetch itself produced.
pub async fn wait_for_task_marker<F, Fut, R>(
    resource_id: &str,
    marker: &str,
    failure_statuses: &[&str],
    interval: Duration,
    timeout: Duration,
    fetch: F,
) -> ReservationResult<R>
where
    F: Fn() -> Fut,
    Fut: Future<Output = ReservationResult<R>>,
    R: HasStatus,
{
    let started = Instant::now();
    loop {
        let resource = fetch().await?;

        if failure_statuses.contains(&resource.status()) {
            debug!(resource_id, status = resource.status(), "failure status before marker");
            return Ok(resource);
        }
        if resource.task_state() == Some(marker) {
            debug!(resource_id, marker, "task marker reached");
            return Ok(resource);
        }
        if started.elapsed() >= timeout {
            return Err(ReservationError::Timeout {
                resource_id: resource_id.to_string(),
                waited: started.elapsed(),
            });
        }

        sleep(interval).await;
    }
}
