//! Scenario plumbing: named leases, tracked cleanup, recorded operations.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::Rng;
use resv_client::{
    Allocation, Lease, LeaseCreateBody, ReservationClient, ReservationError, ReservationRequest,
    ReservationResult, lease_status, times,
};
use tracing::{debug, warn};

/// Start of a reservation window no test environment will ever reach.
pub const FAR_FUTURE_START: &str = "2050-12-26 12:00";
/// End of that window.
pub const FAR_FUTURE_END: &str = "2050-12-27 12:00";

/// Random resource name with a fixed prefix, e.g. `lease-3f2a9c01`.
#[must_use]
pub fn rand_name(prefix: &str) -> String {
    let suffix: u32 = rand::thread_rng().r#gen();
    format!("{prefix}-{suffix:08x}")
}

/// Lease request parked in the far future, safe to create without ever
/// becoming active.
#[must_use]
pub fn far_future_lease(prefix: &str, reservations: Vec<ReservationRequest>) -> LeaseCreateBody {
    LeaseCreateBody::new(rand_name(prefix), FAR_FUTURE_START, FAR_FUTURE_END)
        .with_reservations(reservations)
}

/// Lease request starting now and ending `minutes` from now, for tests that
/// need the lease to actually run.
#[must_use]
pub fn lease_for_next_minutes(
    prefix: &str,
    minutes: i64,
    reservations: Vec<ReservationRequest>,
) -> LeaseCreateBody {
    let (start, end) = times::window_from_now(minutes);
    LeaseCreateBody::new(rand_name(prefix), start, end).with_reservations(reservations)
}

/// Scan host allocations for the one backing a reservation.
///
/// The service does not link reservations to resources directly; the owning
/// resource is found by scanning the collection's allocation windows.
///
/// # Errors
///
/// Returns an error if the allocation listing itself fails.
pub async fn find_host_allocation(
    client: &ReservationClient,
    reservation_id: &str,
) -> ReservationResult<Option<Allocation>> {
    let allocations = client.hosts().list_allocations(&[]).await?;
    Ok(allocations
        .into_iter()
        .find(|allocation| allocation.holds_reservation(reservation_id)))
}

/// One step of a scenario, kept for post-mortem inspection.
#[derive(Debug, Clone)]
pub struct RecordedOperation {
    pub operation: String,
    pub target: String,
    pub result: Result<(), String>,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}

/// Drives a scenario against one client and cleans up what it created.
///
/// Leases created (or adopted) through the context are deleted in reverse
/// order on [`teardown`](Self::teardown); a lease that already vanished is
/// not an error.
pub struct ScenarioContext {
    client: ReservationClient,
    tracked: Vec<String>,
    operations: Vec<RecordedOperation>,
}

impl ScenarioContext {
    #[must_use]
    pub fn new(client: ReservationClient) -> Self {
        Self {
            client,
            tracked: Vec::new(),
            operations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn client(&self) -> &ReservationClient {
        &self.client
    }

    /// Create a lease and track it for teardown.
    ///
    /// # Errors
    ///
    /// Returns the creation error; nothing is tracked on failure.
    pub async fn create_lease(&mut self, body: &LeaseCreateBody) -> ReservationResult<Lease> {
        let leases = self.client.leases();
        let name = body.name.clone();
        let result = self.record("create lease", &name, leases.create(body)).await;
        if let Ok(lease) = &result {
            debug!(lease_id = lease.id.as_str(), name = name.as_str(), "lease created");
            self.tracked.push(lease.id.clone());
        }
        result
    }

    /// Adopt a lease created elsewhere so teardown removes it too.
    pub fn track_lease(&mut self, lease_id: impl Into<String>) {
        self.tracked.push(lease_id.into());
    }

    /// Poll the lease until `ACTIVE`.
    ///
    /// # Errors
    ///
    /// See [`resv_client::waiter::wait_for_status`].
    pub async fn wait_active(&mut self, lease_id: &str) -> ReservationResult<Lease> {
        let leases = self.client.leases();
        self.record(
            "wait for ACTIVE",
            lease_id,
            leases.wait_for_status(lease_id, &[lease_status::ACTIVE]),
        )
        .await
    }

    /// Delete every tracked lease, newest first.
    ///
    /// Leases the service no longer knows are skipped silently. All tracked
    /// leases are attempted even after a failure.
    ///
    /// # Errors
    ///
    /// Returns the first non-404 error encountered, after finishing the
    /// remaining deletions.
    pub async fn teardown(&mut self) -> ReservationResult<()> {
        let mut first_error: Option<ReservationError> = None;
        let tracked = std::mem::take(&mut self.tracked);

        for lease_id in tracked.iter().rev() {
            let leases = self.client.leases();
            let outcome = self
                .record("teardown lease", lease_id, async {
                    match leases.delete(lease_id).await {
                        Err(error) if error.is_not_found() => {
                            debug!(lease_id = lease_id.as_str(), "lease already gone");
                            return Ok(());
                        }
                        Err(error) => return Err(error),
                        Ok(_) => {}
                    }
                    leases.wait_for_termination(lease_id, true).await
                })
                .await;

            if let Err(error) = outcome {
                warn!(lease_id = lease_id.as_str(), %error, "teardown failed");
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Everything the context has done so far, oldest first.
    #[must_use]
    pub fn operations(&self) -> &[RecordedOperation] {
        &self.operations
    }

    /// # Panics
    ///
    /// Panics if no operation ran yet or the latest one failed.
    pub fn assert_last_success(&self) {
        match self.operations.last() {
            Some(op) => {
                if let Err(error) = &op.result {
                    panic!("operation {:?} on {:?} failed: {error}", op.operation, op.target);
                }
            }
            None => panic!("no operations recorded"),
        }
    }

    async fn record<T>(
        &mut self,
        operation: &str,
        target: &str,
        fut: impl Future<Output = ReservationResult<T>>,
    ) -> ReservationResult<T> {
        let start = Instant::now();
        let result = fut.await;
        self.operations.push(RecordedOperation {
            operation: operation.to_string(),
            target: target.to_string(),
            result: match &result {
                Ok(_) => Ok(()),
                Err(error) => Err(error.to_string()),
            },
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            timestamp: Utc::now(),
        });
        result
    }
}
