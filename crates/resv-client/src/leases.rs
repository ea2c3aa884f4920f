//! Lease CRUD and lifecycle waits.

use reqwest::StatusCode;

use crate::config::PollingConfig;
use crate::error::ReservationResult;
use crate::rest::RestClient;
use crate::types::{
    Host, HostsEnvelope, Lease, LeaseCreateBody, LeaseEnvelope, LeaseUpdateBody, LeasesEnvelope,
};
use crate::waiter;

const COLLECTION: &str = "/leases";

/// Client for the `/leases` resource family.
#[derive(Debug, Clone)]
pub struct LeasesClient {
    rest: RestClient,
    polling: PollingConfig,
}

impl LeasesClient {
    #[must_use]
    pub fn new(rest: RestClient, polling: PollingConfig) -> Self {
        Self { rest, polling }
    }

    /// `GET /leases`, optionally filtered by query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn list(&self, filters: &[(&str, &str)]) -> ReservationResult<Vec<Lease>> {
        let envelope: LeasesEnvelope = self.rest.get(COLLECTION, filters, StatusCode::OK).await?;
        Ok(envelope.leases)
    }

    /// `GET /leases/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReservationError::NotFound`] for an unknown id.
    pub async fn show(&self, lease_id: &str) -> ReservationResult<Lease> {
        let envelope: LeaseEnvelope = self
            .rest
            .get(&format!("{COLLECTION}/{lease_id}"), &[], StatusCode::OK)
            .await?;
        Ok(envelope.lease)
    }

    /// `POST /leases`. The service answers `201` with the created lease,
    /// typically still `PENDING`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it, e.g.
    /// with a conflict on overlapping reservations.
    pub async fn create(&self, body: &LeaseCreateBody) -> ReservationResult<Lease> {
        let envelope: LeaseEnvelope = self
            .rest
            .post(COLLECTION, body, StatusCode::CREATED)
            .await?;
        Ok(envelope.lease)
    }

    /// `PUT /leases/{id}` with a partial body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn update(&self, lease_id: &str, body: &LeaseUpdateBody) -> ReservationResult<Lease> {
        let envelope: LeaseEnvelope = self
            .rest
            .put(&format!("{COLLECTION}/{lease_id}"), body, StatusCode::OK)
            .await?;
        Ok(envelope.lease)
    }

    /// `DELETE /leases/{id}`. The service echoes the deleted lease back when
    /// it answers `200` with a body.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReservationError::NotFound`] for an unknown id.
    pub async fn delete(&self, lease_id: &str) -> ReservationResult<Option<Lease>> {
        let deleted: Option<LeaseEnvelope> = self
            .rest
            .delete(&format!("{COLLECTION}/{lease_id}"), StatusCode::OK)
            .await?;
        Ok(deleted.map(|envelope| envelope.lease))
    }

    /// `GET /leases/{id}/hosts`: the hosts currently backing the lease's
    /// reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn show_hosts(&self, lease_id: &str) -> ReservationResult<Vec<Host>> {
        let envelope: HostsEnvelope = self
            .rest
            .get(&format!("{COLLECTION}/{lease_id}/hosts"), &[], StatusCode::OK)
            .await?;
        Ok(envelope.hosts)
    }

    /// Poll the lease until it reports one of `targets`.
    ///
    /// # Errors
    ///
    /// See [`waiter::wait_for_status`].
    pub async fn wait_for_status(
        &self,
        lease_id: &str,
        targets: &[&str],
    ) -> ReservationResult<Lease> {
        waiter::wait_for_status(
            lease_id,
            targets,
            self.polling.lease_interval,
            self.polling.lease_end_timeout,
            || self.show(lease_id),
        )
        .await
    }

    /// Poll the lease until the service no longer knows it.
    ///
    /// # Errors
    ///
    /// See [`waiter::wait_for_termination`].
    pub async fn wait_for_termination(
        &self,
        lease_id: &str,
        ignore_error: bool,
    ) -> ReservationResult<()> {
        waiter::wait_for_termination(
            lease_id,
            self.polling.lease_interval,
            self.polling.lease_end_timeout,
            ignore_error,
            || self.show(lease_id),
        )
        .await
    }
}
