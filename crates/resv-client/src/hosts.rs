//! Physical host inventory, allocations, and schedulable properties.

use reqwest::StatusCode;

use crate::error::{ReservationError, ReservationResult};
use crate::rest::RestClient;
use crate::types::{
    Allocation, AllocationEnvelope, AllocationsEnvelope, Host, HostEnvelope, HostsEnvelope,
    ResourcePropertiesEnvelope, ResourceProperty,
};

const COLLECTION: &str = "/os-hosts";

/// Client for the `/os-hosts` resource family.
///
/// Inventory mutation is an operator concern; this client only reads. The
/// mutating methods exist so callers get a typed refusal instead of a
/// surprising `403` round trip.
#[derive(Debug, Clone)]
pub struct HostsClient {
    rest: RestClient,
}

impl HostsClient {
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// `GET /os-hosts`, optionally filtered by query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn list(&self, filters: &[(&str, &str)]) -> ReservationResult<Vec<Host>> {
        let envelope: HostsEnvelope = self.rest.get(COLLECTION, filters, StatusCode::OK).await?;
        Ok(envelope.hosts)
    }

    /// `GET /os-hosts/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::NotFound`] for an unknown id.
    pub async fn show(&self, host_id: &str) -> ReservationResult<Host> {
        let envelope: HostEnvelope = self
            .rest
            .get(&format!("{COLLECTION}/{host_id}"), &[], StatusCode::OK)
            .await?;
        Ok(envelope.host)
    }

    /// `GET /os-hosts/allocations`: reservation windows across every host.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn list_allocations(
        &self,
        filters: &[(&str, &str)],
    ) -> ReservationResult<Vec<Allocation>> {
        let envelope: AllocationsEnvelope = self
            .rest
            .get(&format!("{COLLECTION}/allocations"), filters, StatusCode::OK)
            .await?;
        Ok(envelope.allocations)
    }

    /// `GET /os-hosts/{id}/allocation`: reservation windows on one host.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::NotFound`] for an unknown id.
    pub async fn show_allocation(&self, host_id: &str) -> ReservationResult<Allocation> {
        let envelope: AllocationEnvelope = self
            .rest
            .get(
                &format!("{COLLECTION}/{host_id}/allocation"),
                &[],
                StatusCode::OK,
            )
            .await?;
        Ok(envelope.allocation)
    }

    /// `GET /os-hosts/properties`.
    ///
    /// The default view carries property names only. `detail` adds the
    /// `private`, `values`, and `is_unique` fields; `all` includes private
    /// properties in the listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn list_properties(
        &self,
        detail: bool,
        all: bool,
    ) -> ReservationResult<Vec<ResourceProperty>> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if detail {
            query.push(("detail", "true"));
        }
        if all {
            query.push(("all", "true"));
        }
        let envelope: ResourcePropertiesEnvelope = self
            .rest
            .get(&format!("{COLLECTION}/properties"), &query, StatusCode::OK)
            .await?;
        Ok(envelope.resource_properties)
    }

    /// Host enrollment needs operator privileges; always refused locally.
    ///
    /// # Errors
    ///
    /// Always returns [`ReservationError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub const fn create(&self) -> ReservationResult<Host> {
        Err(ReservationError::not_implemented("create host"))
    }

    /// Host mutation needs operator privileges; always refused locally.
    ///
    /// # Errors
    ///
    /// Always returns [`ReservationError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub const fn update(&self) -> ReservationResult<Host> {
        Err(ReservationError::not_implemented("update host"))
    }

    /// Host removal needs operator privileges; always refused locally.
    ///
    /// # Errors
    ///
    /// Always returns [`ReservationError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub const fn delete(&self) -> ReservationResult<()> {
        Err(ReservationError::not_implemented("delete host"))
    }
}
