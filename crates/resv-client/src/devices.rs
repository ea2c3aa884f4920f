//! Edge device inventory, allocations, and schedulable properties.

use reqwest::StatusCode;

use crate::error::{ReservationError, ReservationResult};
use crate::rest::RestClient;
use crate::types::{
    Allocation, AllocationEnvelope, AllocationsEnvelope, Device, DeviceEnvelope, DevicesEnvelope,
    ResourcePropertiesEnvelope, ResourceProperty,
};

const COLLECTION: &str = "/devices";

/// Client for the `/devices` resource family.
///
/// Mirrors [`crate::HostsClient`] over the device inventory: read paths only,
/// with typed refusals for the operator-level mutations.
#[derive(Debug, Clone)]
pub struct DevicesClient {
    rest: RestClient,
}

impl DevicesClient {
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// `GET /devices`, optionally filtered by query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn list(&self, filters: &[(&str, &str)]) -> ReservationResult<Vec<Device>> {
        let envelope: DevicesEnvelope = self.rest.get(COLLECTION, filters, StatusCode::OK).await?;
        Ok(envelope.devices)
    }

    /// `GET /devices/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::NotFound`] for an unknown id.
    pub async fn show(&self, device_id: &str) -> ReservationResult<Device> {
        let envelope: DeviceEnvelope = self
            .rest
            .get(&format!("{COLLECTION}/{device_id}"), &[], StatusCode::OK)
            .await?;
        Ok(envelope.device)
    }

    /// `GET /devices/allocations`.
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

    /// `GET /devices/{id}/allocation`.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::NotFound`] for an unknown id.
    pub async fn show_allocation(&self, device_id: &str) -> ReservationResult<Allocation> {
        let envelope: AllocationEnvelope = self
            .rest
            .get(
                &format!("{COLLECTION}/{device_id}/allocation"),
                &[],
                StatusCode::OK,
            )
            .await?;
        Ok(envelope.allocation)
    }

    /// `GET /devices/properties`; see [`crate::HostsClient::list_properties`]
    /// for the `detail`/`all` view semantics.
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

    /// Device enrollment needs operator privileges; always refused locally.
    ///
    /// # Errors
    ///
    /// Always returns [`ReservationError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub const fn create(&self) -> ReservationResult<Device> {
        Err(ReservationError::not_implemented("create device"))
    }

    /// Device mutation needs operator privileges; always refused locally.
    ///
    /// # Errors
    ///
    /// Always returns [`ReservationError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub const fn update(&self) -> ReservationResult<Device> {
        Err(ReservationError::not_implemented("update device"))
    }

    /// Device removal needs operator privileges; always refused locally.
    ///
    /// # Errors
    ///
    /// Always returns [`ReservationError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub const fn delete(&self) -> ReservationResult<()> {
        Err(ReservationError::not_implemented("delete device"))
    }
}
