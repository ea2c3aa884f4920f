//! Provider network inventory, allocations, and schedulable properties.

use reqwest::StatusCode;

use crate::error::{ReservationError, ReservationResult};
use crate::rest::RestClient;
use crate::types::{
    Allocation, AllocationEnvelope, AllocationsEnvelope, Network, NetworkEnvelope,
    NetworksEnvelope, ResourcePropertiesEnvelope, ResourceProperty,
};

const COLLECTION: &str = "/networks";

/// Client for the `/networks` resource family.
#[derive(Debug, Clone)]
pub struct NetworksClient {
    rest: RestClient,
}

impl NetworksClient {
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// `GET /networks`, optionally filtered by query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn list(&self, filters: &[(&str, &str)]) -> ReservationResult<Vec<Network>> {
        let envelope: NetworksEnvelope = self.rest.get(COLLECTION, filters, StatusCode::OK).await?;
        Ok(envelope.networks)
    }

    /// `GET /networks/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::NotFound`] for an unknown id.
    pub async fn show(&self, network_id: &str) -> ReservationResult<Network> {
        let envelope: NetworkEnvelope = self
            .rest
            .get(&format!("{COLLECTION}/{network_id}"), &[], StatusCode::OK)
            .await?;
        Ok(envelope.network)
    }

    /// `GET /networks/allocations`.
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

    /// `GET /networks/{id}/allocation`.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::NotFound`] for an unknown id.
    pub async fn show_allocation(&self, network_id: &str) -> ReservationResult<Allocation> {
        let envelope: AllocationEnvelope = self
            .rest
            .get(
                &format!("{COLLECTION}/{network_id}/allocation"),
                &[],
                StatusCode::OK,
            )
            .await?;
        Ok(envelope.allocation)
    }

    /// `GET /networks/properties`; see [`crate::HostsClient::list_properties`]
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

    /// Network enrollment needs operator privileges; always refused locally.
    ///
    /// # Errors
    ///
    /// Always returns [`ReservationError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub const fn create(&self) -> ReservationResult<Network> {
        Err(ReservationError::not_implemented("create network"))
    }

    /// Network mutation needs operator privileges; always refused locally.
    ///
    /// # Errors
    ///
    /// Always returns [`ReservationError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub const fn update(&self) -> ReservationResult<Network> {
        Err(ReservationError::not_implemented("update network"))
    }

    /// Network removal needs operator privileges; always refused locally.
    ///
    /// # Errors
    ///
    /// Always returns [`ReservationError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub const fn delete(&self) -> ReservationResult<()> {
        Err(ReservationError::not_implemented("delete network"))
    }
}
