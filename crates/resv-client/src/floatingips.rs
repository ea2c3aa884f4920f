//! Reservable floating IP inventory.

use reqwest::StatusCode;

use crate::error::{ReservationError, ReservationResult};
use crate::rest::RestClient;
use crate::types::{FloatingIp, FloatingIpEnvelope, FloatingIpsEnvelope};

const COLLECTION: &str = "/floatingips";

/// Client for the `/floatingips` resource family.
///
/// Floating IPs expose no allocation or property views; only the inventory
/// itself is readable.
#[derive(Debug, Clone)]
pub struct FloatingIpsClient {
    rest: RestClient,
}

impl FloatingIpsClient {
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// `GET /floatingips`, optionally filtered by query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn list(&self, filters: &[(&str, &str)]) -> ReservationResult<Vec<FloatingIp>> {
        let envelope: FloatingIpsEnvelope =
            self.rest.get(COLLECTION, filters, StatusCode::OK).await?;
        Ok(envelope.floatingips)
    }

    /// `GET /floatingips/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::NotFound`] for an unknown id.
    pub async fn show(&self, floatingip_id: &str) -> ReservationResult<FloatingIp> {
        let envelope: FloatingIpEnvelope = self
            .rest
            .get(&format!("{COLLECTION}/{floatingip_id}"), &[], StatusCode::OK)
            .await?;
        Ok(envelope.floatingip)
    }

    /// Floating IP enrollment needs operator privileges; always refused
    /// locally.
    ///
    /// # Errors
    ///
    /// Always returns [`ReservationError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub const fn create(&self) -> ReservationResult<FloatingIp> {
        Err(ReservationError::not_implemented("create floating ip"))
    }

    /// Floating IP mutation needs operator privileges; always refused
    /// locally.
    ///
    /// # Errors
    ///
    /// Always returns [`ReservationError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub const fn update(&self) -> ReservationResult<FloatingIp> {
        Err(ReservationError::not_implemented("update floating ip"))
    }

    /// Floating IP removal needs operator privileges; always refused locally.
    ///
    /// # Errors
    ///
    /// Always returns [`ReservationError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub const fn delete(&self) -> ReservationResult<()> {
        Err(ReservationError::not_implemented("delete floating ip"))
    }
}
