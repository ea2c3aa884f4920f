//! Entry point tying the resource families to one endpoint.

use crate::config::{ClientConfig, PollingConfig};
use crate::devices::DevicesClient;
use crate::error::ReservationResult;
use crate::floatingips::FloatingIpsClient;
use crate::hosts::HostsClient;
use crate::leases::LeasesClient;
use crate::networks::NetworksClient;
use crate::rest::RestClient;

/// Facade over every resource family of the reservation service.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ReservationClient {
    rest: RestClient,
    polling: PollingConfig,
}

impl ReservationClient {
    /// Build a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReservationError::Http`] if the underlying transport
    /// cannot be constructed.
    pub fn new(config: &ClientConfig) -> ReservationResult<Self> {
        Ok(Self {
            rest: RestClient::new(config)?,
            polling: config.polling.clone(),
        })
    }

    /// Build a client against an explicit endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReservationError::Http`] if the underlying transport
    /// cannot be constructed.
    pub fn with_base_url(endpoint: impl Into<String>) -> ReservationResult<Self> {
        let config = ClientConfig {
            endpoint: endpoint.into(),
            ..ClientConfig::default()
        };
        Self::new(&config)
    }

    /// Replace the polling cadence used by lifecycle waits.
    #[must_use]
    pub fn with_polling(mut self, polling: PollingConfig) -> Self {
        self.polling = polling;
        self
    }

    #[must_use]
    pub fn leases(&self) -> LeasesClient {
        LeasesClient::new(self.rest.clone(), self.polling.clone())
    }

    #[must_use]
    pub fn hosts(&self) -> HostsClient {
        HostsClient::new(self.rest.clone())
    }

    #[must_use]
    pub fn devices(&self) -> DevicesClient {
        DevicesClient::new(self.rest.clone())
    }

    #[must_use]
    pub fn networks(&self) -> NetworksClient {
        NetworksClient::new(self.rest.clone())
    }

    #[must_use]
    pub fn floatingips(&self) -> FloatingIpsClient {
        FloatingIpsClient::new(self.rest.clone())
    }

    /// Polling cadence currently applied to lifecycle waits.
    #[must_use]
    pub const fn polling(&self) -> &PollingConfig {
        &self.polling
    }

    /// Endpoint this client targets.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.rest.base_url()
    }
}
