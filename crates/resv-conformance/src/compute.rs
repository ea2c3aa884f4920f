//! Compute-side glue: booting instances onto reservations.
//!
//! The reservation service only schedules capacity; proving a reservation
//! works means handing its id to the compute service as a scheduler hint and
//! watching the instance actually build.

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use resv_client::waiter::{self, ERROR_STATUS, HasStatus};
use resv_client::{ClientConfig, PollingConfig, ReservationResult, RestClient};

/// Task state the compute service reports while an instance materializes.
pub const SPAWNING_TASK: &str = "spawning";

/// Fault message the scheduler emits when a reservation holds no usable
/// capacity.
pub const NO_VALID_HOST: &str = "No valid host was found";

/// A compute instance, reduced to the fields the checks look at.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "OS-EXT-STS:task_state", default)]
    pub task_state: Option<String>,
    #[serde(default)]
    pub fault: Option<ServerFault>,
}

impl Server {
    /// Whether the scheduler rejected the instance for lack of capacity.
    #[must_use]
    pub fn hit_no_valid_host(&self) -> bool {
        self.fault
            .as_ref()
            .is_some_and(|fault| fault.message.contains(NO_VALID_HOST))
    }
}

impl HasStatus for Server {
    fn status(&self) -> &str {
        &self.status
    }

    fn task_state(&self) -> Option<&str> {
        self.task_state.as_deref()
    }
}

/// Scheduler fault attached to a failed instance.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerFault {
    pub message: String,
    #[serde(default)]
    pub code: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ServerEnvelope {
    server: Server,
}

/// Minimal compute client for the boot-onto-reservation checks.
#[derive(Debug, Clone)]
pub struct ComputeClient {
    rest: RestClient,
    polling: PollingConfig,
}

impl ComputeClient {
    /// Build a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`resv_client::ReservationError::Http`] if the underlying
    /// transport cannot be constructed.
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
    /// Returns [`resv_client::ReservationError::Http`] if the underlying
    /// transport cannot be constructed.
    pub fn with_base_url(endpoint: impl Into<String>) -> ReservationResult<Self> {
        let config = ClientConfig {
            endpoint: endpoint.into(),
            ..ClientConfig::default()
        };
        Self::new(&config)
    }

    /// Replace the polling cadence used by [`Self::wait_for_spawn`].
    #[must_use]
    pub fn with_polling(mut self, polling: PollingConfig) -> Self {
        self.polling = polling;
        self
    }

    /// `POST /servers`, hinting the scheduler at a reservation when given.
    ///
    /// The compute service acknowledges with `202` long before the instance
    /// exists; follow up with [`Self::wait_for_spawn`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn boot_server(
        &self,
        name: &str,
        image_ref: &str,
        flavor_ref: &str,
        reservation_id: Option<&str>,
    ) -> ReservationResult<Server> {
        let mut body = serde_json::json!({
            "server": {
                "name": name,
                "imageRef": image_ref,
                "flavorRef": flavor_ref,
            }
        });
        if let Some(reservation_id) = reservation_id {
            body["os:scheduler_hints"] = serde_json::json!({"reservation": reservation_id});
            debug!(reservation_id, name, "booting onto reservation");
        }

        let envelope: ServerEnvelope = self
            .rest
            .post("/servers", &body, StatusCode::ACCEPTED)
            .await?;
        Ok(envelope.server)
    }

    /// `GET /servers/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`resv_client::ReservationError::NotFound`] for an unknown id.
    pub async fn show_server(&self, server_id: &str) -> ReservationResult<Server> {
        let envelope: ServerEnvelope = self
            .rest
            .get(&format!("/servers/{server_id}"), &[], StatusCode::OK)
            .await?;
        Ok(envelope.server)
    }

    /// `DELETE /servers/{id}`, expecting `204`.
    ///
    /// # Errors
    ///
    /// Returns [`resv_client::ReservationError::NotFound`] for an unknown id.
    pub async fn delete_server(&self, server_id: &str) -> ReservationResult<()> {
        let _: Option<serde_json::Value> = self
            .rest
            .delete(&format!("/servers/{server_id}"), StatusCode::NO_CONTENT)
            .await?;
        Ok(())
    }

    /// Poll the instance until it reaches the `spawning` task state, or lands
    /// on `ERROR` first.
    ///
    /// An `ERROR` instance is returned rather than raised so the caller can
    /// read the scheduler fault off it.
    ///
    /// # Errors
    ///
    /// See [`waiter::wait_for_task_marker`].
    pub async fn wait_for_spawn(&self, server_id: &str) -> ReservationResult<Server> {
        waiter::wait_for_task_marker(
            server_id,
            SPAWNING_TASK,
            &[ERROR_STATUS],
            self.polling.lease_interval,
            self.polling.lease_end_timeout,
            || self.show_server(server_id),
        )
        .await
    }
}
