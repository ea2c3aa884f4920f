//! Reservation client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for [`crate::ReservationClient`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the reservation API (default: <http://127.0.0.1:1234/v1>)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Pre-obtained auth token, sent as `X-Auth-Token` when present.
    ///
    /// Token acquisition is deliberately out of scope; callers obtain one
    /// from their identity service and pass it in as an opaque string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Request timeout
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// Polling cadence for the status waiters
    #[serde(default)]
    pub polling: PollingConfig,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:1234/v1".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Polling cadence used when waiting on lease status transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay between consecutive status fetches
    #[serde(default = "default_lease_interval", with = "duration_secs")]
    pub lease_interval: Duration,

    /// Overall budget for one wait; exceeding it is a hard error
    #[serde(default = "default_lease_end_timeout", with = "duration_secs")]
    pub lease_end_timeout: Duration,
}

fn default_lease_interval() -> Duration {
    Duration::from_secs(10)
}

fn default_lease_end_timeout() -> Duration {
    Duration::from_secs(300)
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            lease_interval: default_lease_interval(),
            lease_end_timeout: default_lease_end_timeout(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            auth_token: None,
            timeout: default_timeout(),
            polling: PollingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_cadence() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:1234/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.polling.lease_interval, Duration::from_secs(10));
        assert_eq!(config.polling.lease_end_timeout, Duration::from_secs(300));
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn deserializes_partial_config() {
        let config: ClientConfig = serde_json::from_str(
            r#"{
                "endpoint": "http://reservation.example:1234/v1",
                "auth_token": "tok-123",
                "polling": {"lease_interval": 2}
            }"#,
        )
        .unwrap();

        assert_eq!(config.endpoint, "http://reservation.example:1234/v1");
        assert_eq!(config.auth_token.as_deref(), Some("tok-123"));
        assert_eq!(config.polling.lease_interval, Duration::from_secs(2));
        // untouched fields fall back to defaults
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.polling.lease_end_timeout, Duration::from_secs(300));
    }

    #[test]
    fn durations_round_trip_as_seconds() {
        let config = ClientConfig::default();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["timeout"], 30);
        assert_eq!(value["polling"]["lease_interval"], 10);

        let back: ClientConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back.polling.lease_end_timeout, Duration::from_secs(300));
    }
}
