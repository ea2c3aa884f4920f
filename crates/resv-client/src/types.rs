//! Wire types for the reservation API.
//!
//! Every entity here is owned by the remote service; these structs only
//! mirror what comes back over HTTP. Response bodies arrive wrapped in
//! single-key envelopes (`{"lease": {...}}`, `{"leases": [...]}`); request
//! bodies go out unwrapped.

use serde::{Deserialize, Serialize};

use crate::error::ReservationResult;
use crate::times;
use crate::waiter::HasStatus;

/// Lease lifecycle statuses reported by the service.
///
/// Transitions are monotonic along a single path, except that deletion can
/// interrupt at any point and `ERROR` is absorbing.
pub mod lease_status {
    pub const PENDING: &str = "PENDING";
    pub const ACTIVE: &str = "ACTIVE";
    pub const TERMINATING: &str = "TERMINATING";
    pub const TERMINATED: &str = "TERMINATED";
    pub const ERROR: &str = "ERROR";
}

/// Reservation resource-type discriminators.
pub mod resource_type {
    pub const PHYSICAL_HOST: &str = "physical:host";
    pub const DEVICE: &str = "device";
    pub const NETWORK: &str = "network";
    pub const FLOATING_IP: &str = "virtual:floatingip";
    pub const FLAVOR_INSTANCE: &str = "flavor:instance";
}

/// Serialize a property filter expression, e.g.
/// `["==", "$machine_name", "raspberrypi4-64"]`.
///
/// The service expects the expression as a JSON string embedded in the
/// reservation, not as structured JSON.
#[must_use]
pub fn property_filter(op: &str, property: &str, value: &str) -> String {
    serde_json::json!([op, format!("${property}"), value]).to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Leases
// ─────────────────────────────────────────────────────────────────────────────

/// A time-bounded claim against one or more reservable resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lease {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

impl Lease {
    /// First reservation carrying the given resource type.
    #[must_use]
    pub fn reservation_of_type(&self, resource_type: &str) -> Option<&Reservation> {
        self.reservations
            .iter()
            .find(|r| r.resource_type == resource_type)
    }

    /// Parsed start date.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReservationError::InvalidDate`] if the service
    /// returned a malformed timestamp.
    pub fn start_at(&self) -> ReservationResult<chrono::NaiveDateTime> {
        times::parse_response(&self.start_date)
    }

    /// Parsed end date.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReservationError::InvalidDate`] if the service
    /// returned a malformed timestamp.
    pub fn end_at(&self) -> ReservationResult<chrono::NaiveDateTime> {
        times::parse_response(&self.end_date)
    }
}

impl HasStatus for Lease {
    fn status(&self) -> &str {
        &self.status
    }
}

/// One resource-type-specific request embedded in a lease.
///
/// `resource_id` links the reservation to an allocation once active, but the
/// linkage is not a foreign key: resolving the concrete resource requires
/// scanning the collection's allocation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub resource_type: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub lease_id: Option<String>,
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub min: Option<u32>,
    #[serde(default)]
    pub max: Option<u32>,
    #[serde(default)]
    pub amount: Option<u32>,
    #[serde(default)]
    pub resource_properties: Option<String>,
    #[serde(default)]
    pub hypervisor_properties: Option<String>,
    #[serde(default)]
    pub network_name: Option<String>,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default)]
    pub flavor_id: Option<String>,
}

/// Request body for `POST /leases`.
#[derive(Debug, Clone, Serialize)]
pub struct LeaseCreateBody {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub reservations: Vec<ReservationRequest>,
    pub events: Vec<serde_json::Value>,
}

impl LeaseCreateBody {
    /// Lease request with no reservations or events attached.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            reservations: Vec::new(),
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_reservations(mut self, reservations: Vec<ReservationRequest>) -> Self {
        self.reservations = reservations;
        self
    }
}

/// One reservation entry in a lease create request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReservationRequest {
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_properties: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypervisor_properties: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity: Option<String>,
}

impl ReservationRequest {
    /// Reserve between `min` and `max` physical hosts.
    #[must_use]
    pub fn physical_hosts(min: u32, max: u32) -> Self {
        Self {
            resource_type: resource_type::PHYSICAL_HOST.into(),
            min: Some(min),
            max: Some(max),
            resource_properties: Some(String::new()),
            hypervisor_properties: Some(String::new()),
            ..Self::default()
        }
    }

    /// Reserve between `min` and `max` devices.
    #[must_use]
    pub fn devices(min: u32, max: u32) -> Self {
        Self {
            resource_type: resource_type::DEVICE.into(),
            min: Some(min),
            max: Some(max),
            resource_properties: Some(String::new()),
            ..Self::default()
        }
    }

    /// Reserve a whole network, created under the given name once active.
    #[must_use]
    pub fn network(network_name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type::NETWORK.into(),
            network_name: Some(network_name.into()),
            resource_properties: Some(String::new()),
            ..Self::default()
        }
    }

    /// Reserve `amount` floating IPs from the given external network.
    #[must_use]
    pub fn floating_ips(network_id: impl Into<String>, amount: u32) -> Self {
        Self {
            resource_type: resource_type::FLOATING_IP.into(),
            network_id: Some(network_id.into()),
            amount: Some(amount),
            ..Self::default()
        }
    }

    /// Reserve `amount` instances of the given flavor.
    #[must_use]
    pub fn flavor_instances(flavor_id: impl Into<String>, amount: u32) -> Self {
        Self {
            resource_type: resource_type::FLAVOR_INSTANCE.into(),
            flavor_id: Some(flavor_id.into()),
            amount: Some(amount),
            affinity: Some("None".into()),
            ..Self::default()
        }
    }

    /// Attach a property filter expression (see [`property_filter`]).
    #[must_use]
    pub fn with_resource_properties(mut self, expression: impl Into<String>) -> Self {
        self.resource_properties = Some(expression.into());
        self
    }

    /// Attach a hypervisor property filter expression.
    #[must_use]
    pub fn with_hypervisor_properties(mut self, expression: impl Into<String>) -> Self {
        self.hypervisor_properties = Some(expression.into());
        self
    }
}

/// Partial body for `PUT /leases/{id}`; absent fields stay untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeaseUpdateBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Reservable resources
// ─────────────────────────────────────────────────────────────────────────────

/// A physical compute host in the reservation pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    pub id: String,
    #[serde(default)]
    pub hypervisor_hostname: Option<String>,
    #[serde(default)]
    pub vcpus: Option<u32>,
    #[serde(default)]
    pub memory_mb: Option<u64>,
    #[serde(default)]
    pub local_gb: Option<u64>,
    #[serde(default)]
    pub reservable: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A reservable edge device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub device_driver: Option<String>,
    #[serde(default)]
    pub machine_name: Option<String>,
    #[serde(default)]
    pub reservable: Option<bool>,
}

/// A reservable provider network segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    #[serde(default)]
    pub network_type: Option<String>,
    #[serde(default)]
    pub physical_network: Option<String>,
    #[serde(default)]
    pub segment_id: Option<u32>,
}

/// A reservable floating IP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingIp {
    pub id: String,
    #[serde(default)]
    pub floating_ip_address: Option<String>,
    #[serde(default)]
    pub floating_network_id: Option<String>,
    #[serde(default)]
    pub reservable: Option<bool>,
}

/// A time-window record linking reservations to a concrete resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    pub resource_id: String,
    #[serde(default)]
    pub reservations: Vec<AllocationReservation>,
}

impl Allocation {
    /// Whether any window on this resource belongs to the given reservation.
    #[must_use]
    pub fn holds_reservation(&self, reservation_id: &str) -> bool {
        self.reservations.iter().any(|r| r.id == reservation_id)
    }
}

/// Reservation window entry inside an [`Allocation`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationReservation {
    pub id: String,
    #[serde(default)]
    pub lease_id: Option<String>,
}

/// A schedulable attribute usable in property filter expressions.
///
/// The default listing carries only the name; `detail`/`all` views add the
/// `private`, `values`, and `is_unique` fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceProperty {
    pub property: String,
    #[serde(default)]
    pub private: Option<bool>,
    #[serde(default)]
    pub values: Option<Vec<String>>,
    #[serde(default)]
    pub is_unique: Option<bool>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response envelopes
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LeaseEnvelope {
    pub lease: Lease,
}

#[derive(Debug, Deserialize)]
pub struct LeasesEnvelope {
    pub leases: Vec<Lease>,
}

#[derive(Debug, Deserialize)]
pub struct HostEnvelope {
    pub host: Host,
}

#[derive(Debug, Deserialize)]
pub struct HostsEnvelope {
    pub hosts: Vec<Host>,
}

#[derive(Debug, Deserialize)]
pub struct DeviceEnvelope {
    pub device: Device,
}

#[derive(Debug, Deserialize)]
pub struct DevicesEnvelope {
    pub devices: Vec<Device>,
}

#[derive(Debug, Deserialize)]
pub struct NetworkEnvelope {
    pub network: Network,
}

#[derive(Debug, Deserialize)]
pub struct NetworksEnvelope {
    pub networks: Vec<Network>,
}

#[derive(Debug, Deserialize)]
pub struct FloatingIpEnvelope {
    pub floatingip: FloatingIp,
}

#[derive(Debug, Deserialize)]
pub struct FloatingIpsEnvelope {
    pub floatingips: Vec<FloatingIp>,
}

#[derive(Debug, Deserialize)]
pub struct AllocationEnvelope {
    pub allocation: Allocation,
}

#[derive(Debug, Deserialize)]
pub struct AllocationsEnvelope {
    pub allocations: Vec<Allocation>,
}

#[derive(Debug, Deserialize)]
pub struct ResourcePropertiesEnvelope {
    pub resource_properties: Vec<ResourceProperty>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lease_envelope_decodes_service_shape() {
        let envelope: LeaseEnvelope = serde_json::from_value(serde_json::json!({
            "lease": {
                "id": "lease-1",
                "name": "scale-out",
                "start_date": "2050-12-26T12:00:00.000000",
                "end_date": "2050-12-27T12:00:00.000000",
                "status": "PENDING",
                "reservations": [{
                    "id": "resv-1",
                    "resource_type": "physical:host",
                    "min": 1,
                    "max": 2
                }]
            }
        }))
        .unwrap();

        let lease = envelope.lease;
        assert_eq!(lease.status, lease_status::PENDING);
        assert_eq!(lease.reservations.len(), 1);
        let reservation = lease
            .reservation_of_type(resource_type::PHYSICAL_HOST)
            .unwrap();
        assert_eq!(reservation.id, "resv-1");
        assert!(lease.reservation_of_type(resource_type::DEVICE).is_none());
        assert_eq!(
            times::format_request(lease.end_at().unwrap()),
            "2050-12-27 12:00"
        );
    }

    #[test]
    fn create_body_serializes_unwrapped_with_empty_collections() {
        let body = LeaseCreateBody::new("lease-a", "now", "2050-12-27 12:00");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "lease-a",
                "start_date": "now",
                "end_date": "2050-12-27 12:00",
                "reservations": [],
                "events": []
            })
        );
    }

    #[test]
    fn reservation_request_drops_absent_fields() {
        let request = ReservationRequest::devices(1, 1)
            .with_resource_properties(property_filter("==", "machine_name", "raspberrypi4-64"));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["resource_type"], "device");
        assert_eq!(value["min"], 1);
        assert_eq!(
            value["resource_properties"],
            r#"["==","$machine_name","raspberrypi4-64"]"#
        );
        assert!(value.get("flavor_id").is_none());
        assert!(value.get("amount").is_none());
    }

    #[test]
    fn update_body_serializes_only_changed_fields() {
        let body = LeaseUpdateBody {
            name: Some("renamed".into()),
            end_date: Some("2050-12-28 12:00".into()),
            ..LeaseUpdateBody::default()
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "renamed", "end_date": "2050-12-28 12:00"})
        );
    }

    #[test]
    fn allocation_scan_finds_owning_reservation() {
        let allocation: Allocation = serde_json::from_value(serde_json::json!({
            "resource_id": "host-7",
            "reservations": [
                {"id": "resv-1", "lease_id": "lease-1"},
                {"id": "resv-2", "lease_id": "lease-2"}
            ]
        }))
        .unwrap();

        assert!(allocation.holds_reservation("resv-2"));
        assert!(!allocation.holds_reservation("resv-9"));
    }

    #[test]
    fn property_entries_tolerate_both_views() {
        let plain: ResourceProperty =
            serde_json::from_value(serde_json::json!({"property": "local_gb"})).unwrap();
        assert!(plain.private.is_none());
        assert!(plain.values.is_none());

        let detailed: ResourceProperty = serde_json::from_value(serde_json::json!({
            "property": "local_gb",
            "private": false,
            "values": ["128", "256"],
            "is_unique": false
        }))
        .unwrap();
        assert_eq!(detailed.private, Some(false));
        assert_eq!(detailed.values.as_deref(), Some(&["128".to_string(), "256".to_string()][..]));
    }
}
