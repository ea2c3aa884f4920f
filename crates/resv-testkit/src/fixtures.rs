//! Canonical JSON bodies matching the service's wire shapes.
//!
//! Builders return the bare entity; wrap with [`envelopes`] to get the shape
//! the service actually sends.

use serde_json::{Value, json};

/// Start of the fixture reservation window, response format.
pub const START_DATE: &str = "2050-12-26T12:00:00.000000";
/// End of the fixture reservation window, response format.
pub const END_DATE: &str = "2050-12-27T12:00:00.000000";

#[must_use]
pub fn lease(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": format!("fixture-{id}"),
        "start_date": START_DATE,
        "end_date": END_DATE,
        "status": status,
        "project_id": "project-1",
        "user_id": "user-1",
        "reservations": []
    })
}

#[must_use]
pub fn lease_with_reservation(id: &str, status: &str, reservation: Value) -> Value {
    let mut body = lease(id, status);
    body["reservations"] = json!([reservation]);
    body
}

#[must_use]
pub fn reservation(id: &str, resource_type: &str, resource_id: Option<&str>) -> Value {
    json!({
        "id": id,
        "resource_type": resource_type,
        "status": "pending",
        "lease_id": "lease-1",
        "resource_id": resource_id,
        "min": 1,
        "max": 1
    })
}

#[must_use]
pub fn host(id: &str, hypervisor_hostname: &str) -> Value {
    json!({
        "id": id,
        "hypervisor_hostname": hypervisor_hostname,
        "vcpus": 32,
        "memory_mb": 65536,
        "local_gb": 512,
        "reservable": true,
        "status": null
    })
}

#[must_use]
pub fn device(id: &str, machine_name: &str) -> Value {
    json!({
        "id": id,
        "name": format!("edge-{id}"),
        "device_type": "container",
        "device_driver": "zun",
        "machine_name": machine_name,
        "reservable": true
    })
}

#[must_use]
pub fn network(id: &str) -> Value {
    json!({
        "id": id,
        "network_type": "vlan",
        "physical_network": "physnet1",
        "segment_id": 1234
    })
}

#[must_use]
pub fn floating_ip(id: &str, address: &str) -> Value {
    json!({
        "id": id,
        "floating_ip_address": address,
        "floating_network_id": "public-net",
        "reservable": true
    })
}

#[must_use]
pub fn allocation(resource_id: &str, reservation_ids: &[&str]) -> Value {
    let reservations: Vec<Value> = reservation_ids
        .iter()
        .map(|id| json!({"id": id, "lease_id": "lease-1"}))
        .collect();
    json!({"resource_id": resource_id, "reservations": reservations})
}

/// Property entry as the default listing shows it.
#[must_use]
pub fn property_name(name: &str) -> Value {
    json!({"property": name})
}

/// Property entry as the `detail`/`all` views show it.
#[must_use]
pub fn property_detailed(name: &str, private: bool, values: &[&str]) -> Value {
    json!({
        "property": name,
        "private": private,
        "values": values,
        "is_unique": false
    })
}

/// Compute server body, optionally mid-task.
#[must_use]
pub fn server(id: &str, status: &str, task_state: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": format!("instance-{id}"),
        "status": status,
        "OS-EXT-STS:task_state": task_state
    })
}

/// Compute server that the scheduler gave up on.
#[must_use]
pub fn server_with_fault(id: &str, message: &str) -> Value {
    json!({
        "id": id,
        "name": format!("instance-{id}"),
        "status": "ERROR",
        "OS-EXT-STS:task_state": null,
        "fault": {"message": message, "code": 500}
    })
}

/// Single-key wrappers the service puts around every response body.
pub mod envelopes {
    use serde_json::{Value, json};

    #[must_use]
    pub fn lease(body: Value) -> Value {
        json!({"lease": body})
    }

    #[must_use]
    pub fn leases(bodies: Vec<Value>) -> Value {
        json!({"leases": bodies})
    }

    #[must_use]
    pub fn host(body: Value) -> Value {
        json!({"host": body})
    }

    #[must_use]
    pub fn hosts(bodies: Vec<Value>) -> Value {
        json!({"hosts": bodies})
    }

    #[must_use]
    pub fn device(body: Value) -> Value {
        json!({"device": body})
    }

    #[must_use]
    pub fn devices(bodies: Vec<Value>) -> Value {
        json!({"devices": bodies})
    }

    #[must_use]
    pub fn network(body: Value) -> Value {
        json!({"network": body})
    }

    #[must_use]
    pub fn networks(bodies: Vec<Value>) -> Value {
        json!({"networks": bodies})
    }

    #[must_use]
    pub fn floatingip(body: Value) -> Value {
        json!({"floatingip": body})
    }

    #[must_use]
    pub fn floatingips(bodies: Vec<Value>) -> Value {
        json!({"floatingips": bodies})
    }

    #[must_use]
    pub fn allocation(body: Value) -> Value {
        json!({"allocation": body})
    }

    #[must_use]
    pub fn allocations(bodies: Vec<Value>) -> Value {
        json!({"allocations": bodies})
    }

    #[must_use]
    pub fn resource_properties(bodies: Vec<Value>) -> Value {
        json!({"resource_properties": bodies})
    }

    #[must_use]
    pub fn server(body: Value) -> Value {
        json!({"server": body})
    }
}

/// Error bodies in the service's fault dialect.
pub mod json {
    use serde_json::{Value, json};

    #[must_use]
    pub fn not_found(resource: &str) -> Value {
        json!({"error_message": format!("{resource} could not be found")})
    }

    #[must_use]
    pub fn forbidden(action: &str) -> Value {
        json!({"error_message": format!("policy does not allow {action}")})
    }

    /// Compute-style nested fault envelope.
    #[must_use]
    pub fn fault(message: &str) -> Value {
        json!({"computeFault": {"message": message, "code": 500}})
    }
}
