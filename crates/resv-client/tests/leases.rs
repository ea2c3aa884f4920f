//! Lease CRUD against a mocked reservation endpoint.

use resv_client::{
    ClientConfig, LeaseCreateBody, LeaseUpdateBody, ReservationClient, ReservationError,
    ReservationRequest, lease_status, resource_type,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lease_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "stress-window",
        "start_date": "2050-12-26T12:00:00.000000",
        "end_date": "2050-12-27T12:00:00.000000",
        "status": status,
        "reservations": [{
            "id": "resv-1",
            "resource_type": "physical:host",
            "status": "pending",
            "lease_id": id,
            "min": 1,
            "max": 1
        }]
    })
}

fn client_for(server: &MockServer) -> ReservationClient {
    ReservationClient::with_base_url(server.uri()).unwrap()
}

#[tokio::test]
async fn list_unwraps_envelope_and_forwards_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/leases"))
        .and(query_param("status", "ACTIVE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "leases": [lease_json("lease-1", "ACTIVE"), lease_json("lease-2", "ACTIVE")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let leases = client_for(&server)
        .leases()
        .list(&[("status", "ACTIVE")])
        .await
        .unwrap();

    assert_eq!(leases.len(), 2);
    assert_eq!(leases[0].id, "lease-1");
    assert_eq!(leases[1].status, lease_status::ACTIVE);
}

#[tokio::test]
async fn show_returns_single_lease() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/leases/lease-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"lease": lease_json("lease-1", "PENDING")})),
        )
        .mount(&server)
        .await;

    let lease = client_for(&server).leases().show("lease-1").await.unwrap();

    assert_eq!(lease.id, "lease-1");
    assert_eq!(lease.status, lease_status::PENDING);
    let reservation = lease
        .reservation_of_type(resource_type::PHYSICAL_HOST)
        .unwrap();
    assert_eq!(reservation.lease_id.as_deref(), Some("lease-1"));
}

#[tokio::test]
async fn create_posts_unwrapped_body_and_expects_201() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/leases"))
        .and(body_json(json!({
            "name": "stress-window",
            "start_date": "now",
            "end_date": "2050-12-27 12:00",
            "reservations": [{
                "resource_type": "physical:host",
                "min": 1,
                "max": 1,
                "resource_properties": "",
                "hypervisor_properties": ""
            }],
            "events": []
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"lease": lease_json("lease-1", "PENDING")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = LeaseCreateBody::new("stress-window", "now", "2050-12-27 12:00")
        .with_reservations(vec![ReservationRequest::physical_hosts(1, 1)]);
    let lease = client_for(&server).leases().create(&body).await.unwrap();

    assert_eq!(lease.id, "lease-1");
}

#[tokio::test]
async fn update_sends_only_changed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/leases/lease-1"))
        .and(body_json(json!({"end_date": "2050-12-28 12:00"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"lease": lease_json("lease-1", "ACTIVE")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = LeaseUpdateBody {
        end_date: Some("2050-12-28 12:00".into()),
        ..LeaseUpdateBody::default()
    };
    client_for(&server)
        .leases()
        .update("lease-1", &body)
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_returns_the_deleted_lease_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/leases/lease-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"lease": lease_json("lease-1", "TERMINATED")})),
        )
        .mount(&server)
        .await;

    let deleted = client_for(&server)
        .leases()
        .delete("lease-1")
        .await
        .unwrap();

    assert_eq!(deleted.unwrap().status, lease_status::TERMINATED);
}

#[tokio::test]
async fn delete_tolerates_an_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/leases/lease-1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let deleted = client_for(&server)
        .leases()
        .delete("lease-1")
        .await
        .unwrap();

    assert!(deleted.is_none());
}

#[tokio::test]
async fn show_hosts_lists_backing_hosts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/leases/lease-1/hosts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hosts": [{
                "id": "host-7",
                "hypervisor_hostname": "compute-7.example",
                "vcpus": 32,
                "reservable": true
            }]
        })))
        .mount(&server)
        .await;

    let hosts = client_for(&server)
        .leases()
        .show_hosts("lease-1")
        .await
        .unwrap();

    assert_eq!(hosts.len(), 1);
    assert_eq!(
        hosts[0].hypervisor_hostname.as_deref(),
        Some("compute-7.example")
    );
}

#[tokio::test]
async fn auth_token_header_rides_every_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/leases"))
        .and(header("x-auth-token", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"leases": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        endpoint: server.uri(),
        auth_token: Some("secret-token".into()),
        ..ClientConfig::default()
    };
    let client = ReservationClient::new(&config).unwrap();
    let leases = client.leases().list(&[]).await.unwrap();

    assert!(leases.is_empty());
}

#[tokio::test]
async fn missing_lease_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/leases/absent"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error_message": "lease absent could not be found"})),
        )
        .mount(&server)
        .await;

    let error = client_for(&server)
        .leases()
        .show("absent")
        .await
        .unwrap_err();

    assert!(error.is_not_found());
    match error {
        ReservationError::NotFound { resource } => assert_eq!(resource, "/leases/absent"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn forbidden_carries_the_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/leases/lease-1"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"error_message": "policy does not allow lease:delete"})),
        )
        .mount(&server)
        .await;

    let error = client_for(&server)
        .leases()
        .delete("lease-1")
        .await
        .unwrap_err();

    match error {
        ReservationError::Forbidden { message } => {
            assert_eq!(message, "policy does not allow lease:delete");
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

#[tokio::test]
async fn conflict_surfaces_status_and_message_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/leases"))
        .respond_with(ResponseTemplate::new(500).set_body_json(
            json!({"error_message": "Not enough hosts available"}),
        ))
        .mount(&server)
        .await;

    let body = LeaseCreateBody::new("doomed", "now", "2050-12-27 12:00")
        .with_reservations(vec![ReservationRequest::physical_hosts(100, 200)]);
    let error = client_for(&server).leases().create(&body).await.unwrap_err();

    assert!(error.is_retryable());
    match error {
        ReservationError::UnexpectedStatus {
            expected,
            got,
            body,
        } => {
            assert_eq!(expected, 201);
            assert_eq!(got, 500);
            assert_eq!(body, "Not enough hosts available");
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}
