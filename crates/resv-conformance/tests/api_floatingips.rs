//! Floating IP inventory API surface against the mock service.

use resv_client::{ReservationRequest, resource_type};
use resv_testkit::{MockReservationService, assertions, far_future_lease, fixtures};

#[tokio::test]
async fn amount_reservation_names_the_external_network() {
    let service = MockReservationService::start().await;
    service
        .expect_created(
            "/leases",
            fixtures::envelopes::lease(fixtures::lease_with_reservation(
                "lease-1",
                "PENDING",
                fixtures::reservation("resv-1", resource_type::FLOATING_IP, None),
            )),
        )
        .await;

    let body = far_future_lease(
        "fip",
        vec![ReservationRequest::floating_ips("public-net", 2)],
    );
    service.client().leases().create(&body).await.unwrap();

    let received = service.inner().received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sent["reservations"][0]["network_id"], "public-net");
    assert_eq!(sent["reservations"][0]["amount"], 2);
    assert_eq!(
        sent["reservations"][0]["resource_type"],
        "virtual:floatingip"
    );
}

#[tokio::test]
async fn inventory_reads_back() {
    let service = MockReservationService::start().await;
    service
        .expect_list(
            "/floatingips",
            fixtures::envelopes::floatingips(vec![fixtures::floating_ip(
                "fip-1",
                "203.0.113.5",
            )]),
        )
        .await;
    service
        .expect_show(
            "/floatingips/fip-1",
            fixtures::envelopes::floatingip(fixtures::floating_ip("fip-1", "203.0.113.5")),
        )
        .await;

    let client = service.client();
    let fips = client.floatingips().list(&[]).await.unwrap();
    assert_eq!(fips[0].floating_ip_address.as_deref(), Some("203.0.113.5"));

    let fip = client.floatingips().show("fip-1").await.unwrap();
    assert_eq!(fip.floating_network_id.as_deref(), Some("public-net"));
}

#[tokio::test]
async fn enrollment_is_refused_client_side() {
    let service = MockReservationService::start().await;
    let client = service.client();

    assertions::assert_not_implemented(&client.floatingips().create().unwrap_err());
    assertions::assert_not_implemented(&client.floatingips().update().unwrap_err());
    assertions::assert_not_implemented(&client.floatingips().delete().unwrap_err());
    service.assert_no_requests().await;
}
