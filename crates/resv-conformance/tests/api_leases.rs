//! Lease API surface against the mock service.

use resv_client::{LeaseUpdateBody, ReservationRequest, lease_status, resource_type};
use resv_testkit::{
    MockReservationService, assertions, far_future_lease, fixtures, init_test_tracing,
};

#[tokio::test]
async fn lease_crud_round_trip() {
    init_test_tracing();
    let service = MockReservationService::start().await;
    service
        .expect_created(
            "/leases",
            fixtures::envelopes::lease(fixtures::lease_with_reservation(
                "lease-1",
                "PENDING",
                fixtures::reservation("resv-1", resource_type::PHYSICAL_HOST, None),
            )),
        )
        .await;
    service
        .expect_updated(
            "/leases/lease-1",
            fixtures::envelopes::lease(fixtures::lease("lease-1", "PENDING")),
        )
        .await;
    service
        .expect_deleted(
            "/leases/lease-1",
            Some(fixtures::envelopes::lease(fixtures::lease(
                "lease-1",
                "TERMINATED",
            ))),
        )
        .await;

    let client = service.client();
    let body = far_future_lease("api", vec![ReservationRequest::physical_hosts(1, 1)]);
    let created = client.leases().create(&body).await.unwrap();
    assert_eq!(created.status, lease_status::PENDING);
    assert!(
        created
            .reservation_of_type(resource_type::PHYSICAL_HOST)
            .is_some()
    );

    let update = LeaseUpdateBody {
        name: Some("renamed".into()),
        ..LeaseUpdateBody::default()
    };
    client.leases().update("lease-1", &update).await.unwrap();

    let deleted = client.leases().delete("lease-1").await.unwrap();
    assert_eq!(deleted.unwrap().status, lease_status::TERMINATED);
}

#[tokio::test]
async fn lease_listing_honors_filters() {
    let service = MockReservationService::start().await;
    service
        .expect_with_query(
            "/leases",
            &[("name", "api-window")],
            fixtures::envelopes::leases(vec![fixtures::lease("lease-1", "ACTIVE")]),
        )
        .await;

    let leases = service
        .client()
        .leases()
        .list(&[("name", "api-window")])
        .await
        .unwrap();

    assert_eq!(leases.len(), 1);
    assert_eq!(leases[0].id, "lease-1");
}

#[tokio::test]
async fn lease_dates_come_back_parseable() {
    let service = MockReservationService::start().await;
    service
        .expect_show(
            "/leases/lease-1",
            fixtures::envelopes::lease(fixtures::lease("lease-1", "ACTIVE")),
        )
        .await;

    let lease = service.client().leases().show("lease-1").await.unwrap();
    let span = lease.end_at().unwrap() - lease.start_at().unwrap();
    assert_eq!(span, chrono::Duration::days(1));
}

#[tokio::test]
async fn unknown_lease_is_not_found() {
    let service = MockReservationService::start().await;
    service.expect_not_found("GET", "/leases/ghost").await;

    let error = service.client().leases().show("ghost").await.unwrap_err();
    assertions::assert_not_found(&error);
}

#[tokio::test]
async fn foreign_project_lease_is_forbidden() {
    let service = MockReservationService::start().await;
    service
        .expect_forbidden("GET", "/leases/lease-42", "lease:get")
        .await;

    let error = service
        .client()
        .leases()
        .show("lease-42")
        .await
        .unwrap_err();
    assertions::assert_forbidden(&error);
}

#[tokio::test]
async fn policy_rejection_is_forbidden_with_reason() {
    let service = MockReservationService::start().await;
    service
        .expect_forbidden("DELETE", "/leases/lease-9", "lease:delete")
        .await;

    let error = service
        .client()
        .leases()
        .delete("lease-9")
        .await
        .unwrap_err();
    assertions::assert_forbidden(&error);
}
