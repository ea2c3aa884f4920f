//! Wiremock wrapper speaking the reservation service's envelope dialect.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use resv_client::{PollingConfig, ReservationClient};
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use crate::fixtures;

/// Polling cadence tight enough for tests; the service defaults would make
/// every lifecycle test wait ten seconds per poll.
const TEST_INTERVAL: Duration = Duration::from_millis(5);
const TEST_TIMEOUT: Duration = Duration::from_millis(250);

/// A mock reservation endpoint with helpers for the common expectations.
pub struct MockReservationService {
    server: MockServer,
}

impl MockReservationService {
    /// Boot a fresh mock service on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Escape hatch for expectations these helpers do not cover.
    #[must_use]
    pub const fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Client pointed at this service with test-tightened polling.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be constructed, which means the test
    /// process itself is broken.
    #[must_use]
    pub fn client(&self) -> ReservationClient {
        ReservationClient::with_base_url(self.base_url())
            .expect("client construction against mock service")
            .with_polling(PollingConfig {
                lease_interval: TEST_INTERVAL,
                lease_end_timeout: TEST_TIMEOUT,
            })
    }

    /// `GET {collection}` answering `200` with the given body.
    pub async fn expect_list(&self, collection: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(collection))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `GET {resource_path}` answering `200` with the given body.
    pub async fn expect_show(&self, resource_path: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(resource_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `GET {resource_path}` with required query parameters.
    pub async fn expect_with_query(
        &self,
        resource_path: &str,
        params: &[(&str, &str)],
        body: Value,
    ) {
        let mut mock = Mock::given(method("GET")).and(path(resource_path));
        for (key, value) in params {
            mock = mock.and(query_param(*key, *value));
        }
        mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `POST {collection}` answering `201` with the given body.
    pub async fn expect_created(&self, collection: &str, body: Value) {
        Mock::given(method("POST"))
            .and(path(collection))
            .respond_with(ResponseTemplate::new(201).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `PUT {resource_path}` answering `200` with the given body.
    pub async fn expect_updated(&self, resource_path: &str, body: Value) {
        Mock::given(method("PUT"))
            .and(path(resource_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `DELETE {resource_path}` answering `200`, echoing `body` when given.
    pub async fn expect_deleted(&self, resource_path: &str, body: Option<Value>) {
        let template = match body {
            Some(value) => ResponseTemplate::new(200).set_body_json(value),
            None => ResponseTemplate::new(200),
        };
        Mock::given(method("DELETE"))
            .and(path(resource_path))
            .respond_with(template)
            .mount(&self.server)
            .await;
    }

    /// Arbitrary method and status for fault-path expectations.
    pub async fn expect_status(&self, verb: &str, resource_path: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(resource_path))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `{verb} {resource_path}` answering the service's `404` shape.
    pub async fn expect_not_found(&self, verb: &str, resource_path: &str) {
        self.expect_status(verb, resource_path, 404, fixtures::json::not_found(resource_path))
            .await;
    }

    /// `{verb} {resource_path}` answering the service's `403` shape.
    pub async fn expect_forbidden(&self, verb: &str, resource_path: &str, action: &str) {
        self.expect_status(verb, resource_path, 403, fixtures::json::forbidden(action))
            .await;
    }

    /// `GET {resource_path}` replaying scripted responses, repeating the last.
    pub async fn expect_show_sequence(
        &self,
        resource_path: &str,
        responses: Vec<ResponseTemplate>,
    ) {
        Mock::given(method("GET"))
            .and(path(resource_path))
            .respond_with(SequenceResponder::new(responses))
            .mount(&self.server)
            .await;
    }

    /// `GET /leases/{id}` walking the lease through the given statuses, one
    /// per poll, holding the final status afterwards.
    pub async fn expect_lease_statuses(&self, lease_id: &str, statuses: &[&str]) {
        let responses = statuses
            .iter()
            .map(|status| {
                ResponseTemplate::new(200)
                    .set_body_json(fixtures::envelopes::lease(fixtures::lease(lease_id, status)))
            })
            .collect();
        self.expect_show_sequence(&format!("/leases/{lease_id}"), responses)
            .await;
    }

    /// Like [`Self::expect_lease_statuses`], but the lease disappears after
    /// the last status; further polls see `404`.
    pub async fn expect_lease_statuses_then_gone(&self, lease_id: &str, statuses: &[&str]) {
        let resource_path = format!("/leases/{lease_id}");
        let mut responses: Vec<ResponseTemplate> = statuses
            .iter()
            .map(|status| {
                ResponseTemplate::new(200)
                    .set_body_json(fixtures::envelopes::lease(fixtures::lease(lease_id, status)))
            })
            .collect();
        responses.push(
            ResponseTemplate::new(404).set_body_json(fixtures::json::not_found(&resource_path)),
        );
        self.expect_show_sequence(&resource_path, responses).await;
    }

    /// Number of requests that hit the given path, regardless of method.
    ///
    /// # Panics
    ///
    /// Panics if request recording was disabled on the inner server.
    pub async fn request_count(&self, resource_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .expect("request recording enabled")
            .iter()
            .filter(|request| request.url.path() == resource_path)
            .count()
    }

    /// # Panics
    ///
    /// Panics if the path saw a different number of requests.
    pub async fn assert_request_count(&self, resource_path: &str, expected: usize) {
        let actual = self.request_count(resource_path).await;
        assert_eq!(
            actual, expected,
            "expected {expected} requests on {resource_path}, saw {actual}"
        );
    }

    /// # Panics
    ///
    /// Panics if anything reached the service at all.
    pub async fn assert_no_requests(&self) {
        let received = self
            .server
            .received_requests()
            .await
            .expect("request recording enabled");
        assert!(
            received.is_empty(),
            "expected no requests, saw {}",
            received.len()
        );
    }

    /// Drop all mounted expectations and recorded requests.
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}

/// Replays a scripted series of responses, repeating the last one forever.
///
/// Mounting several single-use mocks with priorities looks equivalent but is
/// not: an exhausted expectation keeps matching. Advancing an index inside
/// the responder sidesteps that.
pub struct SequenceResponder {
    responses: Vec<ResponseTemplate>,
    position: Arc<AtomicUsize>,
}

impl SequenceResponder {
    /// # Panics
    ///
    /// Panics if `responses` is empty.
    #[must_use]
    pub fn new(responses: Vec<ResponseTemplate>) -> Self {
        assert!(!responses.is_empty(), "sequence needs at least one response");
        Self {
            responses,
            position: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Respond for SequenceResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let index = self
            .position
            .fetch_add(1, Ordering::SeqCst)
            .min(self.responses.len() - 1);
        self.responses[index].clone()
    }
}
