//! Shared HTTP transport for the resource-specific clients.
//!
//! Wraps a [`reqwest::Client`] with the service's conventions: JSON in and
//! out, `X-Auth-Token` authentication, and single-key error envelopes.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{ReservationError, ReservationResult};

const AUTH_HEADER: &str = "X-Auth-Token";

/// Low-level client shared by every resource family.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RestClient {
    /// Build a transport from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::Http`] if the underlying client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig) -> ReservationResult<Self> {
        Self::with_endpoint(
            config.endpoint.clone(),
            config.auth_token.clone(),
            config.timeout,
        )
    }

    /// Build a transport against an explicit endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::Http`] if the underlying client cannot be
    /// constructed.
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> ReservationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("resv-client/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: endpoint.into().trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    /// Endpoint this transport targets, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {path}` with optional query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status differs from
    /// `expected`, or the body does not decode as `R`.
    #[instrument(skip(self))]
    pub async fn get<R>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        expected: StatusCode,
    ) -> ReservationResult<R>
    where
        R: DeserializeOwned,
    {
        let mut request = self.client.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.apply_auth(request).send().await?;
        Self::handle(path, expected, response).await
    }

    /// `POST {path}` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status differs from
    /// `expected`, or the body does not decode as `R`.
    #[instrument(skip(self, body))]
    pub async fn post<B, R>(
        &self,
        path: &str,
        body: &B,
        expected: StatusCode,
    ) -> ReservationResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        let response = self.apply_auth(request).send().await?;
        Self::handle(path, expected, response).await
    }

    /// `PUT {path}` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status differs from
    /// `expected`, or the body does not decode as `R`.
    #[instrument(skip(self, body))]
    pub async fn put<B, R>(
        &self,
        path: &str,
        body: &B,
        expected: StatusCode,
    ) -> ReservationResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let request = self.client.put(self.url(path)).json(body);
        let response = self.apply_auth(request).send().await?;
        Self::handle(path, expected, response).await
    }

    /// `DELETE {path}`.
    ///
    /// Returns `Ok(None)` when the service answers with an empty body, and
    /// the decoded body otherwise. Lease deletion echoes the deleted lease
    /// back; most other resources answer `204 No Content`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status differs from
    /// `expected`, or a non-empty body does not decode as `R`.
    #[instrument(skip(self))]
    pub async fn delete<R>(&self, path: &str, expected: StatusCode) -> ReservationResult<Option<R>>
    where
        R: DeserializeOwned,
    {
        let request = self.client.delete(self.url(path));
        let response = self.apply_auth(request).send().await?;

        let status = response.status();
        let body = response.bytes().await?;
        if status != expected {
            warn!(path, got = %status, expected = %expected, "delete rejected");
            return Err(Self::status_error(path, expected, status, &body));
        }

        debug!(path, status = %status, "delete completed");
        if body.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&body)?))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header(AUTH_HEADER, token),
            None => request,
        }
    }

    async fn handle<R>(
        path: &str,
        expected: StatusCode,
        response: reqwest::Response,
    ) -> ReservationResult<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        let body = response.bytes().await?;

        if status != expected {
            warn!(path, got = %status, expected = %expected, "request rejected");
            return Err(Self::status_error(path, expected, status, &body));
        }

        debug!(path, status = %status, bytes = body.len(), "request completed");
        Ok(serde_json::from_slice(&body)?)
    }

    fn status_error(
        path: &str,
        expected: StatusCode,
        got: StatusCode,
        body: &[u8],
    ) -> ReservationError {
        match got {
            StatusCode::NOT_FOUND => ReservationError::NotFound {
                resource: path.to_string(),
            },
            StatusCode::FORBIDDEN => ReservationError::Forbidden {
                message: error_message(body),
            },
            _ => ReservationError::UnexpectedStatus {
                expected: expected.as_u16(),
                got: got.as_u16(),
                body: error_message(body),
            },
        }
    }
}

/// Pull a human-readable message out of a service error body.
///
/// The service wraps faults inconsistently: some endpoints emit
/// `{"error_message": ...}`, some `{"faultstring": ...}`, and some nest a
/// `message` inside a single-key envelope. Fall back to the raw text.
fn error_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for key in ["error_message", "message", "faultstring"] {
            if let Some(message) = value.get(key).and_then(serde_json::Value::as_str) {
                return message.to_string();
            }
        }
        if let Some(object) = value.as_object() {
            if object.len() == 1 {
                if let Some(message) = object
                    .values()
                    .next()
                    .and_then(|inner| inner.get("message"))
                    .and_then(serde_json::Value::as_str)
                {
                    return message.to_string();
                }
            }
        }
    }

    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        "(empty body)".to_string()
    } else {
        trimmed.to_string()
    }
}
