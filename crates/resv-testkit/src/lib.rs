//! Test support for the reservation client.
//!
//! Bundles what the integration and conformance suites keep reaching for:
//!
//! - [`MockReservationService`] - a wiremock server speaking the service's
//!   envelope dialect
//! - [`fixtures`] - canonical JSON bodies for leases, inventory, and faults
//! - [`ScenarioContext`] - lease bookkeeping with recorded operations and
//!   tolerant teardown
//! - [`assertions`] - panic-with-context checks for the error taxonomy
//! - [`init_test_tracing`] - opt-in log capture for debugging test runs

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod assertions;
pub mod fixtures;
mod mock_service;
mod scenario;
mod tracing_config;

pub use mock_service::{MockReservationService, SequenceResponder};
pub use scenario::{
    FAR_FUTURE_END, FAR_FUTURE_START, RecordedOperation, ScenarioContext, far_future_lease,
    find_host_allocation, lease_for_next_minutes, rand_name,
};
pub use tracing_config::{init_test_tracing, init_test_tracing_with_filter};
