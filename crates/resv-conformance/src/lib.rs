//! Conformance checks for a lease reservation deployment.
//!
//! The library half carries what the suites share: the runtime configuration
//! ([`SuiteConfig`]), the compute-side glue for booting onto reservations
//! ([`ComputeClient`]), and the static image check table ([`image_checks`]).
//! The checks themselves live under `tests/` and run against either a real
//! deployment or the mock service from `resv-testkit`.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod checks;
mod compute;
mod config;

pub use checks::{ImageCheck, image_checks};
pub use compute::{ComputeClient, NO_VALID_HOST, SPAWNING_TASK, Server, ServerFault};
pub use config::{PluginToggles, SuiteConfig};
