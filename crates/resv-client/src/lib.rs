//! Async client for the lease-based resource reservation API.
//!
//! The reservation service schedules time-bounded claims (leases) against
//! physical hosts, devices, networks, and floating IPs. This crate maps that
//! REST surface onto typed operations and provides the polling waiters used
//! to follow a lease through its lifecycle:
//!
//! - [`ReservationClient`] - entry point; hands out one typed client per
//!   resource collection
//! - [`waiter`] helpers - bounded polling until a resource reaches a target
//!   status, disappears, or hits a fatal state
//! - [`times`] helpers - the service's two timestamp formats and the `"now"`
//!   start sentinel
//!
//! All business logic (admission control, conflict resolution, the lease
//! state machine) lives in the remote service; this crate only observes it.
//! Requests are single-shot: nothing here retries on failure.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod client;
mod config;
mod devices;
mod error;
mod floatingips;
mod hosts;
mod leases;
mod networks;
mod rest;
pub mod times;
mod types;
pub mod waiter;

pub use client::ReservationClient;
pub use config::{ClientConfig, PollingConfig};
pub use devices::DevicesClient;
pub use error::{ReservationError, ReservationResult};
pub use floatingips::FloatingIpsClient;
pub use hosts::HostsClient;
pub use leases::LeasesClient;
pub use networks::NetworksClient;
pub use rest::RestClient;
pub use types::*;
pub use waiter::HasStatus;
