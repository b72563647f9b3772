//! # Access History Pipeline
//!
//! Turns the order and access-log records of one asset into the artifacts a
//! history view renders: the canonical event list, the ranked-actor table and
//! plot coordinates.
//!
//! ## Architecture
//!
//! 1. **Normalizer**: raw orders and access-log rows → canonical events
//! 2. **Resolver** (`access-history-resolver`): actor address → display name
//! 3. **Aggregator**: canonical events → ranked actors
//! 4. **Range filter**: brush window → visible events
//! 5. **Projection**: events and ranked actors → bars, points and scales
//! 6. **View**: coordinates one load of an asset and guards against stale loads
//!
//! The [`access`] module holds the caller-owned grant/revoke registry used by
//! the access management panel.

pub mod access;
pub mod aggregator;
pub mod errors;
pub mod normalizer;
pub mod projection;
pub mod range_filter;
pub mod view;

pub use errors::{AccessError, ViewError};
