//! Consolidated reporting engine for recruitment profiles, clients, and candidates.
//!
//! Three loosely-consistent feeds are normalized, cross-linked, aggregated, and
//! projected into a single [`reports::ConsolidatedView`] that presentation layers
//! consume read-only.

pub mod config;
pub mod error;
pub mod reports;
pub mod telemetry;
