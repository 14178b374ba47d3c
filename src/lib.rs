//! Deterministic risk-rule engine for prioritizing corporate tax-audit targets.
//!
//! The `screening` module holds the engine proper: field resolution,
//! predicate evaluation, the built-in and custom rule sets, and batch
//! screening over a full dataset. `ingest` loads datasets for the CLI;
//! upstream services are expected to hand the engine plain structured data.

pub mod config;
pub mod error;
pub mod ingest;
pub mod screening;
pub mod telemetry;
