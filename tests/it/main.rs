//! Single test binary entry point.
//!
//! All integration-level tests compile into one binary to keep link time
//! down.
//!
//! Structure:
//! - unit: Single-component tests against the public API
//! - integration: Multi-component pipeline tests

mod helpers;
mod integration;
mod unit;
