//! Unit tests against the public API.

mod gate_tests;
mod measure_tests;
mod transform_tests;
mod util_tests;
mod view_tests;
