//! Multi-component pipeline tests.
