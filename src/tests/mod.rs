//! Fixtures for unit tests, doctests and benchmarks
pub mod annotations;
