//! Library-level integration tests.

pub mod client_test;
