//! Verification service tests and shared mocks.

pub mod mocks;

mod service_tests;
