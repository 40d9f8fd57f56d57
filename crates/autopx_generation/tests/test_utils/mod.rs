//! Test utilities for generation tests.

pub mod mock_backend;

#[allow(unused_imports)]
pub use mock_backend::{MockBackend, MockResponse};
