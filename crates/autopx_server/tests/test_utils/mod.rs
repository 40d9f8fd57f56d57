//! Test doubles for the action layer.

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::{MockBackend, MockPlatform, studio};
