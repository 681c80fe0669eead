//! Shared test helpers for autocompound-strategy tests.

#![allow(dead_code)]

pub mod mock_host;
pub mod setup;

pub use mock_host::*;
pub use setup::*;
