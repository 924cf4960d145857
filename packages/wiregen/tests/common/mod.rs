//! Common test utilities for wiregen
//!
//! Shared source fixtures and pipeline helpers for the integration tests.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;
