//! Shared helpers for the test targets.

// Each test target uses a different subset of the fixtures
#![allow(dead_code)]

pub mod fixtures;
