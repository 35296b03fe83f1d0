//! Common test utilities for pkgfile integration tests.
//!
//! This module provides:
//! - `TestEnv`: isolated package, session and preferences directories plus
//!   helpers to run the `pkgfile` binary
//! - `RecordingBuilder`: a descriptor builder that only records calls
//! - Fixtures: reusable package trees

#![allow(dead_code)]

pub mod env;
pub mod fixtures;
pub mod recording;

pub use env::*;
pub use fixtures::*;
pub use recording::*;
