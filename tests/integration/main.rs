//! Integration tests for the ReshADX Rust SDK.
//!
//! These tests exercise the public surface only, the way an application
//! depending on the crate would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # Include the tracing integration
//! cargo test --all-features --test integration
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod classification_tests;
mod common;
mod surface_tests;
mod taxonomy_tests;
