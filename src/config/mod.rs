//! Configuration types for the ReshADX SDK.
//!
//! This module provides configuration options for:
//! - [`ClassificationConfig`]: How failed API responses are turned into errors

mod classification;

pub use classification::{ClassificationConfig, DEFAULT_DOCS_BASE_URL};
