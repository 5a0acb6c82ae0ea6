//! Prelude module for convenient imports.
//!
//! ```rust
//! use reshadx::prelude::*;
//!
//! let err = Error::not_found("institution ins_unknown not found");
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! ```

pub use crate::{
    config::ClassificationConfig,
    error::{Classifier, Error, ErrorContext, ErrorKind, ReshADXError, Result},
    version::VERSION,
};
