//! Common utilities for hydra
//!
//! This crate provides the error type and message sanitization shared by all hydra crates.

pub mod error;
pub mod sanitize;

pub use error::{json_type_name, ErrorKind, HydraError, Result};
pub use sanitize::sanitize_error;
