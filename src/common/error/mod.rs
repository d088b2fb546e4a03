//! Unified error types for docmodel.
//!
//! This module provides a single error type shared by the style subsystem and
//! the document-structure subsystem, presenting a consistent API to users.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
