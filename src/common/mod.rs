//! Common types shared across the style and document subsystems.

// Submodule declarations
pub mod error;

// Re-exports for convenience
pub use error::{Error, Result};
