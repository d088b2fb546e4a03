//! Unified error types for the document model.
//!
//! Registry and resolver operations surface these to the caller. Structure
//! analysis never fails; the reorderer fails closed with `InvalidReorderSet`.
use crate::style::{ResolutionStrategy, StyleType};
use thiserror::Error;

/// Main error type for docmodel operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No style registered under the given id in the given namespace
    #[error("Style not found: {style_type} '{id}'")]
    StyleNotFound { style_type: StyleType, id: String },

    /// A conflict for this id is still waiting for an external decision
    #[error("Duplicate style id: {style_type} '{id}' has an unresolved conflict")]
    DuplicateStyleId { style_type: StyleType, id: String },

    /// Style definition failed validation
    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    /// The basedOn graph loops back on itself; `chain` is the truncated walk
    #[error("Inheritance cycle detected at '{id}' (chain: {})", .chain.join(" -> "))]
    InheritanceCycleDetected { id: String, chain: Vec<String> },

    /// A colliding registration was not applied under the active strategy
    #[error("Conflict for style '{id}' not applied (strategy: {strategy})")]
    ConflictUnresolved {
        id: String,
        strategy: ResolutionStrategy,
    },

    /// The requested section order is not a permutation of the current sections
    #[error("Invalid reorder set: {0}")]
    InvalidReorderSet(String),

    /// No section with the given id or title
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error is a recoverable "not applied" signal rather than a
    /// hard failure.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ConflictUnresolved { .. } | Error::InheritanceCycleDetected { .. }
        )
    }

    /// The truncated chain carried by an `InheritanceCycleDetected` error.
    pub fn partial_chain(&self) -> Option<&[String]> {
        match self {
            Error::InheritanceCycleDetected { chain, .. } => Some(chain),
            _ => None,
        }
    }
}

/// Result type for docmodel operations.
pub type Result<T> = std::result::Result<T, Error>;
