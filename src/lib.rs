//! Docmodel - style resolution and document-structure analysis for
//! WordprocessingML document models
//!
//! This library works on documents that have already been parsed into
//! paragraphs, runs and style definitions. It does not read or write files.
//!
//! # Features
//!
//! - **Style registry**: Paragraph, character, table, numbering and list
//!   styles keyed by (type, id), shareable across threads
//! - **Inheritance**: Cycle-safe `basedOn` chain resolution with cached chains
//!   and effective property folding
//! - **Conflict resolution**: Keep-original, use-newer, field-level merge and
//!   deferred user choice for colliding registrations
//! - **Structure analysis**: Heading classification, sections and an outline
//!   tree over a flat paragraph sequence
//! - **Reordering**: Lossless, all-or-nothing section permutation
//!
//! # Example - Style inheritance
//!
//! ```rust
//! use docmodel::style::{FontProperties, StyleDefinition, StyleProperties, StyleRegistry, StyleType};
//!
//! # fn main() -> docmodel::Result<()> {
//! let registry = StyleRegistry::new();
//! registry.add_paragraph_style(
//!     StyleDefinition::new("Normal", "Normal", StyleType::Paragraph).with_properties(
//!         StyleProperties::default().with_font(FontProperties {
//!             name: Some("Calibri".to_string()),
//!             size: Some(22),
//!             ..Default::default()
//!         }),
//!     ),
//! )?;
//! registry.add_paragraph_style(
//!     StyleDefinition::new("Heading1", "heading 1", StyleType::Paragraph)
//!         .with_based_on("Normal")
//!         .with_properties(StyleProperties::default().with_font(FontProperties {
//!             size: Some(32),
//!             ..Default::default()
//!         })),
//! )?;
//!
//! let font = registry
//!     .effective_properties(StyleType::Paragraph, "Heading1")?
//!     .font
//!     .unwrap_or_default();
//! assert_eq!(font.name.as_deref(), Some("Calibri"));
//! assert_eq!(font.size, Some(32));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Sections and outline
//!
//! ```rust
//! use docmodel::document::{ContentReorderer, Paragraph, StructureAnalyzer};
//!
//! # fn main() -> docmodel::Result<()> {
//! let mut paragraphs = vec![
//!     Paragraph::styled("Heading1", "Intro"),
//!     Paragraph::styled("Normal", "Body1"),
//!     Paragraph::styled("Heading1", "Chapter2"),
//!     Paragraph::styled("Normal", "Body2"),
//! ];
//!
//! let analyzer = StructureAnalyzer::default();
//! let structure = analyzer.analyze(&paragraphs);
//! for section in structure.sections() {
//!     println!("{} {} ({} paragraphs)", section.id, section.title, section.len());
//! }
//!
//! // Move the second chapter to the front
//! let structure = ContentReorderer::new(&analyzer)
//!     .reorder(&mut paragraphs, &structure, &["section_2", "section_1"])?;
//! assert_eq!(structure.sections()[0].title, "Chapter2");
//! # Ok(())
//! # }
//! ```

/// Common types shared across the crate
pub mod common;

/// Engine configuration (YAML-loadable)
pub mod config;

/// Document-structure analysis: sections, outline and reordering
pub mod document;

/// Style model, registry, inheritance and conflict resolution
pub mod style;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use config::{AnalyzerOptions, EngineConfig};
pub use document::{DocumentStructure, Paragraph, Run, StructureAnalyzer};
pub use style::{ResolutionStrategy, StyleDefinition, StyleRegistry, StyleType};
