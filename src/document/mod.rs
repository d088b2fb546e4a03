//! Document-structure analysis.
//!
//! Works on an already-parsed, flat paragraph sequence: classifies headings,
//! splits the sequence into sections, nests the sections into an outline and
//! reorders whole sections without losing content.
//!
//! # Architecture
//!
//! - `Paragraph` / `Run`: input model handed over by the XML layer
//! - `HeadingClassifier`: pluggable heading predicate
//! - `StructureAnalyzer`: single linear pass producing `DocumentStructure`
//! - `OutlineBuilder`: arena-based outline forest over the sections
//! - `ContentReorderer`: validated, all-or-nothing section permutation
//! - `EffectiveFormatter`: style chain plus direct formatting per run
//!
//! # Example
//!
//! ```rust
//! use docmodel::document::{Paragraph, StructureAnalyzer};
//!
//! let paragraphs = vec![
//!     Paragraph::styled("Heading1", "Overview"),
//!     Paragraph::styled("Heading2", "Goals"),
//!     Paragraph::new("Ship it."),
//!     Paragraph::styled("Heading1", "Plan"),
//! ];
//!
//! let structure = StructureAnalyzer::default().analyze(&paragraphs);
//! let outline = structure.outline();
//! assert_eq!(outline.roots().count(), 2);
//! println!("{}", outline);
//! ```
pub mod classify;
pub mod effective;
pub mod outline;
pub mod paragraph;
pub mod reorder;
pub mod structure;

pub use classify::{HeadingClassifier, OutlineLevelClassifier, StyleNameClassifier};
pub use effective::EffectiveFormatter;
pub use outline::{Outline, OutlineBuilder, OutlineEntry};
pub use paragraph::{Paragraph, Run};
pub use reorder::ContentReorderer;
pub use structure::{DocumentStructure, Section, StructureAnalyzer};
