//! Style model, inheritance and conflict resolution.
//!
//! Styles live in five namespaces (paragraph, character, table, numbering,
//! list). A style may be `basedOn` another; the registry resolves those chains
//! with cycle detection and folds them into effective properties. Registering
//! an id that already exists raises a conflict settled by a configurable
//! strategy instead of silently overwriting.
//!
//! # Architecture
//!
//! - `StyleRegistry`: thread-safe store keyed by (type, id)
//! - `InheritanceResolver`: cycle-safe `basedOn` walk over any `StyleLookup`
//! - `ConflictResolver` / `StyleMerger`: collision handling per strategy
//! - `StyleProperties` and the `Merge` trait: field-level merge policy
//!
//! # Example
//!
//! ```rust
//! use docmodel::style::{
//!     FontProperties, ResolutionStrategy, StyleDefinition, StyleProperties, StyleRegistry,
//!     StyleType,
//! };
//!
//! let registry = StyleRegistry::with_strategy(ResolutionStrategy::Merge);
//! let arial = StyleProperties::default().with_font(FontProperties {
//!     name: Some("Arial".to_string()),
//!     ..Default::default()
//! });
//! let bold = StyleProperties::default().with_font(FontProperties {
//!     bold: Some(true),
//!     ..Default::default()
//! });
//!
//! registry.add_style(StyleDefinition::new("Body", "Body", StyleType::Paragraph).with_properties(arial))?;
//! registry.add_style(StyleDefinition::new("Body", "Body", StyleType::Paragraph).with_properties(bold))?;
//!
//! let font = registry
//!     .get_style(StyleType::Paragraph, "Body")
//!     .and_then(|style| style.properties().font.clone())
//!     .unwrap_or_default();
//! assert_eq!(font.name.as_deref(), Some("Arial"));
//! assert_eq!(font.bold, Some(true));
//! # Ok::<(), docmodel::Error>(())
//! ```
pub mod builtin;
pub mod conflict;
pub mod definition;
pub mod enums;
pub mod inheritance;
pub mod merger;
pub mod properties;
pub mod registry;

pub use builtin::is_builtin_style_id;
pub use conflict::{
    ConflictDecision, ConflictOutcome, ConflictResolver, ConflictStatus, ConflictType,
    ResolutionStrategy, StyleConflict,
};
pub use definition::StyleDefinition;
pub use enums::{Alignment, ListKind, StyleCategory, StyleFlag, StyleFlags, StyleType};
pub use inheritance::{ChainLink, ChainResolution, InheritanceResolver, StyleLookup};
pub use merger::StyleMerger;
pub use properties::{
    FontProperties, ListLevel, ListProperties, Merge, NumberingProperties, ParagraphProperties,
    StyleProperties, TableProperties,
};
pub use registry::{StyleRegistry, StyleSummary};
