//! The `Merge` resolution strategy.
use super::conflict::{ConflictType, StyleConflict};
use super::definition::StyleDefinition;
use super::inheritance::{InheritanceResolver, StyleLookup};
use super::properties::Merge;
use crate::common::Result;

/// Builds the merged definition for a conflict, dispatching on its type.
///
/// - priority conflicts pick the higher priority, ties favor the original;
/// - inheritance conflicts field-merge but keep the `based_on` with the
///   longer resolvable chain, refusing candidates that would form a cycle;
/// - everything else is a full field merge.
pub struct StyleMerger<'a, L: StyleLookup + ?Sized> {
    styles: &'a L,
}

impl<'a, L: StyleLookup + ?Sized> StyleMerger<'a, L> {
    #[inline]
    pub fn new(styles: &'a L) -> Self {
        Self { styles }
    }

    pub fn merge(&self, conflict: &StyleConflict) -> Result<StyleDefinition> {
        let original = conflict.original();
        let new = conflict.new_style();

        let merged = match conflict.conflict_type() {
            ConflictType::Priority => {
                if conflict.new_priority() > conflict.original_priority() {
                    new.clone()
                } else {
                    original.clone()
                }
            },
            ConflictType::Inheritance => self.merge_inheritance(original, new),
            ConflictType::Property | ConflictType::Naming | ConflictType::Format => {
                original.merge(new)
            },
        };

        if let Err(e) = merged.validate() {
            tracing::warn!(style_id = %original.id(), error = %e, "merged style rejected");
            return Err(e);
        }

        Ok(merged)
    }

    fn merge_inheritance(&self, original: &StyleDefinition, new: &StyleDefinition) -> StyleDefinition {
        let resolver = InheritanceResolver::new(self.styles);
        let style_type = original.style_type();
        let id = original.id();

        let original_depth = resolver.candidate_depth(style_type, id, original.based_on());
        let new_depth = resolver.candidate_depth(style_type, id, new.based_on());

        let take_new = match (original_depth, new_depth) {
            (Some(o), Some(n)) => n > o,
            (None, Some(_)) => true,
            (_, None) => {
                tracing::warn!(
                    style_id = %id,
                    based_on = ?new.based_on(),
                    "basedOn candidate would create a cycle"
                );
                false
            },
        };

        let based_on = if take_new {
            new.based_on()
        } else {
            original.based_on()
        };

        let mut merged = original.merge(new);
        merged.set_based_on(based_on.map(str::to_string));
        merged
    }
}
