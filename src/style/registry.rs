//! The style registry.
//!
//! Holds every registered [`StyleDefinition`] keyed by (type, id), the cache
//! of resolved `basedOn` chains, and the history of id collisions. State sits
//! behind a single `parking_lot::RwLock`: lookups share the lock, adds take it
//! exclusively, so the registry can be shared across threads through an `Arc`.
use super::conflict::{
    ConflictDecision, ConflictOutcome, ConflictResolver, ResolutionStrategy, StyleConflict,
};
use super::definition::StyleDefinition;
use super::enums::StyleType;
use super::inheritance::{ChainResolution, InheritanceResolver, StyleLookup};
use super::properties::{Merge, StyleProperties};
use crate::common::{Error, Result};
use crate::config::EngineConfig;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Default)]
struct RegistryState {
    /// One namespace per style type, indexed by `StyleType::index`
    styles: [BTreeMap<String, StyleDefinition>; StyleType::COUNT],
    /// Acyclic chains only
    chains: HashMap<(StyleType, String), ChainResolution>,
    conflicts: Vec<StyleConflict>,
    strategy: ResolutionStrategy,
}

impl StyleLookup for RegistryState {
    #[inline]
    fn lookup(&self, style_type: StyleType, id: &str) -> Option<&StyleDefinition> {
        self.styles[style_type.index()].get(id)
    }

    fn style_count(&self) -> usize {
        self.styles.iter().map(BTreeMap::len).sum()
    }
}

impl RegistryState {
    fn store(&mut self, definition: StyleDefinition) {
        let style_type = definition.style_type();
        let id = definition.id().to_string();
        self.styles[style_type.index()].insert(id.clone(), definition);

        // Drop every chain that passes through the id in any namespace or
        // dangles on it
        let mut stale: Vec<(StyleType, String)> = self
            .chains
            .iter()
            .filter(|(_, chain)| {
                chain.dangling() == Some(id.as_str()) || chain.links().iter().any(|link| link.id == id)
            })
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            self.chains.remove(key);
        }

        let added = (style_type, id);
        if !stale.contains(&added) {
            stale.push(added);
        }

        for (style_type, id) in stale {
            self.cache_chain(style_type, id);
        }
    }

    fn cache_chain(&mut self, style_type: StyleType, id: String) {
        let resolved = InheritanceResolver::new(&*self).resolve(style_type, &id);
        match resolved {
            Ok(chain) if !chain.is_cyclic() => {
                tracing::debug!(style_id = %id, depth = chain.len(), "inheritance chain cached");
                self.chains.insert((style_type, id), chain);
            },
            Ok(_) => {},
            Err(e) => tracing::debug!(style_id = %id, error = %e, "chain not cached"),
        }
    }

    fn chain(&self, style_type: StyleType, id: &str) -> Result<ChainResolution> {
        match self.chains.get(&(style_type, id.to_string())) {
            Some(chain) => Ok(chain.clone()),
            None => InheritanceResolver::new(self).resolve(style_type, id),
        }
    }

    fn pending_index(&self, style_type: StyleType, id: &str) -> Option<usize> {
        self.conflicts
            .iter()
            .position(|conflict| conflict.is_pending() && conflict.concerns(style_type, id))
    }
}

/// Registry of style definitions with cycle-safe inheritance and conflict
/// resolution.
///
/// # Examples
///
/// ```rust
/// use docmodel::style::{StyleDefinition, StyleRegistry, StyleType};
///
/// let registry = StyleRegistry::new();
/// registry.add_paragraph_style(StyleDefinition::new("Normal", "Normal", StyleType::Paragraph))?;
/// registry.add_paragraph_style(
///     StyleDefinition::new("Heading1", "heading 1", StyleType::Paragraph).with_based_on("Normal"),
/// )?;
///
/// let chain = registry.inheritance_chain(StyleType::Paragraph, "Heading1")?;
/// assert_eq!(chain, ["Heading1", "Normal"]);
/// # Ok::<(), docmodel::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct StyleRegistry {
    state: RwLock<RegistryState>,
}

impl StyleRegistry {
    /// Create an empty registry using the default (`Merge`) strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given resolution strategy.
    pub fn with_strategy(strategy: ResolutionStrategy) -> Self {
        let registry = Self::default();
        registry.set_strategy(strategy);
        registry
    }

    /// Create an empty registry configured from `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_strategy(config.resolution_strategy)
    }

    #[inline]
    pub fn strategy(&self) -> ResolutionStrategy {
        self.state.read().strategy
    }

    /// Change the strategy used for future collisions.
    pub fn set_strategy(&self, strategy: ResolutionStrategy) {
        self.state.write().strategy = strategy;
    }

    /// Register a style definition.
    ///
    /// A collision with a registered (type, id) is resolved under the active
    /// strategy. `ConflictUnresolved` reports a definition that was not
    /// applied (kept original, or deferred for a user decision); it is
    /// recoverable and the registry is left consistent.
    pub fn add_style(&self, definition: StyleDefinition) -> Result<()> {
        definition.validate()?;

        let style_type = definition.style_type();
        let id = definition.id().to_string();
        let mut state = self.state.write();

        if state.pending_index(style_type, &id).is_some() {
            return Err(Error::DuplicateStyleId { style_type, id });
        }

        let Some(original) = state.lookup(style_type, &id).cloned() else {
            tracing::debug!(style_id = %id, style_type = %style_type, "style registered");
            state.store(definition);
            return Ok(());
        };

        let strategy = state.strategy;
        let mut conflict = StyleConflict::new(original, definition, strategy);
        let resolved = ConflictResolver::new(&*state, strategy).resolve(&mut conflict);
        state.conflicts.push(conflict);
        let outcome = resolved?;

        if let Some(resolved) = outcome.into_result(&id, strategy)? {
            state.store(resolved);
        }
        Ok(())
    }

    /// Register a paragraph style, forcing the paragraph namespace.
    pub fn add_paragraph_style(&self, definition: StyleDefinition) -> Result<()> {
        self.add_typed(definition, StyleType::Paragraph)
    }

    /// Register a character style, forcing the character namespace.
    pub fn add_character_style(&self, definition: StyleDefinition) -> Result<()> {
        self.add_typed(definition, StyleType::Character)
    }

    /// Register a table style, forcing the table namespace.
    pub fn add_table_style(&self, definition: StyleDefinition) -> Result<()> {
        self.add_typed(definition, StyleType::Table)
    }

    /// Register a numbering style, forcing the numbering namespace.
    pub fn add_numbering_style(&self, definition: StyleDefinition) -> Result<()> {
        self.add_typed(definition, StyleType::Numbering)
    }

    /// Register a list style, forcing the list namespace.
    pub fn add_list_style(&self, definition: StyleDefinition) -> Result<()> {
        self.add_typed(definition, StyleType::List)
    }

    fn add_typed(&self, mut definition: StyleDefinition, style_type: StyleType) -> Result<()> {
        definition.style_type = style_type;
        self.add_style(definition)
    }

    /// Settle a conflict left pending under `UserChoice`.
    pub fn resolve_pending(&self, style_type: StyleType, id: &str, decision: ConflictDecision) -> Result<()> {
        let mut state = self.state.write();
        let Some(index) = state.pending_index(style_type, id) else {
            return Err(Error::InvalidStyle(format!(
                "no pending conflict for {} style '{}'",
                style_type, id
            )));
        };

        let mut conflict = state.conflicts[index].clone();
        let outcome = ConflictResolver::new(&*state, state.strategy).decide(&mut conflict, decision)?;
        state.conflicts[index] = conflict;

        if let ConflictOutcome::Apply(resolved) = outcome {
            state.store(resolved);
        }
        Ok(())
    }

    /// Get a style by type and id.
    pub fn get_style(&self, style_type: StyleType, id: &str) -> Option<StyleDefinition> {
        self.state.read().lookup(style_type, id).cloned()
    }

    /// Find a style by id in any namespace.
    ///
    /// Namespaces are searched in paragraph, character, table, numbering,
    /// list order.
    pub fn find_style(&self, id: &str) -> Option<StyleDefinition> {
        let state = self.state.read();
        StyleType::ALL
            .iter()
            .find_map(|&style_type| state.lookup(style_type, id))
            .cloned()
    }

    /// Find a style by UI name or alias, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<StyleDefinition> {
        let needle = name.to_lowercase();
        let state = self.state.read();
        state
            .styles
            .iter()
            .flat_map(BTreeMap::values)
            .find(|style| {
                style.name().to_lowercase() == needle
                    || style.aliases().iter().any(|alias| alias.to_lowercase() == needle)
            })
            .cloned()
    }

    #[inline]
    pub fn contains(&self, style_type: StyleType, id: &str) -> bool {
        self.state.read().lookup(style_type, id).is_some()
    }

    /// Total number of registered styles.
    pub fn len(&self) -> usize {
        self.state.read().style_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All styles of one type, ordered by id.
    pub fn styles_of_type(&self, style_type: StyleType) -> Vec<StyleDefinition> {
        self.state.read().styles[style_type.index()]
            .values()
            .cloned()
            .collect()
    }

    /// Resolve the `basedOn` chain of a style, most specific first.
    ///
    /// Fails with `InheritanceCycleDetected` carrying the truncated chain when
    /// the chain loops.
    pub fn inheritance_chain(&self, style_type: StyleType, id: &str) -> Result<Vec<String>> {
        self.state.read().chain(style_type, id)?.into_result()
    }

    /// Detailed chain resolution (links, dangling root, cycle point).
    pub fn resolve_chain(&self, style_type: StyleType, id: &str) -> Result<ChainResolution> {
        self.state.read().chain(style_type, id)
    }

    /// Properties of a style with its whole `basedOn` chain applied, root
    /// first.
    ///
    /// A cycle is not fatal here: the truncated chain is folded.
    pub fn effective_properties(&self, style_type: StyleType, id: &str) -> Result<StyleProperties> {
        let state = self.state.read();
        let chain = state.chain(style_type, id)?;

        if let Some(at) = chain.cycle_at() {
            tracing::warn!(style_id = %id, cycle_at = %at, "folding truncated inheritance chain");
        }

        let properties = chain
            .links()
            .iter()
            .rev()
            .filter_map(|link| state.lookup(link.style_type, &link.id))
            .fold(StyleProperties::default(), |acc, style| acc.merge(style.properties()));

        Ok(properties)
    }

    /// Style of the paragraph following one in `id`.
    ///
    /// Falls back to the style itself when `next` is unset or unresolvable.
    pub fn next_style(&self, style_type: StyleType, id: &str) -> Option<StyleDefinition> {
        let state = self.state.read();
        let style = state.lookup(style_type, id)?;
        style
            .next()
            .and_then(|next| state.lookup(style_type, next))
            .or(Some(style))
            .cloned()
    }

    /// Linked companion of a paragraph or character style.
    pub fn linked_style(&self, style_type: StyleType, id: &str) -> Option<StyleDefinition> {
        let state = self.state.read();
        let link = state.lookup(style_type, id)?.link()?;
        state.lookup(style_type.linked()?, link).cloned()
    }

    /// Every conflict seen so far, oldest first.
    pub fn conflicts(&self) -> Vec<StyleConflict> {
        self.state.read().conflicts.clone()
    }

    /// Conflicts awaiting an external decision.
    pub fn pending_conflicts(&self) -> Vec<StyleConflict> {
        self.state
            .read()
            .conflicts
            .iter()
            .filter(|conflict| conflict.is_pending())
            .cloned()
            .collect()
    }

    /// Snapshot of the registry contents.
    pub fn summary(&self) -> StyleSummary {
        let state = self.state.read();
        let mut counts = [0; StyleType::COUNT];
        for style_type in StyleType::ALL {
            counts[style_type.index()] = state.styles[style_type.index()].len();
        }

        StyleSummary {
            counts,
            cached_chains: state.chains.len(),
            conflicts: state.conflicts.len(),
            pending: state.conflicts.iter().filter(|c| c.is_pending()).count(),
        }
    }
}

/// Counts describing a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSummary {
    counts: [usize; StyleType::COUNT],
    pub cached_chains: usize,
    pub conflicts: usize,
    pub pending: usize,
}

impl StyleSummary {
    #[inline]
    pub fn count(&self, style_type: StyleType) -> usize {
        self.counts[style_type.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl fmt::Display for StyleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} styles (", self.total())?;
        for (i, style_type) in StyleType::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", style_type.to_xml(), self.count(*style_type))?;
        }
        write!(
            f,
            "), {} cached chains, {} conflicts ({} pending)",
            self.cached_chains, self.conflicts, self.pending
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::conflict::ConflictStatus;
    use crate::style::properties::{FontProperties, ParagraphProperties};
    use std::sync::Arc;

    fn paragraph(id: &str, based_on: Option<&str>) -> StyleDefinition {
        let style = StyleDefinition::new(id, id, StyleType::Paragraph);
        match based_on {
            Some(parent) => style.with_based_on(parent),
            None => style,
        }
    }

    fn with_font(style: StyleDefinition, font: FontProperties) -> StyleDefinition {
        style.with_properties(StyleProperties::default().with_font(font))
    }

    #[test]
    fn test_add_and_lookup() {
        let registry = StyleRegistry::new();
        registry.add_paragraph_style(paragraph("Normal", None)).unwrap();
        registry
            .add_character_style(StyleDefinition::new("Normal", "Normal Char", StyleType::Paragraph))
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(StyleType::Character, "Normal"));
        assert_eq!(registry.find_style("Normal").unwrap().style_type(), StyleType::Paragraph);
        assert_eq!(
            registry.find_by_name("NORMAL CHAR").unwrap().style_type(),
            StyleType::Character
        );
        assert!(registry.get_style(StyleType::Table, "Normal").is_none());
    }

    #[test]
    fn test_rejects_empty_id() {
        let registry = StyleRegistry::new();
        let err = registry.add_style(paragraph("", None)).unwrap_err();
        assert!(matches!(err, Error::InvalidStyle(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_chain_terminates_within_registry_size() {
        let registry = StyleRegistry::new();
        registry.add_style(paragraph("Normal", None)).unwrap();
        registry.add_style(paragraph("H1", Some("Normal"))).unwrap();
        registry.add_style(paragraph("H2", Some("H1"))).unwrap();

        let chain = registry.inheritance_chain(StyleType::Paragraph, "H2").unwrap();
        assert_eq!(chain, ["H2", "H1", "Normal"]);
        assert!(chain.len() <= registry.len());
    }

    #[test]
    fn test_cycle_detected_with_partial_chain() {
        let registry = StyleRegistry::new();
        registry.add_style(paragraph("A", Some("B"))).unwrap();
        registry.add_style(paragraph("B", Some("A"))).unwrap();

        let err = registry.inheritance_chain(StyleType::Paragraph, "A").unwrap_err();
        match err {
            Error::InheritanceCycleDetected { id, chain } => {
                assert_eq!(id, "A");
                assert_eq!(chain, ["A", "B"]);
            },
            other => panic!("unexpected error: {other:?}"),
        }
        // Cyclic chains never enter the cache
        assert_eq!(registry.summary().cached_chains, 0);
    }

    #[test]
    fn test_forward_reference_invalidates_cache() {
        let registry = StyleRegistry::new();
        registry.add_style(paragraph("Child", Some("Parent"))).unwrap();
        assert_eq!(
            registry.resolve_chain(StyleType::Paragraph, "Child").unwrap().dangling(),
            Some("Parent")
        );

        registry.add_style(paragraph("Parent", None)).unwrap();
        assert_eq!(
            registry.inheritance_chain(StyleType::Paragraph, "Child").unwrap(),
            ["Child", "Parent"]
        );
    }

    #[test]
    fn test_readd_refreshes_dependent_chains() {
        let registry = StyleRegistry::with_strategy(ResolutionStrategy::UseNewer);
        registry.add_style(paragraph("Root", None)).unwrap();
        registry.add_style(paragraph("Mid", Some("Root"))).unwrap();
        registry.add_style(paragraph("Leaf", Some("Mid"))).unwrap();
        registry.add_style(paragraph("Other", None)).unwrap();

        registry.add_style(paragraph("Mid", Some("Other"))).unwrap();
        assert_eq!(
            registry.inheritance_chain(StyleType::Paragraph, "Leaf").unwrap(),
            ["Leaf", "Mid", "Other"]
        );
    }

    #[test]
    fn test_effective_properties_fold_root_first() {
        let registry = StyleRegistry::new();
        registry
            .add_style(with_font(
                paragraph("Normal", None),
                FontProperties {
                    name: Some("Calibri".to_string()),
                    size: Some(22),
                    ..Default::default()
                },
            ))
            .unwrap();
        registry
            .add_style(with_font(
                paragraph("Heading1", Some("Normal")),
                FontProperties {
                    size: Some(32),
                    bold: Some(true),
                    ..Default::default()
                },
            ))
            .unwrap();

        let props = registry
            .effective_properties(StyleType::Paragraph, "Heading1")
            .unwrap();
        let font = props.font.unwrap();
        assert_eq!(font.name.as_deref(), Some("Calibri"));
        assert_eq!(font.size, Some(32));
        assert_eq!(font.bold, Some(true));
    }

    #[test]
    fn test_effective_properties_survive_cycle() {
        let registry = StyleRegistry::new();
        registry
            .add_style(paragraph("A", Some("B")).with_properties(
                StyleProperties::default().with_paragraph(ParagraphProperties {
                    keep_next: Some(true),
                    ..Default::default()
                }),
            ))
            .unwrap();
        registry.add_style(paragraph("B", Some("A"))).unwrap();

        let props = registry.effective_properties(StyleType::Paragraph, "A").unwrap();
        assert_eq!(props.paragraph.and_then(|p| p.keep_next), Some(true));
    }

    #[test]
    fn test_merge_strategy_scenario() {
        let registry = StyleRegistry::new();
        registry
            .add_style(with_font(
                paragraph("Body", None),
                FontProperties {
                    name: Some("Arial".to_string()),
                    ..Default::default()
                },
            ))
            .unwrap();
        registry
            .add_style(with_font(
                paragraph("Body", None),
                FontProperties {
                    bold: Some(true),
                    ..Default::default()
                },
            ))
            .unwrap();

        let font = registry
            .get_style(StyleType::Paragraph, "Body")
            .unwrap()
            .properties()
            .font
            .clone()
            .unwrap();
        assert_eq!(font.name.as_deref(), Some("Arial"));
        assert_eq!(font.bold, Some(true));
        assert_eq!(registry.conflicts().len(), 1);
    }

    #[test]
    fn test_unnamed_style_rejected_before_collision() {
        let registry = StyleRegistry::new();
        registry.add_style(paragraph("Body", None)).unwrap();

        let unnamed = StyleDefinition::new("Body", "", StyleType::Paragraph).with_alias("Text");
        let err = registry.add_style(unnamed).unwrap_err();
        assert!(matches!(err, Error::InvalidStyle(_)));
        assert_eq!(registry.get_style(StyleType::Paragraph, "Body"), Some(paragraph("Body", None)));
        assert!(registry.conflicts().is_empty());

        // Every accepted collision leaves exactly one record
        registry
            .add_style(paragraph("Body", None).with_alias("Text"))
            .unwrap();
        let conflicts = registry.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].status(), ConflictStatus::Resolved);
        assert_eq!(
            registry.get_style(StyleType::Paragraph, "Body").unwrap().aliases(),
            ["Text"]
        );
    }

    #[test]
    fn test_keep_original_reports_not_applied() {
        let registry = StyleRegistry::with_strategy(ResolutionStrategy::KeepOriginal);
        let original = with_font(
            paragraph("Body", None),
            FontProperties {
                name: Some("Arial".to_string()),
                ..Default::default()
            },
        );
        registry.add_style(original.clone()).unwrap();

        let err = registry
            .add_style(with_font(
                paragraph("Body", None),
                FontProperties {
                    name: Some("Times".to_string()),
                    ..Default::default()
                },
            ))
            .unwrap_err();
        assert!(matches!(err, Error::ConflictUnresolved { .. }));
        assert_eq!(registry.get_style(StyleType::Paragraph, "Body"), Some(original));
        assert_eq!(registry.conflicts()[0].status(), ConflictStatus::Resolved);
    }

    #[test]
    fn test_user_choice_pending_flow() {
        let registry = StyleRegistry::with_strategy(ResolutionStrategy::UserChoice);
        registry.add_style(paragraph("Body", None)).unwrap();

        let newer = StyleDefinition::new("Body", "Body Text", StyleType::Paragraph);
        let err = registry.add_style(newer.clone()).unwrap_err();
        assert!(matches!(err, Error::ConflictUnresolved { .. }));
        assert_eq!(registry.pending_conflicts().len(), 1);

        // A second attempt while pending is a duplicate
        let err = registry.add_style(newer).unwrap_err();
        assert!(matches!(err, Error::DuplicateStyleId { .. }));

        registry
            .resolve_pending(StyleType::Paragraph, "Body", ConflictDecision::UseNewer)
            .unwrap();
        assert!(registry.pending_conflicts().is_empty());
        assert_eq!(
            registry.get_style(StyleType::Paragraph, "Body").unwrap().name(),
            "Body Text"
        );
        assert!(
            registry
                .resolve_pending(StyleType::Paragraph, "Body", ConflictDecision::Merge)
                .is_err()
        );
    }

    #[test]
    fn test_next_and_linked_styles() {
        let registry = StyleRegistry::new();
        registry
            .add_style(paragraph("Heading1", None).with_next("Normal").with_link("Heading1Char"))
            .unwrap();
        registry.add_style(paragraph("Normal", None)).unwrap();
        registry
            .add_character_style(StyleDefinition::new("Heading1Char", "Heading 1 Char", StyleType::Character))
            .unwrap();

        assert_eq!(
            registry.next_style(StyleType::Paragraph, "Heading1").unwrap().id(),
            "Normal"
        );
        assert_eq!(
            registry.next_style(StyleType::Paragraph, "Normal").unwrap().id(),
            "Normal"
        );
        assert_eq!(
            registry.linked_style(StyleType::Paragraph, "Heading1").unwrap().style_type(),
            StyleType::Character
        );
    }

    #[test]
    fn test_from_config() {
        let config = EngineConfig::new().with_resolution_strategy(ResolutionStrategy::UseNewer);
        assert_eq!(StyleRegistry::from_config(&config).strategy(), ResolutionStrategy::UseNewer);
    }

    #[test]
    fn test_summary_display() {
        let registry = StyleRegistry::new();
        registry.add_style(paragraph("Normal", None)).unwrap();
        let summary = registry.summary();
        assert_eq!(summary.count(StyleType::Paragraph), 1);
        assert_eq!(summary.total(), 1);
        assert!(summary.to_string().starts_with("1 styles (paragraph: 1"));
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StyleRegistry>();

        let registry = Arc::new(StyleRegistry::new());
        registry.add_style(paragraph("Normal", None)).unwrap();

        std::thread::scope(|scope| {
            let writer = Arc::clone(&registry);
            scope.spawn(move || {
                for i in 0..50 {
                    writer
                        .add_style(paragraph(&format!("S{}", i), Some("Normal")))
                        .unwrap();
                }
            });
            for _ in 0..4 {
                let reader = Arc::clone(&registry);
                scope.spawn(move || {
                    for _ in 0..50 {
                        let chain = reader.inheritance_chain(StyleType::Paragraph, "Normal").unwrap();
                        assert_eq!(chain, ["Normal"]);
                    }
                });
            }
        });

        assert_eq!(registry.len(), 51);
    }
}
