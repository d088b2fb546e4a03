//! `basedOn` chain resolution.
//!
//! The resolver walks `based_on` links from a starting style, most specific
//! first, guarding against cycles with a visited set. It is generic over
//! [`StyleLookup`] so the registry can run it under its own lock and callers
//! can run it over a plain slice of definitions.
use super::definition::StyleDefinition;
use super::enums::StyleType;
use crate::common::{Error, Result};
use smallvec::SmallVec;
use std::collections::HashSet;

/// Read access to a set of style definitions keyed by (type, id).
pub trait StyleLookup {
    /// Find the definition with `id` in the `style_type` namespace.
    fn lookup(&self, style_type: StyleType, id: &str) -> Option<&StyleDefinition>;

    /// Total number of definitions across all namespaces.
    fn style_count(&self) -> usize;
}

impl StyleLookup for [StyleDefinition] {
    fn lookup(&self, style_type: StyleType, id: &str) -> Option<&StyleDefinition> {
        self.iter()
            .find(|style| style.style_type() == style_type && style.id() == id)
    }

    fn style_count(&self) -> usize {
        self.len()
    }
}

impl StyleLookup for Vec<StyleDefinition> {
    fn lookup(&self, style_type: StyleType, id: &str) -> Option<&StyleDefinition> {
        self.as_slice().lookup(style_type, id)
    }

    fn style_count(&self) -> usize {
        self.len()
    }
}

/// One resolved step of an inheritance chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainLink {
    pub style_type: StyleType,
    pub id: String,
}

impl ChainLink {
    #[inline]
    pub fn new(style_type: StyleType, id: impl Into<String>) -> Self {
        Self {
            style_type,
            id: id.into(),
        }
    }
}

/// Outcome of walking a `basedOn` chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainResolution {
    /// Resolved links, the starting style first
    pub(crate) links: SmallVec<[ChainLink; 8]>,
    /// `based_on` id of the root that names no registered style
    pub(crate) dangling: Option<String>,
    /// Id at which the walk revisited a style
    pub(crate) cycle_at: Option<String>,
}

impl ChainResolution {
    #[inline]
    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// Ids in chain order, most specific first.
    pub fn ids(&self) -> Vec<String> {
        self.links.iter().map(|link| link.id.clone()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The unresolvable `based_on` id the root points at, if any.
    #[inline]
    pub fn dangling(&self) -> Option<&str> {
        self.dangling.as_deref()
    }

    /// The id at which a cycle was detected, if any.
    #[inline]
    pub fn cycle_at(&self) -> Option<&str> {
        self.cycle_at.as_deref()
    }

    #[inline]
    pub fn is_cyclic(&self) -> bool {
        self.cycle_at.is_some()
    }

    /// Check whether the chain passes through (type, id).
    pub fn contains(&self, style_type: StyleType, id: &str) -> bool {
        self.links
            .iter()
            .any(|link| link.style_type == style_type && link.id == id)
    }

    /// Turn a cyclic resolution into `InheritanceCycleDetected` carrying the
    /// truncated chain; acyclic ones yield their ids.
    pub fn into_result(self) -> Result<Vec<String>> {
        match self.cycle_at {
            Some(id) => Err(Error::InheritanceCycleDetected {
                id,
                chain: self.links.into_iter().map(|link| link.id).collect(),
            }),
            None => Ok(self.links.into_iter().map(|link| link.id).collect()),
        }
    }
}

/// Walks `basedOn` links over any [`StyleLookup`].
///
/// # Examples
///
/// ```rust
/// use docmodel::style::{InheritanceResolver, StyleDefinition, StyleType};
///
/// let styles = vec![
///     StyleDefinition::new("Normal", "Normal", StyleType::Paragraph),
///     StyleDefinition::new("Heading1", "heading 1", StyleType::Paragraph).with_based_on("Normal"),
/// ];
///
/// let chain = InheritanceResolver::new(&styles)
///     .resolve(StyleType::Paragraph, "Heading1")
///     .unwrap();
/// assert_eq!(chain.ids(), ["Heading1", "Normal"]);
/// ```
pub struct InheritanceResolver<'a, L: StyleLookup + ?Sized> {
    styles: &'a L,
}

impl<'a, L: StyleLookup + ?Sized> InheritanceResolver<'a, L> {
    #[inline]
    pub fn new(styles: &'a L) -> Self {
        Self { styles }
    }

    /// Resolve a `based_on` reference made from a style of `style_type`:
    /// same namespace first, then the compatible one.
    pub fn resolve_parent(&self, style_type: StyleType, id: &str) -> Option<&'a StyleDefinition> {
        self.styles.lookup(style_type, id).or_else(|| {
            style_type
                .compatible()
                .and_then(|other| self.styles.lookup(other, id))
        })
    }

    /// Walk the chain starting at (style_type, id).
    ///
    /// A cycle is not an error here; it is reported through
    /// [`ChainResolution::cycle_at`].
    pub fn resolve(&self, style_type: StyleType, id: &str) -> Result<ChainResolution> {
        let start = self
            .styles
            .lookup(style_type, id)
            .ok_or_else(|| Error::StyleNotFound {
                style_type,
                id: id.to_string(),
            })?;

        let mut resolution = ChainResolution::default();
        let mut visited: HashSet<(StyleType, &str)> = HashSet::new();
        let mut current = start;

        // Every step visits a distinct style, so the walk ends within
        // style_count + 1 iterations
        for _ in 0..=self.styles.style_count() {
            if !visited.insert((current.style_type(), current.id())) {
                resolution.cycle_at = Some(current.id().to_string());
                break;
            }
            resolution
                .links
                .push(ChainLink::new(current.style_type(), current.id()));

            let Some(parent_id) = current.based_on() else {
                break;
            };
            match self.resolve_parent(current.style_type(), parent_id) {
                Some(parent) => current = parent,
                None => {
                    resolution.dangling = Some(parent_id.to_string());
                    break;
                },
            }
        }

        if let Some(id) = resolution.cycle_at() {
            tracing::warn!(
                start = %start.id(),
                cycle_at = %id,
                "inheritance cycle detected"
            );
        }

        Ok(resolution)
    }

    /// Depth the chain of a style `id` would have if its `based_on` were
    /// `candidate`.
    ///
    /// Returns `None` when the candidate chain leads back to `id` (or loops
    /// on its own), i.e. adopting it would create a cycle.
    pub fn candidate_depth(
        &self,
        style_type: StyleType,
        id: &str,
        candidate: Option<&str>,
    ) -> Option<usize> {
        let mut depth = 1;
        let mut visited: HashSet<(StyleType, &str)> = HashSet::new();
        let mut from_type = style_type;
        let mut next = candidate.filter(|c| !c.is_empty());

        while let Some(parent_id) = next {
            let Some(parent) = self.resolve_parent(from_type, parent_id) else {
                break;
            };
            if (parent.style_type() == style_type && parent.id() == id)
                || !visited.insert((parent.style_type(), parent.id()))
            {
                return None;
            }
            depth += 1;
            from_type = parent.style_type();
            next = parent.based_on();
        }

        Some(depth)
    }
}
