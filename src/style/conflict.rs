//! Style id collisions and their resolution.
//!
//! A registration that targets an id already present never overwrites it
//! directly. It produces a [`StyleConflict`], which a [`ConflictResolver`]
//! settles under the active [`ResolutionStrategy`].
use super::definition::StyleDefinition;
use super::enums::StyleType;
use super::inheritance::StyleLookup;
use super::merger::StyleMerger;
use crate::common::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy used to reconcile two definitions registered under the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// Keep the registered definition and reject the new one
    KeepOriginal,
    /// Replace the registered definition wholesale
    UseNewer,
    /// Field-level merge, new values win where set
    #[default]
    Merge,
    /// Leave the conflict pending until an external decision arrives
    UserChoice,
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepOriginal => write!(f, "keep_original"),
            Self::UseNewer => write!(f, "use_newer"),
            Self::Merge => write!(f, "merge"),
            Self::UserChoice => write!(f, "user_choice"),
        }
    }
}

/// What the two colliding definitions disagree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    Property,
    Inheritance,
    Priority,
    Naming,
    Format,
}

impl ConflictType {
    /// Classify a collision. The first matching rule wins: differing explicit
    /// priorities, then `based_on`, then name, then property bags; anything
    /// left (flags, aliases, description) is a format conflict.
    pub fn classify(original: &StyleDefinition, new: &StyleDefinition) -> Self {
        if let (Some(a), Some(b)) = (original.priority(), new.priority())
            && a != b
        {
            Self::Priority
        } else if original.based_on() != new.based_on() {
            Self::Inheritance
        } else if original.name() != new.name() {
            Self::Naming
        } else if original.properties() != new.properties() {
            Self::Property
        } else {
            Self::Format
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property => write!(f, "property"),
            Self::Inheritance => write!(f, "inheritance"),
            Self::Priority => write!(f, "priority"),
            Self::Naming => write!(f, "naming"),
            Self::Format => write!(f, "format"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStatus {
    Pending,
    Resolved,
    /// Resolution was attempted and rejected; the original stays registered
    Failed,
}

/// External decision for a conflict left pending under
/// [`ResolutionStrategy::UserChoice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictDecision {
    KeepOriginal,
    UseNewer,
    Merge,
}

impl From<ConflictDecision> for ResolutionStrategy {
    fn from(decision: ConflictDecision) -> Self {
        match decision {
            ConflictDecision::KeepOriginal => Self::KeepOriginal,
            ConflictDecision::UseNewer => Self::UseNewer,
            ConflictDecision::Merge => Self::Merge,
        }
    }
}

/// A collision between a registered definition and a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConflict {
    style_id: String,
    style_type: StyleType,
    conflict_type: ConflictType,
    original: StyleDefinition,
    new: StyleDefinition,
    original_priority: Option<i32>,
    new_priority: Option<i32>,
    resolution: Option<StyleDefinition>,
    strategy: ResolutionStrategy,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
    status: ConflictStatus,
}

impl StyleConflict {
    /// Record a new, pending conflict.
    pub fn new(original: StyleDefinition, new: StyleDefinition, strategy: ResolutionStrategy) -> Self {
        Self {
            style_id: original.id().to_string(),
            style_type: original.style_type(),
            conflict_type: ConflictType::classify(&original, &new),
            original_priority: original.priority(),
            new_priority: new.priority(),
            original,
            new,
            resolution: None,
            strategy,
            created_at: Utc::now(),
            resolved_at: None,
            status: ConflictStatus::Pending,
        }
    }

    #[inline]
    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    #[inline]
    pub fn style_type(&self) -> StyleType {
        self.style_type
    }

    #[inline]
    pub fn conflict_type(&self) -> ConflictType {
        self.conflict_type
    }

    #[inline]
    pub fn original(&self) -> &StyleDefinition {
        &self.original
    }

    #[inline]
    pub fn new_style(&self) -> &StyleDefinition {
        &self.new
    }

    #[inline]
    pub fn original_priority(&self) -> Option<i32> {
        self.original_priority
    }

    #[inline]
    pub fn new_priority(&self) -> Option<i32> {
        self.new_priority
    }

    /// The definition the conflict was resolved to.
    #[inline]
    pub fn resolution(&self) -> Option<&StyleDefinition> {
        self.resolution.as_ref()
    }

    #[inline]
    pub fn strategy(&self) -> ResolutionStrategy {
        self.strategy
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }

    #[inline]
    pub fn status(&self) -> ConflictStatus {
        self.status
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ConflictStatus::Pending
    }

    /// Check whether this conflict concerns (style_type, id).
    #[inline]
    pub fn concerns(&self, style_type: StyleType, id: &str) -> bool {
        self.style_type == style_type && self.style_id == id
    }

    fn mark_resolved(&mut self, resolution: StyleDefinition, strategy: ResolutionStrategy) {
        self.resolution = Some(resolution);
        self.strategy = strategy;
        self.resolved_at = Some(Utc::now());
        self.status = ConflictStatus::Resolved;
    }

    fn mark_failed(&mut self, strategy: ResolutionStrategy) {
        self.strategy = strategy;
        self.status = ConflictStatus::Failed;
    }
}

/// What the registry should do with a resolved conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictOutcome {
    /// Store this definition under the conflicting id
    Apply(StyleDefinition),
    /// Keep the registered definition; the attempt was not applied
    Retain,
    /// Awaiting an external decision
    Deferred,
}

/// Settles conflicts against the styles currently registered.
pub struct ConflictResolver<'a, L: StyleLookup + ?Sized> {
    styles: &'a L,
    strategy: ResolutionStrategy,
}

impl<'a, L: StyleLookup + ?Sized> ConflictResolver<'a, L> {
    #[inline]
    pub fn new(styles: &'a L, strategy: ResolutionStrategy) -> Self {
        Self { styles, strategy }
    }

    /// Resolve `conflict` under the configured strategy.
    ///
    /// On success the conflict is stamped resolved, except under
    /// [`ResolutionStrategy::UserChoice`] where it stays pending.
    pub fn resolve(&self, conflict: &mut StyleConflict) -> Result<ConflictOutcome> {
        self.apply(conflict, self.strategy)
    }

    /// Resolve a pending conflict with an external decision.
    pub fn decide(&self, conflict: &mut StyleConflict, decision: ConflictDecision) -> Result<ConflictOutcome> {
        self.apply(conflict, decision.into())
    }

    fn apply(&self, conflict: &mut StyleConflict, strategy: ResolutionStrategy) -> Result<ConflictOutcome> {
        let outcome = match strategy {
            ResolutionStrategy::KeepOriginal => {
                let original = conflict.original.clone();
                conflict.mark_resolved(original, strategy);
                ConflictOutcome::Retain
            },
            ResolutionStrategy::UseNewer => {
                let newer = conflict.new.clone();
                conflict.mark_resolved(newer.clone(), strategy);
                ConflictOutcome::Apply(newer)
            },
            ResolutionStrategy::Merge => {
                let merged = match StyleMerger::new(self.styles).merge(conflict) {
                    Ok(merged) => merged,
                    Err(e) => {
                        conflict.mark_failed(strategy);
                        return Err(e);
                    },
                };
                let outcome = if merged == conflict.original {
                    ConflictOutcome::Retain
                } else {
                    ConflictOutcome::Apply(merged.clone())
                };
                conflict.mark_resolved(merged, strategy);
                outcome
            },
            ResolutionStrategy::UserChoice => {
                conflict.strategy = strategy;
                ConflictOutcome::Deferred
            },
        };

        tracing::info!(
            style_id = %conflict.style_id,
            style_type = %conflict.style_type,
            conflict_type = %conflict.conflict_type,
            strategy = %strategy,
            "style conflict handled"
        );

        Ok(outcome)
    }
}

impl ConflictOutcome {
    /// Map a non-applied outcome to the recoverable error reported to callers.
    pub fn into_result(self, id: &str, strategy: ResolutionStrategy) -> Result<Option<StyleDefinition>> {
        match self {
            ConflictOutcome::Apply(definition) => Ok(Some(definition)),
            ConflictOutcome::Retain if strategy == ResolutionStrategy::Merge => Ok(None),
            ConflictOutcome::Retain | ConflictOutcome::Deferred => Err(Error::ConflictUnresolved {
                id: id.to_string(),
                strategy,
            }),
        }
    }
}
