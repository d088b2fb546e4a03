//! Style definitions as held by the registry.
use super::enums::{StyleCategory, StyleFlag, StyleFlags, StyleType};
use super::properties::{Merge, StyleProperties, merge_list, merge_scalar};
use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};

/// A complete style definition.
///
/// Created once and handed to the registry; the registry never overwrites a
/// definition silently, any id collision goes through conflict resolution.
///
/// # Examples
///
/// ```rust
/// use docmodel::style::{FontProperties, StyleDefinition, StyleProperties, StyleType};
///
/// let style = StyleDefinition::new("Quote2", "Quote 2", StyleType::Paragraph)
///     .with_based_on("Normal")
///     .with_properties(StyleProperties::default().with_font(FontProperties {
///         italic: Some(true),
///         ..Default::default()
///     }));
///
/// assert_eq!(style.based_on(), Some("Normal"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDefinition {
    /// Style identifier, unique within its type
    pub(crate) id: String,
    /// UI-visible name
    pub(crate) name: String,
    pub(crate) style_type: StyleType,
    /// Explicit category; inferred from the id when unset
    pub(crate) category: Option<StyleCategory>,
    /// ID of the style this is based on
    pub(crate) based_on: Option<String>,
    /// Style for the paragraph following one that uses this style
    pub(crate) next: Option<String>,
    /// Linked companion style in the other namespace
    pub(crate) link: Option<String>,
    pub(crate) flags: StyleFlags,
    pub(crate) description: Option<String>,
    pub(crate) aliases: Vec<String>,
    /// Conflict precedence (higher wins)
    pub(crate) priority: Option<i32>,
    pub(crate) properties: StyleProperties,
}

impl StyleDefinition {
    /// Create a new style with the given ID, name, and type.
    pub fn new(id: impl Into<String>, name: impl Into<String>, style_type: StyleType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            style_type,
            category: None,
            based_on: None,
            next: None,
            link: None,
            flags: StyleFlags::new(),
            description: None,
            aliases: Vec::new(),
            priority: None,
            properties: StyleProperties::default(),
        }
    }

    /// Get the style identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the style name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the style type.
    #[inline]
    pub fn style_type(&self) -> StyleType {
        self.style_type
    }

    /// Get the category, inferring it from the id when not set explicitly.
    #[inline]
    pub fn category(&self) -> StyleCategory {
        self.category.unwrap_or_else(|| StyleCategory::infer(&self.id))
    }

    /// Get the ID of the style this is based on.
    ///
    /// An empty reference is treated as absent.
    #[inline]
    pub fn based_on(&self) -> Option<&str> {
        self.based_on.as_deref().filter(|id| !id.is_empty())
    }

    /// Get the ID of the follow-on paragraph style.
    #[inline]
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref().filter(|id| !id.is_empty())
    }

    /// Get the ID of the linked companion style.
    #[inline]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref().filter(|id| !id.is_empty())
    }

    #[inline]
    pub fn flags(&self) -> StyleFlags {
        self.flags
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Get the conflict priority.
    #[inline]
    pub fn priority(&self) -> Option<i32> {
        self.priority
    }

    #[inline]
    pub fn properties(&self) -> &StyleProperties {
        &self.properties
    }

    /// Check whether the style is hidden from the UI.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(StyleFlag::HIDDEN) || self.flags.contains(StyleFlag::SEMI_HIDDEN)
    }

    /// Check if this style is locked.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.flags.contains(StyleFlag::LOCKED)
    }

    pub fn with_category(mut self, category: StyleCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_based_on(mut self, based_on: impl Into<String>) -> Self {
        self.based_on = Some(based_on.into());
        self
    }

    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Explicitly set or clear a flag.
    pub fn with_flag(mut self, flag: StyleFlag, on: bool) -> Self {
        self.flags.set(flag, on);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_properties(mut self, properties: StyleProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Set the base style ID.
    pub fn set_based_on(&mut self, based_on: Option<String>) {
        self.based_on = based_on;
    }

    /// Mutable access to the property bag.
    pub fn properties_mut(&mut self) -> &mut StyleProperties {
        &mut self.properties
    }

    /// Check the definition before it enters the registry; merge results
    /// pass the same check.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidStyle("style ID cannot be empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidStyle(format!("style '{}' has an empty name", self.id)));
        }
        self.properties.check_shape(self.style_type)?;
        self.properties.validate()
    }
}

impl Merge for StyleDefinition {
    /// Field merge keeping the original's identity (id and type).
    ///
    /// An empty name on the newer side counts as unset.
    fn merge(&self, newer: &Self) -> Self {
        let name = if newer.name.trim().is_empty() {
            self.name.clone()
        } else {
            newer.name.clone()
        };

        Self {
            id: self.id.clone(),
            name,
            style_type: self.style_type,
            category: merge_scalar(&self.category, &newer.category),
            based_on: merge_scalar(&self.based_on, &newer.based_on),
            next: merge_scalar(&self.next, &newer.next),
            link: merge_scalar(&self.link, &newer.link),
            flags: self.flags.merge(&newer.flags),
            description: merge_scalar(&self.description, &newer.description),
            aliases: merge_list(&self.aliases, &newer.aliases),
            priority: merge_scalar(&self.priority, &newer.priority),
            properties: self.properties.merge(&newer.properties),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::properties::{FontProperties, ParagraphProperties};

    #[test]
    fn test_category_inference() {
        let builtin = StyleDefinition::new("Heading1", "heading 1", StyleType::Paragraph);
        assert_eq!(builtin.category(), StyleCategory::BuiltIn);

        let custom = StyleDefinition::new("Fancy", "Fancy", StyleType::Paragraph);
        assert_eq!(custom.category(), StyleCategory::Custom);

        let user = custom.with_category(StyleCategory::User);
        assert_eq!(user.category(), StyleCategory::User);
    }

    #[test]
    fn test_empty_references_are_absent() {
        let style = StyleDefinition::new("A", "A", StyleType::Paragraph).with_based_on("");
        assert_eq!(style.based_on(), None);
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let style = StyleDefinition::new("  ", "Blank", StyleType::Paragraph);
        assert!(matches!(style.validate(), Err(Error::InvalidStyle(_))));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let style = StyleDefinition::new("Body", "  ", StyleType::Paragraph);
        assert!(matches!(style.validate(), Err(Error::InvalidStyle(_))));
        assert!(StyleDefinition::new("Body", "Body", StyleType::Paragraph).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_wrong_bag() {
        let style = StyleDefinition::new("Emph", "Emph", StyleType::Character).with_properties(
            StyleProperties::default().with_paragraph(ParagraphProperties::default()),
        );
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_merge_keeps_identity_and_unions_aliases() {
        let original = StyleDefinition::new("Body", "Body", StyleType::Paragraph)
            .with_alias("Text")
            .with_description("original");
        let newer = StyleDefinition::new("Body", "", StyleType::Character)
            .with_alias("Copy")
            .with_alias("Text")
            .with_properties(StyleProperties::default().with_font(FontProperties {
                size: Some(22),
                ..Default::default()
            }));

        let merged = original.merge(&newer);
        assert_eq!(merged.id(), "Body");
        assert_eq!(merged.name(), "Body");
        assert_eq!(merged.style_type(), StyleType::Paragraph);
        assert_eq!(merged.aliases(), ["Text", "Copy"]);
        assert_eq!(merged.description(), Some("original"));
        assert_eq!(merged.properties().font.as_ref().and_then(|f| f.size), Some(22));
    }
}
