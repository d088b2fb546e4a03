//! Effective formatting of paragraphs and runs.
//!
//! Layers, lowest first: the paragraph style chain, the run's character style
//! chain, then direct run formatting. Each layer is applied with the same
//! merge policy used for style conflicts.
use super::paragraph::{Paragraph, Run};
use crate::style::{FontProperties, Merge, StyleProperties, StyleRegistry, StyleType};

/// Paragraph style applied when a paragraph names none.
const DEFAULT_PARAGRAPH_STYLE: &str = "Normal";

/// Computes effective properties against a style registry.
///
/// # Examples
///
/// ```rust
/// use docmodel::document::{EffectiveFormatter, Paragraph, Run};
/// use docmodel::style::{FontProperties, StyleDefinition, StyleProperties, StyleRegistry, StyleType};
///
/// let registry = StyleRegistry::new();
/// registry.add_style(
///     StyleDefinition::new("Normal", "Normal", StyleType::Paragraph).with_properties(
///         StyleProperties::default().with_font(FontProperties {
///             name: Some("Calibri".to_string()),
///             ..Default::default()
///         }),
///     ),
/// )?;
///
/// let para = Paragraph::new("Hello");
/// let run = Run::new("Hello").with_bold(true);
/// let font = EffectiveFormatter::new(&registry).run_font(&para, &run);
/// assert_eq!(font.name.as_deref(), Some("Calibri"));
/// assert_eq!(font.bold, Some(true));
/// # Ok::<(), docmodel::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EffectiveFormatter<'a> {
    registry: &'a StyleRegistry,
}

impl<'a> EffectiveFormatter<'a> {
    #[inline]
    pub fn new(registry: &'a StyleRegistry) -> Self {
        Self { registry }
    }

    /// Properties of the paragraph style chain; falls back to `Normal` when
    /// the paragraph names no style.
    pub fn paragraph_properties(&self, paragraph: &Paragraph) -> StyleProperties {
        let style_id = paragraph.style_id().unwrap_or(DEFAULT_PARAGRAPH_STYLE);
        self.style_properties(StyleType::Paragraph, style_id)
    }

    /// Font of a run inside `paragraph`.
    pub fn run_font(&self, paragraph: &Paragraph, run: &Run) -> FontProperties {
        let mut font = self.paragraph_properties(paragraph).font.unwrap_or_default();

        if let Some(style_id) = run.style_id.as_deref().filter(|id| !id.is_empty())
            && let Some(character) = self.style_properties(StyleType::Character, style_id).font
        {
            font = font.merge(&character);
        }

        let direct = FontProperties {
            name: run.font_name.clone(),
            size: run.font_size,
            bold: run.bold,
            italic: run.italic,
            ..Default::default()
        };
        font.merge(&direct)
    }

    fn style_properties(&self, style_type: StyleType, style_id: &str) -> StyleProperties {
        match self.registry.effective_properties(style_type, style_id) {
            Ok(properties) => properties,
            Err(e) => {
                tracing::debug!(style_id = %style_id, error = %e, "no effective properties");
                StyleProperties::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{ParagraphProperties, StyleDefinition};

    fn registry() -> StyleRegistry {
        let registry = StyleRegistry::new();
        registry
            .add_style(
                StyleDefinition::new("Normal", "Normal", StyleType::Paragraph).with_properties(
                    StyleProperties::default()
                        .with_font(FontProperties {
                            name: Some("Calibri".to_string()),
                            size: Some(22),
                            ..Default::default()
                        })
                        .with_paragraph(ParagraphProperties {
                            space_after: Some(160),
                            ..Default::default()
                        }),
                ),
            )
            .unwrap();
        registry
            .add_style(
                StyleDefinition::new("Heading1", "heading 1", StyleType::Paragraph)
                    .with_based_on("Normal")
                    .with_properties(StyleProperties::default().with_font(FontProperties {
                        size: Some(32),
                        bold: Some(true),
                        ..Default::default()
                    })),
            )
            .unwrap();
        registry
            .add_style(
                StyleDefinition::new("Emphasis", "Emphasis", StyleType::Character).with_properties(
                    StyleProperties::default().with_font(FontProperties {
                        italic: Some(true),
                        name: Some("Georgia".to_string()),
                        ..Default::default()
                    }),
                ),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_paragraph_properties_follow_chain() {
        let registry = registry();
        let formatter = EffectiveFormatter::new(&registry);

        let props = formatter.paragraph_properties(&Paragraph::styled("Heading1", "Title"));
        assert_eq!(props.paragraph.and_then(|p| p.space_after), Some(160));
        assert_eq!(props.font.as_ref().and_then(|f| f.size), Some(32));

        // Unstyled paragraphs use Normal
        let props = formatter.paragraph_properties(&Paragraph::new("body"));
        assert_eq!(props.font.and_then(|f| f.size), Some(22));
    }

    #[test]
    fn test_run_layers() {
        let registry = registry();
        let formatter = EffectiveFormatter::new(&registry);
        let heading = Paragraph::styled("Heading1", "Title");

        let run = Run::new("x").with_style("Emphasis").with_bold(false);
        let font = formatter.run_font(&heading, &run);
        assert_eq!(font.name.as_deref(), Some("Georgia"));
        assert_eq!(font.size, Some(32));
        assert_eq!(font.italic, Some(true));
        assert_eq!(font.bold, Some(false));

        let run = Run::new("x").with_font_name("Courier").with_font_size(18);
        let font = formatter.run_font(&heading, &run);
        assert_eq!(font.name.as_deref(), Some("Courier"));
        assert_eq!(font.size, Some(18));
        assert_eq!(font.bold, Some(true));
    }

    #[test]
    fn test_unknown_styles_are_empty() {
        let registry = StyleRegistry::new();
        let formatter = EffectiveFormatter::new(&registry);
        assert!(formatter.paragraph_properties(&Paragraph::styled("Ghost", "x")).is_empty());
        let font = formatter.run_font(&Paragraph::new("x"), &Run::new("x").with_style("Ghost"));
        assert!(font.is_empty());
    }
}
