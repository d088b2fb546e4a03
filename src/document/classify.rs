//! Heading classification.
//!
//! The analyzer asks a [`HeadingClassifier`] whether a paragraph opens a
//! section and at which level. Two classifiers are provided: one keyed on the
//! style name, one on outline-level metadata in the style chain. Any
//! `Fn(&Paragraph) -> Option<u8>` closure works as well.
use super::paragraph::Paragraph;
use crate::config::{AnalyzerOptions, DEFAULT_MAX_HEADING_LEVEL};
use crate::style::{StyleRegistry, StyleType};
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

/// Outline level marking body text.
const BODY_TEXT_OUTLINE_LEVEL: u8 = 9;

const HEADING_PATTERN: usize = 0;

static HEADING_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(["heading", "title"])
        .expect("Failed to build heading matcher")
});

/// Decides whether a paragraph is a heading.
pub trait HeadingClassifier {
    /// Heading level (1-based) if `paragraph` opens a section, else `None`.
    fn heading_level(&self, paragraph: &Paragraph) -> Option<u8>;
}

impl<F> HeadingClassifier for F
where
    F: Fn(&Paragraph) -> Option<u8>,
{
    #[inline]
    fn heading_level(&self, paragraph: &Paragraph) -> Option<u8> {
        self(paragraph)
    }
}

/// Classifies by style label containment.
///
/// The label is the registered style name when a registry is attached and
/// knows the style, otherwise the raw style id. A label containing `heading`
/// or `title` (ASCII case-insensitive) marks a heading; `headingN` (spaces
/// allowed before N) gives level N within `1..=max_heading_level`, everything
/// else level 1. A bold run with visible text also marks a level-1 heading.
///
/// # Examples
///
/// ```rust
/// use docmodel::document::{HeadingClassifier, Paragraph, StyleNameClassifier};
///
/// let classifier = StyleNameClassifier::new();
/// assert_eq!(classifier.heading_level(&Paragraph::styled("Heading2", "Scope")), Some(2));
/// assert_eq!(classifier.heading_level(&Paragraph::styled("Title", "Report")), Some(1));
/// assert_eq!(classifier.heading_level(&Paragraph::styled("Normal", "Body")), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StyleNameClassifier<'a> {
    registry: Option<&'a StyleRegistry>,
    max_heading_level: u8,
    bold_runs_are_headings: bool,
}

impl Default for StyleNameClassifier<'_> {
    fn default() -> Self {
        Self {
            registry: None,
            max_heading_level: DEFAULT_MAX_HEADING_LEVEL,
            bold_runs_are_headings: true,
        }
    }
}

impl<'a> StyleNameClassifier<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &AnalyzerOptions) -> Self {
        Self {
            registry: None,
            max_heading_level: options.max_heading_level,
            bold_runs_are_headings: options.bold_runs_are_headings,
        }
    }

    /// Resolve style ids to their display names through `registry`.
    pub fn with_registry(mut self, registry: &'a StyleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    fn label(&self, style_id: &str) -> String {
        self.registry
            .and_then(|registry| registry.get_style(StyleType::Paragraph, style_id))
            .map(|style| style.name().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| style_id.to_string())
    }

    /// Level from a style label, `None` if the label names no heading.
    pub fn level_from_label(&self, label: &str) -> Option<u8> {
        let mut found = false;
        for m in HEADING_MATCHER.find_iter(label) {
            found = true;
            if m.pattern().as_usize() == HEADING_PATTERN
                && let Some(level) = parse_level(&label[m.end()..])
                && (1..=self.max_heading_level).contains(&level)
            {
                return Some(level);
            }
        }
        found.then_some(1)
    }
}

impl HeadingClassifier for StyleNameClassifier<'_> {
    fn heading_level(&self, paragraph: &Paragraph) -> Option<u8> {
        if let Some(style_id) = paragraph.style_id()
            && let Some(level) = self.level_from_label(&self.label(style_id))
        {
            return Some(level);
        }

        if self.bold_runs_are_headings && paragraph.runs.iter().any(|run| run.is_bold_text()) {
            return Some(1);
        }

        None
    }
}

/// Digits following `heading`, ignoring leading whitespace.
fn parse_level(rest: &str) -> Option<u8> {
    let rest = rest.trim_start();
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Classifies by the effective `outline_level` of the paragraph style.
///
/// Outline levels are 0-based (0 is a top-level heading, 9 marks body text).
/// Paragraphs whose style chain sets no outline level go to `fallback`.
pub struct OutlineLevelClassifier<'a, F = StyleNameClassifier<'a>> {
    registry: &'a StyleRegistry,
    fallback: F,
}

impl<'a> OutlineLevelClassifier<'a, StyleNameClassifier<'a>> {
    /// Use the style name classifier as the fallback.
    pub fn new(registry: &'a StyleRegistry) -> Self {
        Self {
            registry,
            fallback: StyleNameClassifier::new().with_registry(registry),
        }
    }
}

impl<'a, F: HeadingClassifier> OutlineLevelClassifier<'a, F> {
    pub fn with_fallback(registry: &'a StyleRegistry, fallback: F) -> Self {
        Self { registry, fallback }
    }

    fn outline_level(&self, style_id: &str) -> Option<u8> {
        self.registry
            .effective_properties(StyleType::Paragraph, style_id)
            .ok()?
            .paragraph?
            .outline_level
    }
}

impl<F: HeadingClassifier> HeadingClassifier for OutlineLevelClassifier<'_, F> {
    fn heading_level(&self, paragraph: &Paragraph) -> Option<u8> {
        match paragraph.style_id().and_then(|id| self.outline_level(id)) {
            Some(level) if level < BODY_TEXT_OUTLINE_LEVEL => Some(level + 1),
            Some(_) => None,
            None => self.fallback.heading_level(paragraph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::paragraph::Run;
    use crate::style::{ParagraphProperties, StyleDefinition, StyleProperties};

    #[test]
    fn test_heading_levels_from_style_id() {
        let classifier = StyleNameClassifier::new();
        assert_eq!(classifier.level_from_label("Heading1"), Some(1));
        assert_eq!(classifier.level_from_label("heading 3"), Some(3));
        assert_eq!(classifier.level_from_label("HEADING6"), Some(6));
        // Above the maximum falls back to 1
        assert_eq!(classifier.level_from_label("Heading7"), Some(1));
        assert_eq!(classifier.level_from_label("Heading0"), Some(1));
        assert_eq!(classifier.level_from_label("Subtitle"), Some(1));
        assert_eq!(classifier.level_from_label("BodyText"), None);
    }

    #[test]
    fn test_max_level_is_configurable() {
        let options = AnalyzerOptions::new().with_max_heading_level(9);
        let classifier = StyleNameClassifier::from_options(&options);
        assert_eq!(classifier.level_from_label("Heading8"), Some(8));
    }

    #[test]
    fn test_bold_run_rule() {
        let para = Paragraph::new("").with_run(Run::new("Findings").with_bold(true));
        assert_eq!(StyleNameClassifier::new().heading_level(&para), Some(1));

        let options = AnalyzerOptions::new().with_bold_runs_are_headings(false);
        assert_eq!(StyleNameClassifier::from_options(&options).heading_level(&para), None);

        let blank = Paragraph::new("").with_run(Run::new("  ").with_bold(true));
        assert_eq!(StyleNameClassifier::new().heading_level(&blank), None);
    }

    #[test]
    fn test_registry_name_is_used() {
        let registry = StyleRegistry::new();
        registry
            .add_paragraph_style(StyleDefinition::new("Kop2", "heading 2", StyleType::Paragraph))
            .unwrap();
        let classifier = StyleNameClassifier::new().with_registry(&registry);
        assert_eq!(classifier.heading_level(&Paragraph::styled("Kop2", "Over")), Some(2));
        assert_eq!(classifier.heading_level(&Paragraph::styled("Heading4", "x")), Some(4));
    }

    #[test]
    fn test_outline_level_classifier() {
        let registry = StyleRegistry::new();
        let outline = |level: u8| {
            StyleProperties::default().with_paragraph(ParagraphProperties {
                outline_level: Some(level),
                ..Default::default()
            })
        };
        registry
            .add_style(StyleDefinition::new("Chapter", "Chapter", StyleType::Paragraph).with_properties(outline(0)))
            .unwrap();
        registry
            .add_style(StyleDefinition::new("Clause", "Clause", StyleType::Paragraph).with_based_on("Chapter"))
            .unwrap();
        registry
            .add_style(StyleDefinition::new("HeadingBody", "Heading Body", StyleType::Paragraph).with_properties(outline(9)))
            .unwrap();

        let classifier = OutlineLevelClassifier::new(&registry);
        assert_eq!(classifier.heading_level(&Paragraph::styled("Chapter", "One")), Some(1));
        // Inherited through basedOn
        assert_eq!(classifier.heading_level(&Paragraph::styled("Clause", "1.1")), Some(1));
        // Explicit body text wins over the name
        assert_eq!(classifier.heading_level(&Paragraph::styled("HeadingBody", "x")), None);
        // No outline level: falls back to the name rule
        assert_eq!(classifier.heading_level(&Paragraph::styled("Heading2", "x")), Some(2));
    }

    #[test]
    fn test_closure_classifier() {
        let classifier = |p: &Paragraph| p.text.starts_with('#').then_some(1u8);
        assert_eq!(classifier.heading_level(&Paragraph::new("# Top")), Some(1));
        assert_eq!(classifier.heading_level(&Paragraph::new("body")), None);
    }
}
