//! Section analysis over a flat paragraph sequence.
use super::classify::{HeadingClassifier, StyleNameClassifier};
use super::outline::{Outline, OutlineBuilder};
use super::paragraph::Paragraph;
use crate::common::{Error, Result};
use crate::config::AnalyzerOptions;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A contiguous run of paragraphs opened by a heading (or the preamble).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// `section_1`, `section_2`, ... in document order
    pub id: String,
    pub title: String,
    /// Heading level, 1 is the top
    pub level: u8,
    /// Half-open index range into the analyzed paragraph sequence
    pub paragraph_range: Range<usize>,
    pub paragraphs: Vec<Paragraph>,
}

impl Section {
    /// Create an empty section starting at paragraph `start`.
    pub fn new(id: impl Into<String>, title: impl Into<String>, level: u8, start: usize) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            level: level.max(1),
            paragraph_range: start..start,
            paragraphs: Vec::new(),
        }
    }

    fn push(&mut self, paragraph: &Paragraph) {
        self.paragraphs.push(paragraph.clone());
        self.paragraph_range.end += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// Splits paragraphs into sections.
///
/// Deterministic and infallible: every paragraph ends up in exactly one
/// section, in order. A heading paragraph belongs to the section it opens;
/// body text before the first heading forms a preamble section.
///
/// # Examples
///
/// ```rust
/// use docmodel::document::{Paragraph, StructureAnalyzer};
///
/// let paragraphs = vec![
///     Paragraph::styled("Heading1", "Intro"),
///     Paragraph::styled("Normal", "Body1"),
///     Paragraph::styled("Heading1", "Chapter2"),
///     Paragraph::styled("Normal", "Body2"),
/// ];
///
/// let structure = StructureAnalyzer::default().analyze(&paragraphs);
/// assert_eq!(structure.sections().len(), 2);
/// assert_eq!(structure.sections()[1].title, "Chapter2");
/// ```
#[derive(Debug, Clone)]
pub struct StructureAnalyzer<C = StyleNameClassifier<'static>> {
    classifier: C,
    options: AnalyzerOptions,
}

impl Default for StructureAnalyzer<StyleNameClassifier<'static>> {
    fn default() -> Self {
        Self::from_options(AnalyzerOptions::default())
    }
}

impl StructureAnalyzer<StyleNameClassifier<'static>> {
    /// Analyzer using the style name classifier configured from `options`.
    pub fn from_options(options: AnalyzerOptions) -> Self {
        Self {
            classifier: StyleNameClassifier::from_options(&options),
            options,
        }
    }
}

impl<C: HeadingClassifier> StructureAnalyzer<C> {
    /// Analyzer with a custom classifier and default options.
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            options: AnalyzerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AnalyzerOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    #[inline]
    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Split `paragraphs` into sections.
    pub fn sections(&self, paragraphs: &[Paragraph]) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();
        let mut current: Option<Section> = None;

        for (index, paragraph) in paragraphs.iter().enumerate() {
            if let Some(level) = self.classifier.heading_level(paragraph) {
                if let Some(done) = current.take() {
                    sections.push(done);
                }
                let mut section = Section::new(
                    section_id(sections.len()),
                    paragraph.title_text(),
                    level,
                    index,
                );
                section.push(paragraph);
                current = Some(section);
            } else {
                current
                    .get_or_insert_with(|| {
                        Section::new(section_id(sections.len()), &self.options.preamble_title, 1, index)
                    })
                    .push(paragraph);
            }
        }

        sections.extend(current);
        sections
    }

    /// Analyze `paragraphs` into sections and their outline.
    pub fn analyze(&self, paragraphs: &[Paragraph]) -> DocumentStructure {
        let sections = self.sections(paragraphs);
        tracing::debug!(
            paragraphs = paragraphs.len(),
            sections = sections.len(),
            "document structure analyzed"
        );
        DocumentStructure {
            outline: OutlineBuilder::new(&self.options.outline_title).build(sections),
        }
    }
}

#[inline]
fn section_id(existing: usize) -> String {
    format!("section_{}", existing + 1)
}

/// Result of structure analysis: sections plus the outline over them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStructure {
    outline: Outline,
}

impl DocumentStructure {
    /// Sections in document order.
    #[inline]
    pub fn sections(&self) -> &[Section] {
        self.outline.sections()
    }

    #[inline]
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.outline.into_sections()
    }

    /// First section with exactly this title.
    pub fn find_section_by_title(&self, title: &str) -> Option<&Section> {
        self.sections().iter().find(|section| section.title == title)
    }

    /// Section with the given id.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections().iter().find(|section| section.id == id)
    }

    /// Paragraphs of the section with the given id.
    pub fn section_content(&self, id: &str) -> Result<&[Paragraph]> {
        self.section(id)
            .map(|section| section.paragraphs.as_slice())
            .ok_or_else(|| Error::SectionNotFound(id.to_string()))
    }

    /// Sections ordered by level, then by position.
    pub fn sections_by_level(&self) -> Vec<&Section> {
        let mut sorted: Vec<&Section> = self.sections().iter().collect();
        sorted.sort_by_key(|section| (section.level, section.paragraph_range.start));
        sorted
    }

    /// Position of the section with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections().iter().position(|section| section.id == id)
    }

    /// Total number of paragraphs covered.
    pub fn paragraph_count(&self) -> usize {
        self.sections().iter().map(Section::len).sum()
    }
}
