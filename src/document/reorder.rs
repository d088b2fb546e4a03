//! Section-level reordering of the paragraph sequence.
use super::classify::HeadingClassifier;
use super::paragraph::Paragraph;
use super::structure::{DocumentStructure, StructureAnalyzer};
use crate::common::{Error, Result};
use std::collections::HashSet;

/// Permutes whole sections of a document.
///
/// The new order is validated completely before anything is touched: on any
/// error the paragraphs are left as they were. A successful reorder swaps the
/// paragraph vector in one assignment and re-analyzes it. A preamble section
/// (body text before the first heading) must keep position 0, so reordering
/// never changes the section count.
///
/// # Examples
///
/// ```rust
/// use docmodel::document::{ContentReorderer, Paragraph, StructureAnalyzer};
///
/// let mut paragraphs = vec![
///     Paragraph::styled("Heading1", "A"),
///     Paragraph::new("a"),
///     Paragraph::styled("Heading1", "B"),
/// ];
/// let analyzer = StructureAnalyzer::default();
/// let structure = analyzer.analyze(&paragraphs);
///
/// let reordered = ContentReorderer::new(&analyzer)
///     .reorder(&mut paragraphs, &structure, &["section_2", "section_1"])?;
/// assert_eq!(paragraphs[0].text, "B");
/// assert_eq!(reordered.sections()[1].title, "A");
/// # Ok::<(), docmodel::Error>(())
/// ```
pub struct ContentReorderer<'a, C> {
    analyzer: &'a StructureAnalyzer<C>,
}

impl<'a, C: HeadingClassifier> ContentReorderer<'a, C> {
    #[inline]
    pub fn new(analyzer: &'a StructureAnalyzer<C>) -> Self {
        Self { analyzer }
    }

    /// Rearrange `paragraphs` so the sections of `structure` appear in
    /// `new_order` (a permutation of their ids), returning the fresh
    /// structure.
    pub fn reorder<S: AsRef<str>>(
        &self,
        paragraphs: &mut Vec<Paragraph>,
        structure: &DocumentStructure,
        new_order: &[S],
    ) -> Result<DocumentStructure> {
        let order = self.plan(paragraphs, structure, new_order)?;
        let sections = structure.sections();

        let mut reordered = Vec::with_capacity(paragraphs.len());
        for index in order {
            reordered.extend_from_slice(&paragraphs[sections[index].paragraph_range.clone()]);
        }
        *paragraphs = reordered;

        tracing::info!(sections = sections.len(), "document sections reordered");

        Ok(self.analyzer.analyze(paragraphs))
    }

    /// Validate `new_order` against `structure` and the current paragraphs,
    /// returning section positions in their new order.
    fn plan<S: AsRef<str>>(
        &self,
        paragraphs: &[Paragraph],
        structure: &DocumentStructure,
        new_order: &[S],
    ) -> Result<Vec<usize>> {
        let sections = structure.sections();

        if new_order.len() != sections.len() {
            return Err(Error::InvalidReorderSet(format!(
                "new order has {} entries but the document has {} sections",
                new_order.len(),
                sections.len()
            )));
        }

        let mut seen = HashSet::with_capacity(new_order.len());
        let mut order = Vec::with_capacity(new_order.len());
        for id in new_order {
            let id = id.as_ref();
            let position = structure
                .position(id)
                .ok_or_else(|| Error::InvalidReorderSet(format!("unknown section '{}'", id)))?;
            if !seen.insert(position) {
                return Err(Error::InvalidReorderSet(format!("section '{}' listed twice", id)));
            }
            order.push(position);
        }

        // Sections must tile the paragraph sequence exactly
        let mut expected_start = 0;
        for section in sections {
            let range = &section.paragraph_range;
            if range.start != expected_start
                || range.end > paragraphs.len()
                || paragraphs[range.clone()] != section.paragraphs[..]
            {
                return Err(Error::InvalidReorderSet(format!(
                    "section '{}' does not match the current paragraphs",
                    section.id
                )));
            }
            expected_start = range.end;
        }
        if expected_start != paragraphs.len() {
            return Err(Error::InvalidReorderSet(
                "sections do not cover every paragraph".to_string(),
            ));
        }

        // A preamble has no heading to open it; anywhere but first it would
        // be absorbed by the section before it
        if let Some(first) = sections.first()
            && order.first() != Some(&0)
            && first
                .paragraphs
                .first()
                .is_some_and(|paragraph| self.analyzer.classifier().heading_level(paragraph).is_none())
        {
            return Err(Error::InvalidReorderSet(format!(
                "preamble section '{}' must stay first",
                first.id
            )));
        }

        Ok(order)
    }
}
