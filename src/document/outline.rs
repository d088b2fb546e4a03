//! Outline tree over the section list.
//!
//! Nodes live in an index-based arena parallel to the section list: node `i`
//! is section `i`, with its parent index and child indices.
use super::structure::Section;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Node {
    parent: Option<usize>,
    children: Vec<usize>,
}

/// A forest of sections nested by heading level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    title: String,
    sections: Vec<Section>,
    nodes: Vec<Node>,
    roots: Vec<usize>,
}

/// Builds an [`Outline`] with the stack-of-open-ancestors algorithm.
///
/// Each section becomes a child of the nearest preceding section with a
/// strictly smaller level; a section with no such ancestor is a root.
///
/// # Examples
///
/// ```rust
/// use docmodel::document::{OutlineBuilder, Section};
///
/// let sections = [1, 2, 2, 1, 3]
///     .iter()
///     .enumerate()
///     .map(|(i, &level)| Section::new(format!("section_{}", i + 1), format!("S{}", i + 1), level, i))
///     .collect();
///
/// let outline = OutlineBuilder::new("Outline").build(sections);
/// assert_eq!(outline.roots().map(|e| e.index()).collect::<Vec<_>>(), [0, 3]);
/// assert_eq!(outline.children(0), [1, 2]);
/// assert_eq!(outline.children(3), [4]);
/// ```
#[derive(Debug, Clone)]
pub struct OutlineBuilder {
    title: String,
}

impl OutlineBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn build(&self, sections: Vec<Section>) -> Outline {
        let mut nodes = vec![Node::default(); sections.len()];
        let mut roots = Vec::new();
        let mut stack: Vec<usize> = Vec::new();

        for (index, section) in sections.iter().enumerate() {
            // Close every open ancestor at the same or a deeper level
            while stack
                .last()
                .is_some_and(|&top| sections[top].level >= section.level)
            {
                stack.pop();
            }

            match stack.last() {
                Some(&parent) => {
                    nodes[index].parent = Some(parent);
                    nodes[parent].children.push(index);
                },
                None => roots.push(index),
            }
            stack.push(index);
        }

        Outline {
            title: self.title.clone(),
            sections,
            nodes,
            roots,
        }
    }
}

impl Outline {
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sections in document order.
    #[inline]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub(crate) fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Top-level entries in document order.
    pub fn roots(&self) -> impl Iterator<Item = OutlineEntry<'_>> + '_ {
        self.roots.iter().map(move |&index| OutlineEntry { outline: self, index })
    }

    /// Entry for the section at `index`.
    pub fn entry(&self, index: usize) -> Option<OutlineEntry<'_>> {
        (index < self.sections.len()).then_some(OutlineEntry { outline: self, index })
    }

    /// Parent index of the section at `index`.
    #[inline]
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.nodes.get(index).and_then(|node| node.parent)
    }

    /// Child indices of the section at `index`.
    #[inline]
    pub fn children(&self, index: usize) -> &[usize] {
        self.nodes
            .get(index)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Depth-first, pre-order walk yielding `(depth, entry)`; roots have
    /// depth 0.
    pub fn walk(&self) -> Vec<(usize, OutlineEntry<'_>)> {
        let mut out = Vec::with_capacity(self.sections.len());
        let mut stack: Vec<(usize, usize)> = self.roots.iter().rev().map(|&i| (0, i)).collect();

        while let Some((depth, index)) = stack.pop() {
            out.push((depth, OutlineEntry { outline: self, index }));
            stack.extend(self.children(index).iter().rev().map(|&child| (depth + 1, child)));
        }

        out
    }
}

impl fmt::Display for Outline {
    /// Indented text rendering, two spaces per depth.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.title)?;
        for (depth, entry) in self.walk() {
            let section = entry.section();
            writeln!(
                f,
                "{}{} (level {})",
                "  ".repeat(depth + 1),
                section.title,
                section.level
            )?;
        }
        Ok(())
    }
}

/// Borrowed view of one outline node.
#[derive(Debug, Clone, Copy)]
pub struct OutlineEntry<'a> {
    outline: &'a Outline,
    index: usize,
}

impl<'a> OutlineEntry<'a> {
    /// Index of the section in document order.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn section(&self) -> &'a Section {
        &self.outline.sections[self.index]
    }

    pub fn parent(&self) -> Option<OutlineEntry<'a>> {
        self.outline.parent(self.index).map(|index| OutlineEntry {
            outline: self.outline,
            index,
        })
    }

    pub fn children(&self) -> impl Iterator<Item = OutlineEntry<'a>> + 'a {
        let outline = self.outline;
        outline
            .children(self.index)
            .iter()
            .map(move |&index| OutlineEntry { outline, index })
    }

    /// Number of ancestors.
    pub fn depth(&self) -> usize {
        std::iter::successors(self.outline.parent(self.index), |&i| self.outline.parent(i)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline_for(levels: &[u8]) -> Outline {
        let sections = levels
            .iter()
            .enumerate()
            .map(|(i, &level)| Section::new(format!("section_{}", i + 1), format!("S{}", i + 1), level, i))
            .collect();
        OutlineBuilder::new("Document Outline").build(sections)
    }

    #[test]
    fn test_stack_nesting() {
        let outline = outline_for(&[1, 2, 2, 1, 3]);

        let roots: Vec<_> = outline.roots().map(|e| e.section().id.clone()).collect();
        assert_eq!(roots, ["section_1", "section_4"]);
        assert_eq!(outline.parent(2), Some(0));
        assert_eq!(outline.parent(4), Some(3));
        assert_eq!(outline.children(0), [1, 2]);
        assert_eq!(outline.entry(4).unwrap().depth(), 1);
    }

    #[test]
    fn test_roots_are_not_only_level_one() {
        // A leading level-2 section has no open ancestor
        let outline = outline_for(&[2, 1, 2]);
        assert_eq!(outline.roots().count(), 2);
        assert_eq!(outline.parent(2), Some(1));
    }

    #[test]
    fn test_walk_is_preorder() {
        let outline = outline_for(&[1, 2, 3, 2, 1]);
        let order: Vec<(usize, usize)> = outline.walk().iter().map(|(d, e)| (*d, e.index())).collect();
        assert_eq!(order, [(0, 0), (1, 1), (2, 2), (1, 3), (0, 4)]);
    }

    #[test]
    fn test_display() {
        let outline = outline_for(&[1, 2]);
        assert_eq!(
            outline.to_string(),
            "Document Outline:\n  S1 (level 1)\n    S2 (level 2)\n"
        );
    }

    #[test]
    fn test_empty() {
        let outline = outline_for(&[]);
        assert!(outline.is_empty());
        assert_eq!(outline.roots().count(), 0);
        assert!(outline.children(7).is_empty());
    }
}
