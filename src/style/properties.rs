//! Style property bags and the field-level merge policy.
//!
//! Every mergeable scalar is an `Option`: `None` means "not provided", which
//! keeps a legitimately false/zero value distinguishable from an unset one.
//! The same policy serves conflict merging and `basedOn` chain resolution.
use super::enums::{Alignment, ListKind, StyleType};
use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// Layer one value over another.
pub trait Merge {
    /// Merge `newer` over `self`; whatever `newer` explicitly sets wins.
    fn merge(&self, newer: &Self) -> Self;
}

/// Scalar policy: the newer value wins only if it is present.
#[inline]
pub fn merge_scalar<T: Clone>(original: &Option<T>, newer: &Option<T>) -> Option<T> {
    newer.as_ref().or(original.as_ref()).cloned()
}

/// List policy: union without duplicates, original order first, then the
/// unseen newer items.
pub fn merge_list<T: Clone + Eq + Hash>(original: &[T], newer: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(original.len() + newer.len());
    original
        .iter()
        .chain(newer)
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Nested bag policy: merge field-by-field, or take whichever side exists.
#[inline]
pub fn merge_bag<T: Merge + Clone>(original: &Option<T>, newer: &Option<T>) -> Option<T> {
    match (original, newer) {
        (Some(o), Some(n)) => Some(o.merge(n)),
        (Some(o), None) => Some(o.clone()),
        (None, Some(n)) => Some(n.clone()),
        (None, None) => None,
    }
}

macro_rules! merge_scalars {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl Merge for $ty {
            fn merge(&self, newer: &Self) -> Self {
                Self {
                    $($field: merge_scalar(&self.$field, &newer.$field)),+
                }
            }
        }

        impl $ty {
            /// Check whether no field is set.
            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())+
            }
        }
    };
}

/// Run-level font formatting (`w:rPr`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontProperties {
    /// Font family name (e.g., "Calibri")
    pub name: Option<String>,
    /// Font size in half-points (e.g., 24 = 12pt)
    pub size: Option<u32>,
    /// Font color (RGB hex, e.g., "FF0000")
    pub color: Option<String>,
    /// Highlight or background color
    pub highlight: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strike: Option<bool>,
    pub small_caps: Option<bool>,
    pub all_caps: Option<bool>,
}

merge_scalars!(FontProperties {
    name,
    size,
    color,
    highlight,
    bold,
    italic,
    underline,
    strike,
    small_caps,
    all_caps,
});

/// Paragraph formatting (`w:pPr`). Lengths are in twips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphProperties {
    pub alignment: Option<Alignment>,
    pub indent_left: Option<i32>,
    pub indent_right: Option<i32>,
    pub indent_first_line: Option<i32>,
    pub space_before: Option<i32>,
    pub space_after: Option<i32>,
    pub line_spacing: Option<i32>,
    pub keep_lines: Option<bool>,
    pub keep_next: Option<bool>,
    pub page_break_before: Option<bool>,
    pub widow_control: Option<bool>,
    /// Outline level, 0-based; 9 marks body text
    pub outline_level: Option<u8>,
}

merge_scalars!(ParagraphProperties {
    alignment,
    indent_left,
    indent_right,
    indent_first_line,
    space_before,
    space_after,
    line_spacing,
    keep_lines,
    keep_next,
    page_break_before,
    widow_control,
    outline_level,
});

/// Table formatting (`w:tblPr`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableProperties {
    pub alignment: Option<Alignment>,
    pub indent: Option<i32>,
    pub cell_spacing: Option<i32>,
    pub row_band_size: Option<u32>,
    pub allow_overlap: Option<bool>,
    pub allow_break: Option<bool>,
}

merge_scalars!(TableProperties {
    alignment,
    indent,
    cell_spacing,
    row_band_size,
    allow_overlap,
    allow_break,
});

/// Numbering formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberingProperties {
    /// Number format (e.g., "decimal", "lowerRoman")
    pub format: Option<String>,
    pub start: Option<u32>,
    pub level: Option<u8>,
    pub restart: Option<bool>,
    pub legal: Option<bool>,
}

merge_scalars!(NumberingProperties {
    format,
    start,
    level,
    restart,
    legal,
});

/// One level of a list definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListLevel {
    pub index: u8,
    pub start: Option<u32>,
    pub format: Option<String>,
    pub indent: Option<i32>,
}

impl ListLevel {
    /// Create an empty level with the given index.
    #[inline]
    pub fn new(index: u8) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }
}

impl Merge for ListLevel {
    fn merge(&self, newer: &Self) -> Self {
        Self {
            index: self.index,
            start: merge_scalar(&self.start, &newer.start),
            format: merge_scalar(&self.format, &newer.format),
            indent: merge_scalar(&self.indent, &newer.indent),
        }
    }
}

/// List formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListProperties {
    pub kind: Option<ListKind>,
    pub restart: Option<bool>,
    pub legal: Option<bool>,
    pub levels: Vec<ListLevel>,
}

impl ListProperties {
    /// Check whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.restart.is_none() && self.legal.is_none() && self.levels.is_empty()
    }
}

impl Merge for ListProperties {
    fn merge(&self, newer: &Self) -> Self {
        // Levels are keyed by index: shared indices merge, new indices append
        let mut levels = self.levels.clone();
        for level in &newer.levels {
            match levels.iter_mut().find(|l| l.index == level.index) {
                Some(existing) => *existing = existing.merge(level),
                None => levels.push(level.clone()),
            }
        }

        Self {
            kind: merge_scalar(&self.kind, &newer.kind),
            restart: merge_scalar(&self.restart, &newer.restart),
            legal: merge_scalar(&self.legal, &newer.legal),
            levels,
        }
    }
}

/// The property bag of a style definition.
///
/// Which bags are allowed depends on the style type; see
/// [`check_shape`](Self::check_shape).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleProperties {
    pub font: Option<FontProperties>,
    pub paragraph: Option<ParagraphProperties>,
    pub table: Option<TableProperties>,
    pub numbering: Option<NumberingProperties>,
    pub list: Option<ListProperties>,
}

impl Merge for StyleProperties {
    fn merge(&self, newer: &Self) -> Self {
        Self {
            font: merge_bag(&self.font, &newer.font),
            paragraph: merge_bag(&self.paragraph, &newer.paragraph),
            table: merge_bag(&self.table, &newer.table),
            numbering: merge_bag(&self.numbering, &newer.numbering),
            list: merge_bag(&self.list, &newer.list),
        }
    }
}

impl StyleProperties {
    /// Builder: set the font bag.
    #[inline]
    pub fn with_font(mut self, font: FontProperties) -> Self {
        self.font = Some(font);
        self
    }

    /// Builder: set the paragraph bag.
    #[inline]
    pub fn with_paragraph(mut self, paragraph: ParagraphProperties) -> Self {
        self.paragraph = Some(paragraph);
        self
    }

    /// Builder: set the table bag.
    #[inline]
    pub fn with_table(mut self, table: TableProperties) -> Self {
        self.table = Some(table);
        self
    }

    /// Builder: set the numbering bag.
    #[inline]
    pub fn with_numbering(mut self, numbering: NumberingProperties) -> Self {
        self.numbering = Some(numbering);
        self
    }

    /// Builder: set the list bag.
    #[inline]
    pub fn with_list(mut self, list: ListProperties) -> Self {
        self.list = Some(list);
        self
    }

    /// Check whether no bag is present.
    pub fn is_empty(&self) -> bool {
        self.font.is_none()
            && self.paragraph.is_none()
            && self.table.is_none()
            && self.numbering.is_none()
            && self.list.is_none()
    }

    /// Verify that only the bags meaningful for `style_type` are present.
    pub fn check_shape(&self, style_type: StyleType) -> Result<()> {
        let (font, paragraph, table, numbering, list) = match style_type {
            StyleType::Paragraph => (true, true, false, false, false),
            StyleType::Character => (true, false, false, false, false),
            StyleType::Table => (true, true, true, false, false),
            StyleType::Numbering => (false, true, false, true, false),
            StyleType::List => (false, true, false, false, true),
        };

        let offending = [
            ("font", font, self.font.is_some()),
            ("paragraph", paragraph, self.paragraph.is_some()),
            ("table", table, self.table.is_some()),
            ("numbering", numbering, self.numbering.is_some()),
            ("list", list, self.list.is_some()),
        ]
        .into_iter()
        .find(|(_, allowed, present)| *present && !allowed);

        match offending {
            Some((bag, _, _)) => Err(Error::InvalidStyle(format!(
                "{} properties are not allowed on a {} style",
                bag, style_type
            ))),
            None => Ok(()),
        }
    }

    /// Range checks on numeric fields.
    pub fn validate(&self) -> Result<()> {
        if let Some(font) = &self.font
            && font.size == Some(0)
        {
            return Err(Error::InvalidStyle("font size must be positive".to_string()));
        }

        if let Some(paragraph) = &self.paragraph {
            let lengths = [
                ("left indent", paragraph.indent_left),
                ("right indent", paragraph.indent_right),
                ("first line indent", paragraph.indent_first_line),
                ("space before", paragraph.space_before),
                ("space after", paragraph.space_after),
                ("line spacing", paragraph.line_spacing),
            ];
            if let Some((field, _)) = lengths.iter().find(|(_, v)| v.is_some_and(|v| v < 0)) {
                return Err(Error::InvalidStyle(format!("{} cannot be negative", field)));
            }
            if paragraph.outline_level.is_some_and(|level| level > 9) {
                return Err(Error::InvalidStyle(
                    "outline level must be between 0 and 9".to_string(),
                ));
            }
        }

        if let Some(table) = &self.table
            && table.cell_spacing.is_some_and(|v| v < 0)
        {
            return Err(Error::InvalidStyle("cell spacing cannot be negative".to_string()));
        }

        Ok(())
    }
}
