//! Word built-in style ids.
//!
//! Used to infer [`StyleCategory::BuiltIn`](super::StyleCategory::BuiltIn) for
//! definitions registered without an explicit category.
use phf::phf_set;

static BUILTIN_STYLE_IDS: phf::Set<&'static str> = phf_set! {
    "Normal",
    "DefaultParagraphFont",
    "TableNormal",
    "NoList",
    "Title",
    "Subtitle",
    "Heading1",
    "Heading2",
    "Heading3",
    "Heading4",
    "Heading5",
    "Heading6",
    "Heading7",
    "Heading8",
    "Heading9",
    "ListParagraph",
    "ListBullet",
    "ListNumber",
    "Quote",
    "IntenseQuote",
    "Caption",
    "TOCHeading",
    "TOC1",
    "TOC2",
    "TOC3",
    "Header",
    "Footer",
    "FootnoteText",
    "FootnoteReference",
    "Hyperlink",
    "Strong",
    "Emphasis",
    "TableGrid",
    "NoSpacing",
};

/// Check whether `style_id` names a Word built-in style.
#[inline]
pub fn is_builtin_style_id(style_id: &str) -> bool {
    BUILTIN_STYLE_IDS.contains(style_id)
}
