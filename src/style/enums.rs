//! Enumerations shared by the style model.
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Style type (namespace) of a style definition.
///
/// Style ids are unique within a type, so `Heading1` may exist both as a
/// paragraph style and as a character style.
///
/// # Examples
///
/// ```rust
/// use docmodel::style::StyleType;
///
/// let style_type = StyleType::Paragraph;
/// assert_eq!(style_type.to_xml(), "paragraph");
/// assert_eq!(StyleType::from_xml("numbering"), Some(StyleType::Numbering));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum StyleType {
    /// Paragraph style.
    Paragraph = 0,
    /// Character (run) style.
    Character = 1,
    /// Table style.
    Table = 2,
    /// Numbering style.
    Numbering = 3,
    /// List style.
    List = 4,
}

impl StyleType {
    /// Number of style namespaces.
    pub const COUNT: usize = 5;

    /// All style types in lookup order.
    pub const ALL: [StyleType; Self::COUNT] = [
        Self::Paragraph,
        Self::Character,
        Self::Table,
        Self::Numbering,
        Self::List,
    ];

    /// Dense index used for per-namespace storage.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Convert the style type to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Character => "character",
            Self::Table => "table",
            Self::Numbering => "numbering",
            Self::List => "list",
        }
    }

    /// Parse style type from XML attribute value.
    ///
    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "paragraph" => Some(Self::Paragraph),
            "character" => Some(Self::Character),
            "table" => Some(Self::Table),
            "numbering" => Some(Self::Numbering),
            "list" => Some(Self::List),
            _ => None,
        }
    }

    /// The namespace a `basedOn` reference may fall back to when the id is
    /// missing from this one.
    #[inline]
    pub const fn compatible(self) -> Option<Self> {
        match self {
            Self::Numbering => Some(Self::List),
            Self::List => Some(Self::Numbering),
            _ => None,
        }
    }

    /// The namespace a `link` companion lives in.
    #[inline]
    pub const fn linked(self) -> Option<Self> {
        match self {
            Self::Paragraph => Some(Self::Character),
            Self::Character => Some(Self::Paragraph),
            _ => None,
        }
    }
}

impl Default for StyleType {
    #[inline]
    fn default() -> Self {
        // A style without an explicit type is a paragraph style
        Self::Paragraph
    }
}

impl fmt::Display for StyleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paragraph => write!(f, "Paragraph"),
            Self::Character => write!(f, "Character"),
            Self::Table => write!(f, "Table"),
            Self::Numbering => write!(f, "Numbering"),
            Self::List => write!(f, "List"),
        }
    }
}

/// Origin of a style definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleCategory {
    /// Shipped with Word (`Normal`, `Heading1`, ...)
    BuiltIn,
    /// Defined by the document or template
    Custom,
    /// Defined interactively by the user
    User,
}

impl StyleCategory {
    /// Infer the category of a style id from the built-in style table.
    #[inline]
    pub fn infer(style_id: &str) -> Self {
        if super::builtin::is_builtin_style_id(style_id) {
            Self::BuiltIn
        } else {
            Self::Custom
        }
    }
}

bitflags! {
    /// Visibility and gallery flags of a style (`w:semiHidden`, `w:qFormat`, ...).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct StyleFlag: u8 {
        /// Hidden from the main UI but still usable
        const SEMI_HIDDEN = 0x01;
        /// Unhide once the style is used in the document
        const UNHIDE_WHEN_USED = 0x02;
        /// Shown in the quick style gallery
        const Q_FORMAT = 0x04;
        /// Cannot be applied under formatting protection
        const LOCKED = 0x08;
        /// Hidden completely
        const HIDDEN = 0x10;
    }
}

/// Style flags with tagged presence.
///
/// `explicit` records which flags were set on purpose, so a flag that was
/// explicitly cleared is distinguishable from one that was never mentioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StyleFlags {
    values: StyleFlag,
    explicit: StyleFlag,
}

impl StyleFlags {
    /// Empty flag set with nothing explicitly set.
    #[inline]
    pub const fn new() -> Self {
        Self {
            values: StyleFlag::empty(),
            explicit: StyleFlag::empty(),
        }
    }

    /// Explicitly set or clear `flag`.
    #[inline]
    pub fn set(&mut self, flag: StyleFlag, on: bool) {
        self.explicit.insert(flag);
        self.values.set(flag, on);
    }

    /// Builder form of [`set`](Self::set).
    #[inline]
    pub fn with(mut self, flag: StyleFlag, on: bool) -> Self {
        self.set(flag, on);
        self
    }

    /// `Some(value)` when every bit of `flag` was explicitly set, else `None`.
    #[inline]
    pub fn get(&self, flag: StyleFlag) -> Option<bool> {
        self.explicit
            .contains(flag)
            .then(|| self.values.contains(flag))
    }

    /// Whether `flag` is on (unset counts as off).
    #[inline]
    pub fn contains(&self, flag: StyleFlag) -> bool {
        self.values.contains(flag)
    }

    /// Flags that are on.
    #[inline]
    pub fn values(&self) -> StyleFlag {
        self.values
    }

    /// Flags that were explicitly set or cleared.
    #[inline]
    pub fn explicit(&self) -> StyleFlag {
        self.explicit
    }

    /// Layer `newer` over `self`: explicit bits of `newer` win.
    pub fn merge(&self, newer: &Self) -> Self {
        Self {
            values: (self.values & !newer.explicit) | (newer.values & newer.explicit),
            explicit: self.explicit | newer.explicit,
        }
    }
}

/// Horizontal alignment of paragraphs and tables (`w:jc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    Distribute,
}

impl Alignment {
    /// Convert to the `w:jc` attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "both",
            Self::Distribute => "distribute",
        }
    }

    /// Parse a `w:jc` attribute value, accepting the bidi-aware aliases.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "left" | "start" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            "both" | "justify" => Some(Self::Justify),
            "distribute" => Some(Self::Distribute),
            _ => None,
        }
    }
}

/// Kind of list a list style produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Bullet,
    Numbered,
    Mixed,
}
