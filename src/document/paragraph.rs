//! Paragraph and run input model.
//!
//! These are the already-parsed paragraphs handed over by the XML layer; the
//! engine only reads style references and a few direct formatting bits.
use serde::{Deserialize, Serialize};

/// A text run with optional direct formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Run {
    pub text: String,
    /// Character style id (`w:rStyle`)
    pub style_id: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub font_name: Option<String>,
    /// Font size in half-points
    pub font_size: Option<u32>,
}

impl Run {
    /// Create a plain run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn with_font_name(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = Some(font_name.into());
        self
    }

    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Check whether the run is explicitly bold and carries visible text.
    #[inline]
    pub fn is_bold_text(&self) -> bool {
        self.bold == Some(true) && !self.text.trim().is_empty()
    }
}

/// A paragraph: its text, paragraph style reference, and runs.
///
/// # Examples
///
/// ```rust
/// use docmodel::document::{Paragraph, Run};
///
/// let para = Paragraph::new("Introduction")
///     .with_style("Heading1")
///     .with_run(Run::new(" Introduction "));
/// assert_eq!(para.title_text(), "Introduction");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paragraph {
    pub text: String,
    /// Paragraph style id (`w:pStyle`)
    pub style_id: Option<String>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Create a paragraph without style or runs.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a paragraph with a style reference.
    pub fn styled(style_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(text).with_style(style_id)
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    /// Style id, with an empty reference treated as absent.
    #[inline]
    pub fn style_id(&self) -> Option<&str> {
        self.style_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Text used as a section title: the concatenated run text, trimmed.
    ///
    /// A paragraph without runs uses its trimmed paragraph text instead of
    /// an empty title. This extends run-only title extraction so that
    /// paragraphs built from plain text still get a title.
    pub fn title_text(&self) -> String {
        if self.runs.is_empty() {
            return self.text.trim().to_string();
        }
        let joined: String = self.runs.iter().map(|run| run.text.as_str()).collect();
        joined.trim().to_string()
    }
}
