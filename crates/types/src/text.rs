//! Text pushed to label sinks.

use std::ops::Range;

/// Relative size used for a shrunken AM/PM designator
pub const SMALL_RELATIVE_SIZE: f32 = 0.7;

/// Label text, either plain or with one sub-range drawn at a relative size
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayText {
    Plain(String),
    Styled {
        text: String,
        /// Byte range into `text`
        span: Range<usize>,
        relative_size: f32,
    },
}

impl DisplayText {
    pub fn plain(text: impl Into<String>) -> Self {
        DisplayText::Plain(text.into())
    }

    /// The characters shown, without styling
    pub fn as_str(&self) -> &str {
        match self {
            DisplayText::Plain(text) => text,
            DisplayText::Styled { text, .. } => text,
        }
    }

    /// The styled slice, if any
    pub fn styled_part(&self) -> Option<&str> {
        match self {
            DisplayText::Plain(_) => None,
            DisplayText::Styled { text, span, .. } => text.get(span.clone()),
        }
    }

    pub fn is_styled(&self) -> bool {
        matches!(self, DisplayText::Styled { .. })
    }
}

impl std::fmt::Display for DisplayText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
