//! Output assembly.
//!
//! The printer appends fragments (borrowed doc text where possible) and cursor
//! placeholders to an [`Output`]; [`Output::finish`] joins them and recovers
//! the cursor region.

use std::borrow::Cow;

use crate::error::PrintError;

/// At most two cursor placeholders may be printed.
const MAX_CURSORS: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Fragment<'doc> {
    Text(Cow<'doc, str>),
    Cursor,
}

/// Fragment accumulator for one render.
#[derive(Debug, Default)]
pub(crate) struct Output<'doc> {
    fragments: Vec<Fragment<'doc>>,
    cursors: usize,
}

impl<'doc> Output<'doc> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text fragment.
    pub fn push(&mut self, text: impl Into<Cow<'doc, str>>) {
        let text = text.into();
        if !text.is_empty() {
            self.fragments.push(Fragment::Text(text));
        }
    }

    /// Append a cursor placeholder.
    pub fn push_cursor(&mut self) -> Result<(), PrintError> {
        if self.cursors >= MAX_CURSORS {
            return Err(PrintError::TooManyCursors);
        }
        self.cursors += 1;
        self.fragments.push(Fragment::Cursor);
        Ok(())
    }

    /// Remove trailing spaces and tabs from the current line, returning how
    /// many were removed.
    ///
    /// Stops at the first fragment with other content, and at a cursor
    /// placeholder so the cursor keeps its position relative to the text.
    pub fn trim(&mut self) -> usize {
        let mut trimmed = 0;
        while let Some(Fragment::Text(last)) = self.fragments.last_mut() {
            let kept = last.trim_end_matches([' ', '\t']).len();
            trimmed += last.len() - kept;
            if kept > 0 {
                truncate(last, kept);
                break;
            }
            self.fragments.pop();
        }
        trimmed
    }

    /// Join the fragments.
    ///
    /// With two cursor placeholders, the text between them is reported as
    /// the cursor node. With one, the placeholder is dropped.
    pub fn finish(self) -> PrintedDoc {
        let mut formatted = String::with_capacity(self.byte_len());
        let mut marks = Vec::with_capacity(self.cursors);
        for fragment in self.fragments {
            match fragment {
                Fragment::Text(text) => formatted.push_str(&text),
                Fragment::Cursor => marks.push(formatted.len()),
            }
        }
        let cursor = match marks[..] {
            [start, end] => Some(CursorNode {
                start,
                text: formatted[start..end].to_owned(),
            }),
            _ => None,
        };
        PrintedDoc { formatted, cursor }
    }

    fn byte_len(&self) -> usize {
        self.fragments
            .iter()
            .map(|fragment| match fragment {
                Fragment::Text(text) => text.len(),
                Fragment::Cursor => 0,
            })
            .sum()
    }
}

fn truncate<'doc>(text: &mut Cow<'doc, str>, len: usize) {
    match text {
        Cow::Borrowed(borrowed) => {
            let full: &'doc str = *borrowed;
            *borrowed = &full[..len];
        }
        Cow::Owned(owned) => owned.truncate(len),
    }
}

/// The cursor region recovered from two cursor placeholders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorNode {
    /// Byte offset of the region in the formatted text.
    pub start: usize,
    /// Text printed between the two placeholders.
    pub text: String,
}

/// The result of a render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrintedDoc {
    pub formatted: String,
    pub cursor: Option<CursorNode>,
}

impl PrintedDoc {
    /// The formatted text.
    pub fn as_str(&self) -> &str {
        &self.formatted
    }

    /// Byte offset of the cursor region, if the doc carried two cursors.
    pub fn cursor_node_start(&self) -> Option<usize> {
        self.cursor.as_ref().map(|cursor| cursor.start)
    }

    /// Text of the cursor region, if the doc carried two cursors.
    pub fn cursor_node_text(&self) -> Option<&str> {
        self.cursor.as_ref().map(|cursor| cursor.text.as_str())
    }

    /// Get the formatted output.
    pub fn into_string(self) -> String {
        self.formatted
    }
}
