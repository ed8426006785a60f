//! Print errors.

use layout_doc::InvalidDoc;
use thiserror::Error;

/// Errors that abort a render.
///
/// Both are programmer errors in the doc handed to the printer. No partial
/// output is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrintError {
    /// The doc failed validation.
    #[error(transparent)]
    InvalidDoc(#[from] InvalidDoc),

    /// More than two cursor placeholders were printed.
    #[error("there are too many cursors in the doc (at most two are allowed)")]
    TooManyCursors,
}
