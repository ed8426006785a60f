//! Doc validation errors.

use thiserror::Error;

/// A value is not a well-formed doc.
///
/// Variants raised against a particular value carry a rendering of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDoc {
    /// The value is neither a string, an array nor a doc object.
    #[error("unexpected doc '{found}', expected it to be 'string', 'array' or 'object'")]
    UnexpectedValue { found: String },

    /// The object's `type` is not a recognized doc kind.
    #[error("unexpected doc.type '{kind}' in {doc}")]
    UnknownType { kind: String, doc: String },

    /// A required field is absent or has the wrong shape.
    #[error("doc of type '{kind}' has a missing or malformed '{field}' in {doc}")]
    MissingField {
        kind: &'static str,
        field: &'static str,
        doc: String,
    },

    /// A conditional group was given no states.
    #[error("conditional group needs at least one expanded state")]
    EmptyExpandedStates,

    /// A group's first expanded state is not its contents.
    #[error("group's first expanded state is not its contents in {doc}")]
    ContentsMismatch { doc: String },
}
