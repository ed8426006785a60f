//! Structural validation.
//!
//! The node enum makes most malformed docs unrepresentable. What remains are
//! group invariants the type cannot express: a group with expanded states
//! needs at least one, and the first must be the group's contents.

use rustc_hash::FxHashSet;

use crate::doc::{Doc, DocKey, DocKind};
use crate::error::InvalidDoc;
use crate::traverse::{traverse_doc, DocVisitor, TraverseConditional, Visit};

struct Validator {
    checked: FxHashSet<DocKey>,
    error: Option<InvalidDoc>,
}

impl<'doc> DocVisitor<'doc> for Validator {
    fn enter(&mut self, doc: &'doc Doc) -> Visit {
        if self.error.is_some() || !self.checked.insert(doc.key()) {
            return Visit::Skip;
        }
        if let DocKind::Group(group) = doc.kind() {
            if let Some(states) = &group.expanded_states {
                match states.first() {
                    None => self.error = Some(InvalidDoc::EmptyExpandedStates),
                    Some(first) if !Doc::ptr_eq(first, &group.contents) && first != &group.contents => {
                        self.error = Some(InvalidDoc::ContentsMismatch {
                            doc: doc.to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Visit::Descend
    }

    fn wants_exit(&self) -> bool {
        false
    }
}

/// Check the invariants the node types cannot express.
///
/// Shared subtrees are checked once.
pub fn validate_doc(doc: &Doc) -> Result<(), InvalidDoc> {
    let mut validator = Validator {
        checked: FxHashSet::default(),
        error: None,
    };
    traverse_doc(doc, &mut validator, TraverseConditional::Yes);
    match validator.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
mod tests;
