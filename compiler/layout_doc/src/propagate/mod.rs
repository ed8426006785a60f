//! Break propagation.
//!
//! Before layout, every group that contains an unconditional break (a
//! `BreakParent`, usually carried by a hard line) must render broken, and so
//! must every group enclosing it. The doc itself is never mutated: the result
//! is a [`PropagatedBreaks`] side table keyed by node identity.

use std::marker::PhantomData;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::doc::{Doc, DocKey, DocKind, Group};
use crate::traverse::{traverse_doc, DocVisitor, TraverseConditional, Visit};

/// Groups forced into break mode by propagation.
///
/// Borrows the doc it was computed for so the identity keys stay valid.
#[derive(Debug, Default)]
pub struct PropagatedBreaks<'doc> {
    broken: FxHashSet<DocKey>,
    _doc: PhantomData<&'doc Doc>,
}

impl<'doc> PropagatedBreaks<'doc> {
    /// A table with no propagated breaks.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether `doc` is a group that must render broken, either because its
    /// builder said so or because a break propagated into it.
    #[inline]
    pub fn is_broken(&self, doc: &Doc) -> bool {
        match doc.kind() {
            DocKind::Group(group) => group.should_break || self.broken.contains(&doc.key()),
            _ => false,
        }
    }

    /// Whether `doc` was marked by propagation (ignores `should_break`).
    #[inline]
    pub fn was_propagated(&self, doc: &Doc) -> bool {
        self.broken.contains(&doc.key())
    }

    /// Number of groups marked by propagation.
    pub fn len(&self) -> usize {
        self.broken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.broken.is_empty()
    }
}

struct Propagation<'doc> {
    broken: FxHashSet<DocKey>,
    visited: FxHashSet<DocKey>,
    groups: Vec<&'doc Doc>,
}

impl<'doc> Propagation<'doc> {
    fn is_broken(&self, doc: &Doc, group: &Group) -> bool {
        group.should_break || self.broken.contains(&doc.key())
    }

    /// Mark the innermost open group broken. Conditional groups choose
    /// between their states at print time and are left alone.
    fn break_parent_group(&mut self) {
        let Some(&parent) = self.groups.last() else {
            return;
        };
        if let DocKind::Group(group) = parent.kind() {
            if group.expanded_states.is_none() && !group.should_break {
                self.broken.insert(parent.key());
            }
        }
    }
}

impl<'doc> DocVisitor<'doc> for Propagation<'doc> {
    fn enter(&mut self, doc: &'doc Doc) -> Visit {
        match doc.kind() {
            DocKind::BreakParent => {
                self.break_parent_group();
                Visit::Descend
            }
            DocKind::Group(_) => {
                self.groups.push(doc);
                if self.visited.insert(doc.key()) {
                    Visit::Descend
                } else {
                    Visit::Skip
                }
            }
            _ => Visit::Descend,
        }
    }

    fn exit(&mut self, doc: &'doc Doc) {
        if let DocKind::Group(group) = doc.kind() {
            self.groups.pop();
            if self.is_broken(doc, group) {
                self.break_parent_group();
            }
        }
    }
}

/// Compute which groups must break because of a forced break inside them.
pub fn propagate_breaks(doc: &Doc) -> PropagatedBreaks<'_> {
    let mut propagation = Propagation {
        broken: FxHashSet::default(),
        visited: FxHashSet::default(),
        groups: Vec::new(),
    };
    traverse_doc(doc, &mut propagation, TraverseConditional::Yes);
    debug!(
        groups = propagation.visited.len(),
        broken = propagation.broken.len(),
        "propagated breaks"
    );
    PropagatedBreaks {
        broken: propagation.broken,
        _doc: PhantomData,
    }
}
