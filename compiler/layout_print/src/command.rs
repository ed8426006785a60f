//! Printer work items.

use std::rc::Rc;

use layout_doc::{Doc, GroupId};
use rustc_hash::FxHashMap;

use crate::indent::Indentation;

/// Rendering mode of a region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Lines render as spaces (or nothing, for soft lines).
    Flat,
    /// Lines render as newlines.
    Break,
}

/// What a command renders.
///
/// Besides whole docs, the printer schedules slices of a concat or fill (so
/// a fill can be consumed pairwise without rebuilding nodes) and the
/// synthetic hard line a `LineSuffixBoundary` injects.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Node<'doc> {
    Doc(&'doc Doc),
    Concat(&'doc [Doc]),
    Fill(&'doc [Doc]),
    HardLine,
}

/// A unit of pending work: a node plus the indentation and mode it renders
/// with.
#[derive(Clone, Debug)]
pub(crate) struct Command<'doc> {
    pub indent: Rc<Indentation>,
    pub mode: Mode,
    pub node: Node<'doc>,
}

impl<'doc> Command<'doc> {
    #[inline]
    pub fn new(indent: Rc<Indentation>, mode: Mode, node: Node<'doc>) -> Self {
        Command { indent, mode, node }
    }

    #[inline]
    pub fn doc(indent: Rc<Indentation>, mode: Mode, doc: &'doc Doc) -> Self {
        Command::new(indent, mode, Node::Doc(doc))
    }
}

/// Mode each identified group was printed in, written once per group.
pub(crate) type GroupModeMap = FxHashMap<GroupId, Mode>;
