//! Doc node model.
//!
//! A [`Doc`] is a cheap, reference-counted handle to an immutable [`DocKind`].
//! Cloning a `Doc` shares the node, and node identity (the allocation) is what
//! break propagation and [`map_doc`](crate::map_doc) key their side tables on.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Handle to an immutable doc node.
///
/// Equality is structural. Use [`Doc::ptr_eq`] or [`Doc::key`] when identity
/// matters.
#[derive(Clone, PartialEq, Eq)]
pub struct Doc(Rc<DocKind>);

impl Doc {
    /// Wrap a node.
    #[inline]
    pub fn new(kind: DocKind) -> Self {
        Doc(Rc::new(kind))
    }

    /// The node this handle points to.
    #[inline]
    pub fn kind(&self) -> &DocKind {
        &self.0
    }

    /// Identity of the node, stable for as long as any handle to it is alive.
    #[inline]
    pub fn key(&self) -> DocKey {
        DocKey(Rc::as_ptr(&self.0) as usize)
    }

    /// Check whether two handles point to the same node.
    #[inline]
    pub fn ptr_eq(a: &Doc, b: &Doc) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// The empty doc (an empty text).
    pub fn empty() -> Self {
        Doc::new(DocKind::Text(String::new()))
    }

    /// Check for an empty text node.
    pub fn is_empty_text(&self) -> bool {
        matches!(self.kind(), DocKind::Text(text) if text.is_empty())
    }

    /// Text content, if this is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self.kind() {
            DocKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Short name of the node kind, as used in diagnostics and JSON.
    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }
}

impl Drop for Doc {
    /// Frees uniquely owned descendants from a heap worklist so that dropping
    /// a deep doc does not recurse once per level.
    fn drop(&mut self) {
        let Some(kind) = Rc::get_mut(&mut self.0) else {
            return;
        };
        let mut pending = Vec::new();
        take_children(std::mem::replace(kind, DocKind::Trim), &mut pending);
        while let Some(mut doc) = pending.pop() {
            if let Some(kind) = Rc::get_mut(&mut doc.0) {
                take_children(std::mem::replace(kind, DocKind::Trim), &mut pending);
            }
            // `doc` is now a leaf (or shared) and drops without descending.
        }
    }
}

fn take_children(kind: DocKind, out: &mut Vec<Doc>) {
    match kind {
        DocKind::Concat(parts) | DocKind::Fill(parts) => out.extend(parts),
        DocKind::Group(group) => {
            out.push(group.contents);
            out.extend(group.expanded_states.into_iter().flatten());
        }
        DocKind::IfBreak {
            break_contents,
            flat_contents,
            ..
        } => {
            out.push(break_contents);
            out.push(flat_contents);
        }
        DocKind::IndentIfBreak { contents, .. }
        | DocKind::Indent(contents)
        | DocKind::Align { contents, .. }
        | DocKind::LineSuffix(contents)
        | DocKind::Label { contents, .. } => out.push(contents),
        DocKind::Text(_)
        | DocKind::Line(_)
        | DocKind::Trim
        | DocKind::LineSuffixBoundary
        | DocKind::BreakParent
        | DocKind::Cursor => {}
    }
}

impl fmt::Debug for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Doc {
    fn from(text: &str) -> Self {
        Doc::new(DocKind::Text(text.to_owned()))
    }
}

impl From<String> for Doc {
    fn from(text: String) -> Self {
        Doc::new(DocKind::Text(text))
    }
}

impl From<Vec<Doc>> for Doc {
    fn from(parts: Vec<Doc>) -> Self {
        Doc::new(DocKind::Concat(parts))
    }
}

impl From<DocKind> for Doc {
    fn from(kind: DocKind) -> Self {
        Doc::new(kind)
    }
}

/// Identity of a doc node, usable as a hash key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocKey(usize);

/// The closed set of doc node kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocKind {
    /// Literal content.
    Text(String),
    /// Ordered concatenation.
    Concat(Vec<Doc>),
    /// A potential line break.
    Line(LineKind),
    /// A region whose mode is decided once by the printer.
    Group(Group),
    /// Alternating content/separator parts, each separator decided locally.
    Fill(Vec<Doc>),
    /// Content chosen by the mode of the enclosing (or referenced) group.
    IfBreak {
        break_contents: Doc,
        flat_contents: Doc,
        group_id: Option<GroupId>,
    },
    /// Indents `contents` when the referenced group breaks (or when it is
    /// flat, if `negate` is set).
    IndentIfBreak {
        contents: Doc,
        group_id: GroupId,
        negate: bool,
    },
    /// One more indentation level for line breaks inside `contents`.
    Indent(Doc),
    /// Alignment change for line breaks inside `contents`.
    Align {
        alignment: Alignment,
        contents: Doc,
    },
    /// Retract trailing spaces and tabs already emitted on the current line.
    Trim,
    /// Content deferred to just before the next real newline.
    LineSuffix(Doc),
    /// Flushes pending line suffixes with a hard line.
    LineSuffixBoundary,
    /// Forces the enclosing group to break. Consumed by propagation.
    BreakParent,
    /// Cursor placeholder, recovered in the output.
    Cursor,
    /// Opaque wrapper for caller introspection; transparent to layout.
    Label { label: String, contents: Doc },
}

impl DocKind {
    /// Short name of the node kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            DocKind::Text(_) => "string",
            DocKind::Concat(_) => "array",
            DocKind::Line(_) => "line",
            DocKind::Group(_) => "group",
            DocKind::Fill(_) => "fill",
            DocKind::IfBreak { .. } => "if-break",
            DocKind::IndentIfBreak { .. } => "indent-if-break",
            DocKind::Indent(_) => "indent",
            DocKind::Align { .. } => "align",
            DocKind::Trim => "trim",
            DocKind::LineSuffix(_) => "line-suffix",
            DocKind::LineSuffixBoundary => "line-suffix-boundary",
            DocKind::BreakParent => "break-parent",
            DocKind::Cursor => "cursor",
            DocKind::Label { .. } => "label",
        }
    }
}

/// Flavor of a line break.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// A space when flat, a newline when broken.
    Normal,
    /// Nothing when flat, a newline when broken.
    Soft,
    /// Always a newline.
    Hard,
    /// Always a newline, indented with the root indentation instead of the
    /// current one.
    Literal,
}

impl LineKind {
    /// Hard and literal lines always break.
    #[inline]
    pub fn is_hard(self) -> bool {
        matches!(self, LineKind::Hard | LineKind::Literal)
    }
}

/// A group node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub contents: Doc,
    pub id: Option<GroupId>,
    /// Explicitly broken by its builder. Breaks derived by propagation live in
    /// a side table instead.
    pub should_break: bool,
    /// Alternative renderings, least to most expanded. When present, the
    /// first entry is `contents`.
    pub expanded_states: Option<Vec<Doc>>,
}

/// Alignment operation carried by [`DocKind::Align`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Add this many columns.
    Spaces(usize),
    /// Insert this text verbatim.
    Text(String),
    /// Remove the innermost indentation part.
    Dedent,
    /// Reset to the captured root indentation.
    DedentToRoot,
    /// Capture the current indentation as the root for literal lines.
    MarkAsRoot,
}

static NEXT_GROUP_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a group, referenced by `IfBreak` and `IndentIfBreak`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct GroupId(u32);

impl GroupId {
    /// Allocate an identity no other group shares.
    pub fn fresh() -> Self {
        GroupId(NEXT_GROUP_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupId({})", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group-{}", self.0)
    }
}
