//! Doc builders.
//!
//! Free functions that assemble doc nodes. Anything convertible into a
//! [`Doc`] (a `&str`, a `String`, a `Vec<Doc>`) is accepted where contents
//! are expected.
//!
//! ```
//! use layout_doc::builders::{group, indent, line, softline, text};
//!
//! let call = group(vec![
//!     text("foo("),
//!     indent(vec![softline(), text("a,"), line(), text("b")]),
//!     softline(),
//!     text(")"),
//! ]);
//! assert_eq!(call.type_name(), "group");
//! ```

use crate::doc::{Alignment, Doc, DocKind, Group, GroupId, LineKind};
use crate::error::InvalidDoc;

/// Options accepted by [`group_with`] and [`conditional_group`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupOptions {
    pub should_break: bool,
    pub id: Option<GroupId>,
}

impl GroupOptions {
    /// Options for a group that always breaks.
    pub fn broken() -> Self {
        GroupOptions {
            should_break: true,
            id: None,
        }
    }

    /// Options for a group referenced by `id`.
    pub fn with_id(id: GroupId) -> Self {
        GroupOptions {
            should_break: false,
            id: Some(id),
        }
    }
}

pub fn text(content: impl Into<String>) -> Doc {
    Doc::new(DocKind::Text(content.into()))
}

pub fn concat(parts: Vec<Doc>) -> Doc {
    Doc::new(DocKind::Concat(parts))
}

pub fn indent(contents: impl Into<Doc>) -> Doc {
    Doc::new(DocKind::Indent(contents.into()))
}

pub fn align(alignment: Alignment, contents: impl Into<Doc>) -> Doc {
    Doc::new(DocKind::Align {
        alignment,
        contents: contents.into(),
    })
}

/// Align by `width` columns.
pub fn align_spaces(width: usize, contents: impl Into<Doc>) -> Doc {
    align(Alignment::Spaces(width), contents)
}

/// Align by inserting `prefix` verbatim.
pub fn align_text(prefix: impl Into<String>, contents: impl Into<Doc>) -> Doc {
    align(Alignment::Text(prefix.into()), contents)
}

pub fn dedent(contents: impl Into<Doc>) -> Doc {
    align(Alignment::Dedent, contents)
}

pub fn dedent_to_root(contents: impl Into<Doc>) -> Doc {
    align(Alignment::DedentToRoot, contents)
}

pub fn mark_as_root(contents: impl Into<Doc>) -> Doc {
    align(Alignment::MarkAsRoot, contents)
}

pub fn group(contents: impl Into<Doc>) -> Doc {
    group_with(contents, GroupOptions::default())
}

pub fn group_with(contents: impl Into<Doc>, options: GroupOptions) -> Doc {
    Doc::new(DocKind::Group(Group {
        contents: contents.into(),
        id: options.id,
        should_break: options.should_break,
        expanded_states: None,
    }))
}

/// A group that tries each of `states` in flat mode, falling back to the last
/// one in break mode.
///
/// The first state doubles as the group's contents.
pub fn conditional_group(states: Vec<Doc>, options: GroupOptions) -> Result<Doc, InvalidDoc> {
    let Some(first) = states.first() else {
        return Err(InvalidDoc::EmptyExpandedStates);
    };
    Ok(Doc::new(DocKind::Group(Group {
        contents: first.clone(),
        id: options.id,
        should_break: options.should_break,
        expanded_states: Some(states),
    })))
}

pub fn fill(parts: Vec<Doc>) -> Doc {
    Doc::new(DocKind::Fill(parts))
}

pub fn if_break(break_contents: impl Into<Doc>, flat_contents: impl Into<Doc>) -> Doc {
    Doc::new(DocKind::IfBreak {
        break_contents: break_contents.into(),
        flat_contents: flat_contents.into(),
        group_id: None,
    })
}

/// Like [`if_break`], resolved by the mode of the group identified by `group_id`.
pub fn if_break_with(
    break_contents: impl Into<Doc>,
    flat_contents: impl Into<Doc>,
    group_id: GroupId,
) -> Doc {
    Doc::new(DocKind::IfBreak {
        break_contents: break_contents.into(),
        flat_contents: flat_contents.into(),
        group_id: Some(group_id),
    })
}

pub fn indent_if_break(contents: impl Into<Doc>, group_id: GroupId, negate: bool) -> Doc {
    Doc::new(DocKind::IndentIfBreak {
        contents: contents.into(),
        group_id,
        negate,
    })
}

pub fn line_suffix(contents: impl Into<Doc>) -> Doc {
    Doc::new(DocKind::LineSuffix(contents.into()))
}

pub fn line_suffix_boundary() -> Doc {
    Doc::new(DocKind::LineSuffixBoundary)
}

pub fn break_parent() -> Doc {
    Doc::new(DocKind::BreakParent)
}

pub fn trim() -> Doc {
    Doc::new(DocKind::Trim)
}

pub fn cursor() -> Doc {
    Doc::new(DocKind::Cursor)
}

/// A space in flat mode, a newline in break mode.
pub fn line() -> Doc {
    Doc::new(DocKind::Line(LineKind::Normal))
}

/// Nothing in flat mode, a newline in break mode.
pub fn softline() -> Doc {
    Doc::new(DocKind::Line(LineKind::Soft))
}

pub fn hardline_without_break_parent() -> Doc {
    Doc::new(DocKind::Line(LineKind::Hard))
}

pub fn literalline_without_break_parent() -> Doc {
    Doc::new(DocKind::Line(LineKind::Literal))
}

/// An unconditional newline that also breaks every enclosing group.
pub fn hardline() -> Doc {
    concat(vec![hardline_without_break_parent(), break_parent()])
}

/// An unconditional newline at the root indentation.
pub fn literalline() -> Doc {
    concat(vec![literalline_without_break_parent(), break_parent()])
}

/// Wrap `contents` in a label. An empty label returns `contents` unchanged.
pub fn label(name: impl Into<String>, contents: impl Into<Doc>) -> Doc {
    let name = name.into();
    let contents = contents.into();
    if name.is_empty() {
        return contents;
    }
    Doc::new(DocKind::Label {
        label: name,
        contents,
    })
}

/// Interleave `separator` between `docs`.
pub fn join(separator: &Doc, docs: impl IntoIterator<Item = Doc>) -> Doc {
    let mut parts = Vec::new();
    for (i, doc) in docs.into_iter().enumerate() {
        if i > 0 {
            parts.push(separator.clone());
        }
        parts.push(doc);
    }
    concat(parts)
}

/// Shift `doc` right by `size` columns, expressed as whole indentation levels
/// plus a remainder alignment, rooted so nested literal lines follow it.
pub fn add_alignment_to_doc(doc: Doc, size: usize, tab_width: usize) -> Doc {
    if size == 0 || tab_width == 0 {
        return doc;
    }
    let mut aligned = doc;
    for _ in 0..size / tab_width {
        aligned = indent(aligned);
    }
    aligned = align_spaces(size % tab_width, aligned);
    dedent_to_root(aligned)
}
