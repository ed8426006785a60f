//! Builder-syntax rendering of docs.
//!
//! `Display` for [`Doc`] prints the builder calls that would reconstruct the
//! doc, e.g. `group(["foo", line, "bar"])`. Hard lines built by
//! [`hardline`](crate::builders::hardline) print as `hardline`.

use std::fmt;

use crate::doc::{Alignment, Doc, DocKind, Group, LineKind};
use crate::stack::ensure_sufficient_stack;

impl fmt::Display for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_doc(self, f)
    }
}

fn write_doc(doc: &Doc, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    ensure_sufficient_stack(|| match doc.kind() {
        DocKind::Text(text) => write!(f, "{text:?}"),
        DocKind::Concat(parts) => {
            if let Some(name) = hardline_name(parts) {
                return f.write_str(name);
            }
            write_list(parts, f)
        }
        DocKind::Line(kind) => f.write_str(match kind {
            LineKind::Normal => "line",
            LineKind::Soft => "softline",
            LineKind::Hard => "hardline_without_break_parent",
            LineKind::Literal => "literalline_without_break_parent",
        }),
        DocKind::Group(group) => write_group(group, f),
        DocKind::Fill(parts) => {
            f.write_str("fill(")?;
            write_list(parts, f)?;
            f.write_str(")")
        }
        DocKind::IfBreak {
            break_contents,
            flat_contents,
            group_id,
        } => {
            f.write_str("if_break(")?;
            write_doc(break_contents, f)?;
            if !flat_contents.is_empty_text() || group_id.is_some() {
                f.write_str(", ")?;
                write_doc(flat_contents, f)?;
            }
            if let Some(id) = group_id {
                write!(f, ", {{ group_id: {id} }}")?;
            }
            f.write_str(")")
        }
        DocKind::IndentIfBreak {
            contents,
            group_id,
            negate,
        } => {
            f.write_str("indent_if_break(")?;
            write_doc(contents, f)?;
            write!(f, ", {{ group_id: {group_id}")?;
            if *negate {
                f.write_str(", negate: true")?;
            }
            f.write_str(" })")
        }
        DocKind::Indent(contents) => write_call("indent", contents, f),
        DocKind::Align {
            alignment,
            contents,
        } => match alignment {
            Alignment::Spaces(width) => {
                write!(f, "align({width}, ")?;
                write_doc(contents, f)?;
                f.write_str(")")
            }
            Alignment::Text(prefix) => {
                write!(f, "align({prefix:?}, ")?;
                write_doc(contents, f)?;
                f.write_str(")")
            }
            Alignment::Dedent => write_call("dedent", contents, f),
            Alignment::DedentToRoot => write_call("dedent_to_root", contents, f),
            Alignment::MarkAsRoot => write_call("mark_as_root", contents, f),
        },
        DocKind::Trim => f.write_str("trim"),
        DocKind::LineSuffix(contents) => write_call("line_suffix", contents, f),
        DocKind::LineSuffixBoundary => f.write_str("line_suffix_boundary"),
        DocKind::BreakParent => f.write_str("break_parent"),
        DocKind::Cursor => f.write_str("cursor"),
        DocKind::Label { label, contents } => {
            write!(f, "label({label:?}, ")?;
            write_doc(contents, f)?;
            f.write_str(")")
        }
    })
}

fn hardline_name(parts: &[Doc]) -> Option<&'static str> {
    match parts {
        [line, parent] if matches!(parent.kind(), DocKind::BreakParent) => match line.kind() {
            DocKind::Line(LineKind::Hard) => Some("hardline"),
            DocKind::Line(LineKind::Literal) => Some("literalline"),
            _ => None,
        },
        _ => None,
    }
}

fn write_call(name: &str, contents: &Doc, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{name}(")?;
    write_doc(contents, f)?;
    f.write_str(")")
}

fn write_list(parts: &[Doc], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_doc(part, f)?;
    }
    f.write_str("]")
}

fn write_group(group: &Group, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &group.expanded_states {
        Some(states) => {
            f.write_str("conditional_group(")?;
            write_list(states, f)?;
        }
        None => {
            f.write_str("group(")?;
            write_doc(&group.contents, f)?;
        }
    }
    if group.should_break || group.id.is_some() {
        f.write_str(", { ")?;
        if group.should_break {
            f.write_str("should_break: true")?;
        }
        if let Some(id) = group.id {
            if group.should_break {
                f.write_str(", ")?;
            }
            write!(f, "id: {id}")?;
        }
        f.write_str(" }")?;
    }
    f.write_str(")")
}
