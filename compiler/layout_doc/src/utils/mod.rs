//! Doc utilities used by translators before handing a doc to the printer.

use rustc_hash::FxHashMap;

use crate::builders::{join, literalline};
use crate::doc::{Doc, DocKey, DocKind, Group};
use crate::stack::ensure_sufficient_stack;
use crate::traverse::{traverse_doc_with, TraverseConditional, Visit};

/// Rebuild `doc` bottom-up, passing every rebuilt node through `f`.
///
/// Children are mapped before their parent. A node shared by several
/// parents is mapped once and the result is shared again.
pub fn map_doc<F>(doc: &Doc, f: F) -> Doc
where
    F: FnMut(Doc) -> Doc,
{
    let mut mapper = Mapper {
        memo: FxHashMap::default(),
        f,
    };
    mapper.map(doc)
}

struct Mapper<F> {
    memo: FxHashMap<DocKey, Doc>,
    f: F,
}

impl<F> Mapper<F>
where
    F: FnMut(Doc) -> Doc,
{
    fn map(&mut self, doc: &Doc) -> Doc {
        if let Some(done) = self.memo.get(&doc.key()) {
            return done.clone();
        }
        let mapped = ensure_sufficient_stack(|| self.rebuild(doc));
        self.memo.insert(doc.key(), mapped.clone());
        mapped
    }

    fn map_all(&mut self, docs: &[Doc]) -> Vec<Doc> {
        docs.iter().map(|doc| self.map(doc)).collect()
    }

    fn rebuild(&mut self, doc: &Doc) -> Doc {
        let rebuilt = match doc.kind() {
            DocKind::Concat(parts) => DocKind::Concat(self.map_all(parts)),
            DocKind::Fill(parts) => DocKind::Fill(self.map_all(parts)),
            DocKind::IfBreak {
                break_contents,
                flat_contents,
                group_id,
            } => DocKind::IfBreak {
                break_contents: self.map(break_contents),
                flat_contents: self.map(flat_contents),
                group_id: *group_id,
            },
            DocKind::Group(group) => {
                let (contents, expanded_states) = match &group.expanded_states {
                    Some(states) => {
                        let states = self.map_all(states);
                        let contents = match states.first() {
                            Some(first) => first.clone(),
                            None => self.map(&group.contents),
                        };
                        (contents, Some(states))
                    }
                    None => (self.map(&group.contents), None),
                };
                DocKind::Group(Group {
                    contents,
                    expanded_states,
                    ..group.clone()
                })
            }
            DocKind::Indent(contents) => DocKind::Indent(self.map(contents)),
            DocKind::Align {
                alignment,
                contents,
            } => DocKind::Align {
                alignment: alignment.clone(),
                contents: self.map(contents),
            },
            DocKind::IndentIfBreak {
                contents,
                group_id,
                negate,
            } => DocKind::IndentIfBreak {
                contents: self.map(contents),
                group_id: *group_id,
                negate: *negate,
            },
            DocKind::Label { label, contents } => DocKind::Label {
                label: label.clone(),
                contents: self.map(contents),
            },
            DocKind::LineSuffix(contents) => DocKind::LineSuffix(self.map(contents)),
            DocKind::Text(_)
            | DocKind::Line(_)
            | DocKind::Trim
            | DocKind::LineSuffixBoundary
            | DocKind::BreakParent
            | DocKind::Cursor => return (self.f)(doc.clone()),
        };
        (self.f)(Doc::new(rebuilt))
    }
}

/// First non-`None` result of `predicate` in document order.
///
/// Conditional group states other than the contents are not searched.
pub fn find_in_doc<T, P>(doc: &Doc, mut predicate: P) -> Option<T>
where
    P: FnMut(&Doc) -> Option<T>,
{
    let mut found = None;
    traverse_doc_with(
        doc,
        |node| {
            if found.is_some() {
                return Visit::Skip;
            }
            found = predicate(node);
            Visit::Descend
        },
        TraverseConditional::No,
    );
    found
}

/// Whether `doc` is certain to produce a line break: it contains an explicitly
/// broken group, a hard line or a `BreakParent`.
pub fn will_break(doc: &Doc) -> bool {
    find_in_doc(doc, |node| match node.kind() {
        DocKind::Group(group) if group.should_break => Some(()),
        DocKind::Line(kind) if kind.is_hard() => Some(()),
        DocKind::BreakParent => Some(()),
        _ => None,
    })
    .is_some()
}

/// Whether `doc` contains any line that could break.
pub fn can_break(doc: &Doc) -> bool {
    find_in_doc(doc, |node| matches!(node.kind(), DocKind::Line(_)).then_some(())).is_some()
}

/// Parts of a concat or fill.
pub fn get_doc_parts(doc: &Doc) -> Option<&[Doc]> {
    match doc.kind() {
        DocKind::Concat(parts) | DocKind::Fill(parts) => Some(parts),
        _ => None,
    }
}

/// Apply `f` to the contents of a label (keeping the label), or to `doc`
/// itself otherwise.
pub fn inherit_label(doc: &Doc, f: impl FnOnce(&Doc) -> Doc) -> Doc {
    match doc.kind() {
        DocKind::Label { label, contents } => Doc::new(DocKind::Label {
            label: label.clone(),
            contents: f(contents),
        }),
        _ => f(doc),
    }
}

/// Simplify `doc` without changing how it prints: drop empty wrappers,
/// flatten nested concats, merge adjacent texts and collapse redundant
/// nested groups.
pub fn clean_doc(doc: &Doc) -> Doc {
    map_doc(doc, clean_node)
}

fn clean_node(doc: Doc) -> Doc {
    match doc.kind() {
        DocKind::Fill(parts) if parts.iter().all(Doc::is_empty_text) => Doc::empty(),
        DocKind::Group(group) => {
            if group.contents.is_empty_text()
                && group.id.is_none()
                && !group.should_break
                && group.expanded_states.is_none()
            {
                return Doc::empty();
            }
            if let DocKind::Group(inner) = group.contents.kind() {
                if inner.id == group.id
                    && inner.should_break == group.should_break
                    && inner.expanded_states.is_none()
                    && group.expanded_states.is_none()
                {
                    return group.contents.clone();
                }
            }
            doc
        }
        DocKind::Indent(contents)
        | DocKind::Align { contents, .. }
        | DocKind::IndentIfBreak { contents, .. }
        | DocKind::LineSuffix(contents)
            if contents.is_empty_text() =>
        {
            Doc::empty()
        }
        DocKind::IfBreak {
            break_contents,
            flat_contents,
            ..
        } if break_contents.is_empty_text() && flat_contents.is_empty_text() => Doc::empty(),
        DocKind::Concat(parts) => clean_concat(parts).unwrap_or(doc),
        _ => doc,
    }
}

/// Flattened, text-merged replacement for a concat, or `None` to keep it.
fn clean_concat(parts: &[Doc]) -> Option<Doc> {
    let mut cleaned: Vec<Doc> = Vec::with_capacity(parts.len());
    for part in parts {
        if part.is_empty_text() {
            continue;
        }
        let spliced: &[Doc] = match part.kind() {
            DocKind::Concat(inner) => inner,
            _ => std::slice::from_ref(part),
        };
        let Some((first, rest)) = spliced.split_first() else {
            continue;
        };
        match (cleaned.last().and_then(Doc::as_text), first.as_text()) {
            (Some(previous), Some(current)) => {
                let merged = Doc::from(format!("{previous}{current}"));
                if let Some(last) = cleaned.last_mut() {
                    *last = merged;
                }
            }
            _ => cleaned.push(first.clone()),
        }
        cleaned.extend(rest.iter().cloned());
    }
    match cleaned.len() {
        0 => Some(Doc::empty()),
        1 => cleaned.pop(),
        _ => Some(Doc::from(cleaned)),
    }
}

/// Clean `doc`, then remove trailing hard lines and trailing newlines.
pub fn strip_trailing_hardline(doc: &Doc) -> Doc {
    strip_trailing_hardline_from_doc(&clean_doc(doc))
}

fn strip_trailing_hardline_from_doc(doc: &Doc) -> Doc {
    ensure_sufficient_stack(|| match doc.kind() {
        DocKind::Indent(contents) => Doc::new(DocKind::Indent(strip_trailing_hardline_from_doc(
            contents,
        ))),
        DocKind::Align {
            alignment,
            contents,
        } => Doc::new(DocKind::Align {
            alignment: alignment.clone(),
            contents: strip_trailing_hardline_from_doc(contents),
        }),
        DocKind::IndentIfBreak {
            contents,
            group_id,
            negate,
        } => Doc::new(DocKind::IndentIfBreak {
            contents: strip_trailing_hardline_from_doc(contents),
            group_id: *group_id,
            negate: *negate,
        }),
        DocKind::Group(group) => Doc::new(DocKind::Group(Group {
            contents: strip_trailing_hardline_from_doc(&group.contents),
            ..group.clone()
        })),
        DocKind::LineSuffix(contents) => Doc::new(DocKind::LineSuffix(
            strip_trailing_hardline_from_doc(contents),
        )),
        DocKind::Label { label, contents } => Doc::new(DocKind::Label {
            label: label.clone(),
            contents: strip_trailing_hardline_from_doc(contents),
        }),
        DocKind::IfBreak {
            break_contents,
            flat_contents,
            group_id,
        } => Doc::new(DocKind::IfBreak {
            break_contents: strip_trailing_hardline_from_doc(break_contents),
            flat_contents: strip_trailing_hardline_from_doc(flat_contents),
            group_id: *group_id,
        }),
        DocKind::Fill(parts) => Doc::new(DocKind::Fill(strip_trailing_hardline_from_parts(parts))),
        DocKind::Concat(parts) => Doc::from(strip_trailing_hardline_from_parts(parts)),
        DocKind::Text(text) => Doc::from(text.trim_end_matches(['\n', '\r'])),
        DocKind::Line(_)
        | DocKind::Trim
        | DocKind::LineSuffixBoundary
        | DocKind::BreakParent
        | DocKind::Cursor => doc.clone(),
    })
}

fn strip_trailing_hardline_from_parts(parts: &[Doc]) -> Vec<Doc> {
    let mut end = parts.len();
    while end >= 2
        && matches!(parts[end - 2].kind(), DocKind::Line(_))
        && matches!(parts[end - 1].kind(), DocKind::BreakParent)
    {
        end -= 2;
    }
    let mut stripped = parts[..end].to_vec();
    if let Some(last) = stripped.last_mut() {
        *last = strip_trailing_hardline_from_doc(last);
    }
    stripped
}

/// Replace every `\n` inside texts with a literal line.
pub fn replace_end_of_line(doc: &Doc) -> Doc {
    replace_end_of_line_with(doc, &literalline())
}

/// Replace every `\n` inside texts with `replacement`.
pub fn replace_end_of_line_with(doc: &Doc, replacement: &Doc) -> Doc {
    map_doc(doc, |node| match node.as_text() {
        Some(text) if text.contains('\n') => join(replacement, text.split('\n').map(Doc::from)),
        _ => node,
    })
}
