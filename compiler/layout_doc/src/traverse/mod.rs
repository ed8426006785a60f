//! Generic doc traversal.
//!
//! Iterative walk with an explicit stack so arbitrarily deep docs cannot
//! overflow the call stack. Visitors get an `enter` call before a node's
//! children and, if they ask for it, an `exit` call after them.

use crate::doc::{Doc, DocKind};

/// What to do after entering a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Walk the node's children.
    Descend,
    /// Do not walk the node's children. `exit` is still called.
    Skip,
}

/// Whether groups with expanded states are walked through every state or
/// only through their contents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraverseConditional {
    Yes,
    No,
}

/// Callbacks for [`traverse_doc`].
pub trait DocVisitor<'doc> {
    fn enter(&mut self, doc: &'doc Doc) -> Visit;

    fn exit(&mut self, _doc: &'doc Doc) {}

    /// Whether `exit` should be called at all. Visitors that only need
    /// `enter` save the extra stack entries.
    fn wants_exit(&self) -> bool {
        true
    }
}

enum Step<'doc> {
    Enter(&'doc Doc),
    Exit(&'doc Doc),
}

/// Walk `doc` in document order.
pub fn traverse_doc<'doc, V>(doc: &'doc Doc, visitor: &mut V, conditional: TraverseConditional)
where
    V: DocVisitor<'doc> + ?Sized,
{
    let wants_exit = visitor.wants_exit();
    let mut stack = vec![Step::Enter(doc)];

    while let Some(step) = stack.pop() {
        let doc = match step {
            Step::Exit(doc) => {
                visitor.exit(doc);
                continue;
            }
            Step::Enter(doc) => doc,
        };

        if wants_exit {
            stack.push(Step::Exit(doc));
        }
        if visitor.enter(doc) == Visit::Skip {
            continue;
        }

        match doc.kind() {
            DocKind::Concat(parts) | DocKind::Fill(parts) => {
                stack.extend(parts.iter().rev().map(Step::Enter));
            }
            DocKind::IfBreak {
                break_contents,
                flat_contents,
                ..
            } => {
                stack.push(Step::Enter(flat_contents));
                stack.push(Step::Enter(break_contents));
            }
            DocKind::Group(group) => match (&group.expanded_states, conditional) {
                (Some(states), TraverseConditional::Yes) => {
                    stack.extend(states.iter().rev().map(Step::Enter));
                }
                _ => stack.push(Step::Enter(&group.contents)),
            },
            DocKind::Indent(contents)
            | DocKind::Align { contents, .. }
            | DocKind::IndentIfBreak { contents, .. }
            | DocKind::Label { contents, .. }
            | DocKind::LineSuffix(contents) => stack.push(Step::Enter(contents)),
            DocKind::Text(_)
            | DocKind::Line(_)
            | DocKind::Trim
            | DocKind::LineSuffixBoundary
            | DocKind::BreakParent
            | DocKind::Cursor => {}
        }
    }
}

struct EnterFn<F>(F);

impl<'doc, F> DocVisitor<'doc> for EnterFn<F>
where
    F: FnMut(&'doc Doc) -> Visit,
{
    fn enter(&mut self, doc: &'doc Doc) -> Visit {
        (self.0)(doc)
    }

    fn wants_exit(&self) -> bool {
        false
    }
}

/// Walk `doc` calling `on_enter` for every node, without exit callbacks.
pub fn traverse_doc_with<'doc, F>(doc: &'doc Doc, on_enter: F, conditional: TraverseConditional)
where
    F: FnMut(&'doc Doc) -> Visit,
{
    traverse_doc(doc, &mut EnterFn(on_enter), conditional);
}
