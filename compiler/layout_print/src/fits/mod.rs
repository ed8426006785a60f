//! Fits checking.
//!
//! Measures whether the rest of the current line, starting from a candidate
//! command, fits in the remaining width. Nothing is emitted: the measurement
//! keeps its own text list (for `Trim`) and reads the printer's pending
//! commands without consuming them.

use layout_doc::{Doc, DocKind, LineKind, PropagatedBreaks};

use crate::command::{Command, GroupModeMap, Mode, Node};
use crate::width::string_width;

/// Check whether `next`, followed by `rest` (innermost command last), fits
/// in `width` columns before the next line break.
///
/// The measurement ends with `true` at the first line that renders as a
/// newline and with `false` as soon as the width goes negative. When
/// `must_be_flat` is set, any group that must break fails the measurement.
/// A pending line suffix makes a `LineSuffixBoundary` fail, since it would
/// flush the suffix onto the measured line.
pub(crate) fn fits<'doc>(
    next: &Command<'doc>,
    rest: &[Command<'doc>],
    mut width: isize,
    mut has_line_suffix: bool,
    group_modes: &GroupModeMap,
    breaks: &PropagatedBreaks<'_>,
    must_be_flat: bool,
) -> bool {
    let mut rest_idx = rest.len();
    let mut cmds: Vec<(Mode, Node<'doc>)> = vec![(next.mode, next.node)];
    let mut out: Vec<&'doc str> = Vec::new();

    while width >= 0 {
        let Some((mode, node)) = cmds.pop() else {
            if rest_idx == 0 {
                return true;
            }
            rest_idx -= 1;
            let cmd = &rest[rest_idx];
            cmds.push((cmd.mode, cmd.node));
            continue;
        };

        let doc = match node {
            Node::HardLine => return true,
            Node::Concat(parts) | Node::Fill(parts) => {
                cmds.extend(parts.iter().rev().map(|part| (mode, Node::Doc(part))));
                continue;
            }
            Node::Doc(doc) => doc,
        };

        match doc.kind() {
            DocKind::Text(text) => {
                out.push(text);
                width = width.saturating_sub(columns(text));
            }
            DocKind::Concat(parts) | DocKind::Fill(parts) => {
                cmds.extend(parts.iter().rev().map(|part| (mode, Node::Doc(part))));
            }
            DocKind::Indent(contents)
            | DocKind::Align { contents, .. }
            | DocKind::IndentIfBreak { contents, .. }
            | DocKind::Label { contents, .. } => cmds.push((mode, Node::Doc(contents))),
            DocKind::Trim => width = width.saturating_add(trim(&mut out)),
            DocKind::Group(group) => {
                let broken = breaks.is_broken(doc);
                if must_be_flat && broken {
                    return false;
                }
                let group_mode = if broken { Mode::Break } else { mode };
                let contents = match (&group.expanded_states, group_mode) {
                    (Some(states), Mode::Break) => most_expanded(states, &group.contents),
                    _ => &group.contents,
                };
                cmds.push((group_mode, Node::Doc(contents)));
            }
            DocKind::IfBreak {
                break_contents,
                flat_contents,
                group_id,
            } => {
                let group_mode = group_id
                    .and_then(|id| group_modes.get(&id).copied())
                    .unwrap_or(mode);
                let contents = match group_mode {
                    Mode::Break => break_contents,
                    Mode::Flat => flat_contents,
                };
                cmds.push((mode, Node::Doc(contents)));
            }
            DocKind::Line(kind) => {
                if mode == Mode::Break || kind.is_hard() {
                    return true;
                }
                if *kind == LineKind::Normal {
                    out.push(" ");
                    width -= 1;
                }
            }
            DocKind::LineSuffix(_) => has_line_suffix = true,
            DocKind::LineSuffixBoundary => {
                if has_line_suffix {
                    return false;
                }
            }
            DocKind::BreakParent | DocKind::Cursor => {}
        }
    }
    false
}

/// The last (most expanded) state, or `contents` if there are none.
pub(crate) fn most_expanded<'doc>(states: &'doc [Doc], contents: &'doc Doc) -> &'doc Doc {
    states.last().unwrap_or(contents)
}

/// Display width as a signed column count.
#[inline]
pub(crate) fn columns(text: &str) -> isize {
    isize::try_from(string_width(text)).unwrap_or(isize::MAX)
}

/// Retract trailing spaces and tabs from measured text, returning the number
/// of columns given back.
fn trim(out: &mut Vec<&str>) -> isize {
    let mut trimmed = 0;
    while let Some(last) = out.pop() {
        let kept = last.trim_end_matches([' ', '\t']);
        trimmed += last.len() - kept.len();
        if !kept.is_empty() {
            out.push(kept);
            break;
        }
    }
    isize::try_from(trimmed).unwrap_or(isize::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
mod tests;
