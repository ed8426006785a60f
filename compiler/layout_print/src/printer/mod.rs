//! Layout engine.
//!
//! Renders a doc by popping commands off a work stack, deciding flat or
//! broken per group with [`fits`], and appending fragments to an
//! [`Output`]. Break propagation must already have run; its table is
//! consulted wherever a group's broken flag matters.

use std::borrow::Cow;
use std::rc::Rc;

use layout_doc::{Doc, DocKind, Group, GroupId, LineKind, PropagatedBreaks};
use tracing::trace;

use crate::command::{Command, GroupModeMap, Mode, Node};
use crate::error::PrintError;
use crate::fits::{columns, fits, most_expanded};
use crate::indent::Indentation;
use crate::options::{EndOfLine, PrintOptions};
use crate::output::{Output, PrintedDoc};

/// Per-render layout state.
pub(crate) struct Printer<'a, 'doc> {
    options: &'a PrintOptions,
    breaks: &'a PropagatedBreaks<'doc>,
    /// Maximum line width, or `None` when unbounded.
    width: Option<isize>,
    out: Output<'doc>,
    /// Column of the next emitted character.
    pos: isize,
    cmds: Vec<Command<'doc>>,
    /// Deferred line suffixes, in insertion order.
    line_suffixes: Vec<Command<'doc>>,
    /// Set after a hard line inside a flat region: the next group must be
    /// measured again instead of inheriting flat mode.
    should_remeasure: bool,
    group_modes: GroupModeMap,
}

impl<'a, 'doc> Printer<'a, 'doc> {
    pub fn new(options: &'a PrintOptions, breaks: &'a PropagatedBreaks<'doc>) -> Self {
        let width = if options.print_width == usize::MAX {
            None
        } else {
            Some(isize::try_from(options.print_width).unwrap_or(isize::MAX))
        };
        Printer {
            options,
            breaks,
            width,
            out: Output::new(),
            pos: 0,
            cmds: Vec::new(),
            line_suffixes: Vec::new(),
            should_remeasure: false,
            group_modes: GroupModeMap::default(),
        }
    }

    /// Render `doc` starting at zero indentation in break mode.
    pub fn print(mut self, doc: &'doc Doc) -> Result<PrintedDoc, PrintError> {
        self.cmds
            .push(Command::doc(Indentation::root(), Mode::Break, doc));

        while let Some(cmd) = self.cmds.pop() {
            self.step(cmd)?;

            if self.cmds.is_empty() && !self.line_suffixes.is_empty() {
                self.cmds.extend(self.line_suffixes.drain(..).rev());
            }
        }

        Ok(self.out.finish())
    }

    fn step(&mut self, cmd: Command<'doc>) -> Result<(), PrintError> {
        let Command { indent, mode, node } = cmd;
        let doc = match node {
            Node::Doc(doc) => doc,
            Node::Concat(parts) => {
                self.push_parts(&indent, mode, parts);
                return Ok(());
            }
            Node::Fill(parts) => {
                self.print_fill(&indent, mode, parts);
                return Ok(());
            }
            Node::HardLine => {
                self.print_line(indent, mode, node, LineKind::Hard);
                return Ok(());
            }
        };

        match doc.kind() {
            DocKind::Text(text) => self.print_text(text),
            DocKind::Concat(parts) => self.push_parts(&indent, mode, parts),
            DocKind::Cursor => self.out.push_cursor()?,
            DocKind::Indent(contents) => {
                let indent = indent.indent(self.options);
                self.cmds.push(Command::doc(indent, mode, contents));
            }
            DocKind::Align {
                alignment,
                contents,
            } => {
                let indent = indent.align(alignment, self.options);
                self.cmds.push(Command::doc(indent, mode, contents));
            }
            DocKind::Trim => {
                self.pos -= to_columns(self.out.trim());
            }
            DocKind::Group(group) => {
                let broken = self.breaks.is_broken(doc);
                let chosen = if mode == Mode::Flat && !self.should_remeasure {
                    let chosen = if broken { Mode::Break } else { Mode::Flat };
                    self.cmds
                        .push(Command::doc(indent, chosen, &group.contents));
                    chosen
                } else {
                    self.print_group(indent, group, broken)
                };
                if let Some(id) = group.id {
                    trace!(group = %id, mode = ?chosen, "group mode");
                    self.group_modes.insert(id, chosen);
                }
            }
            DocKind::Fill(parts) => self.print_fill(&indent, mode, parts),
            DocKind::IfBreak {
                break_contents,
                flat_contents,
                group_id,
            } => {
                let contents = match self.resolve_mode(*group_id, mode) {
                    Mode::Break => break_contents,
                    Mode::Flat => flat_contents,
                };
                self.cmds.push(Command::doc(indent, mode, contents));
            }
            DocKind::IndentIfBreak {
                contents,
                group_id,
                negate,
            } => {
                let group_mode = self.resolve_mode(Some(*group_id), mode);
                let indented = (group_mode == Mode::Break) != *negate;
                let indent = if indented {
                    indent.indent(self.options)
                } else {
                    indent
                };
                self.cmds.push(Command::doc(indent, mode, contents));
            }
            DocKind::LineSuffix(contents) => {
                self.line_suffixes
                    .push(Command::doc(indent, mode, contents));
            }
            DocKind::LineSuffixBoundary => {
                if !self.line_suffixes.is_empty() {
                    self.cmds.push(Command::new(indent, mode, Node::HardLine));
                }
            }
            DocKind::Line(kind) => self.print_line(indent, mode, node, *kind),
            DocKind::Label { contents, .. } => {
                self.cmds.push(Command::doc(indent, mode, contents));
            }
            DocKind::BreakParent => {}
        }
        Ok(())
    }

    fn push_parts(&mut self, indent: &Rc<Indentation>, mode: Mode, parts: &'doc [Doc]) {
        self.cmds.extend(
            parts
                .iter()
                .rev()
                .map(|part| Command::doc(Rc::clone(indent), mode, part)),
        );
    }

    fn print_text(&mut self, text: &'doc str) {
        let text: Cow<'doc, str> = match self.options.end_of_line {
            EndOfLine::Lf => Cow::Borrowed(text),
            eol if text.contains('\n') => Cow::Owned(text.replace('\n', eol.as_str())),
            _ => Cow::Borrowed(text),
        };
        self.pos += columns(&text);
        self.out.push(text);
    }

    /// Mode of the group `id` refers to, or the inherited mode when there is
    /// no id or that group has not been printed yet.
    fn resolve_mode(&self, id: Option<GroupId>, inherited: Mode) -> Mode {
        id.and_then(|id| self.group_modes.get(&id).copied())
            .unwrap_or(inherited)
    }

    /// Columns left on the current line, or `None` when unbounded.
    fn remaining(&self) -> Option<isize> {
        self.width.map(|width| width - self.pos)
    }

    /// Measure `cmd` against the current line.
    fn fits(&self, cmd: &Command<'doc>, rest: &[Command<'doc>], must_be_flat: bool) -> bool {
        let Some(remaining) = self.remaining() else {
            return true;
        };
        fits(
            cmd,
            rest,
            remaining,
            !self.line_suffixes.is_empty(),
            &self.group_modes,
            self.breaks,
            must_be_flat,
        )
    }

    /// Choose a mode for a group that cannot simply inherit flat mode, push
    /// the chosen contents and return the mode.
    fn print_group(&mut self, indent: Rc<Indentation>, group: &'doc Group, broken: bool) -> Mode {
        self.should_remeasure = false;

        let flat = Command::doc(Rc::clone(&indent), Mode::Flat, &group.contents);
        if !broken && self.fits(&flat, &self.cmds, false) {
            trace!(pos = self.pos, "group fits flat");
            self.cmds.push(flat);
            return Mode::Flat;
        }

        let Some(states) = &group.expanded_states else {
            self.cmds
                .push(Command::doc(indent, Mode::Break, &group.contents));
            return Mode::Break;
        };

        let expanded = most_expanded(states, &group.contents);
        if !broken {
            for state in states.iter().skip(1) {
                let cmd = Command::doc(Rc::clone(&indent), Mode::Flat, state);
                if self.fits(&cmd, &self.cmds, false) {
                    trace!(pos = self.pos, "conditional group state fits flat");
                    self.cmds.push(cmd);
                    return Mode::Flat;
                }
            }
        }
        self.cmds.push(Command::doc(indent, Mode::Break, expanded));
        Mode::Break
    }

    /// Lay out `[content, separator, content, ...]`, deciding each separator
    /// from whether the contents around it fit on the current line.
    fn print_fill(&mut self, indent: &Rc<Indentation>, mode: Mode, parts: &'doc [Doc]) {
        let Some(content) = parts.first() else {
            return;
        };
        let cmd = |mode, doc| Command::doc(Rc::clone(indent), mode, doc);

        let content_flat = cmd(Mode::Flat, content);
        let content_fits = self.fits(&content_flat, &[], true);
        let content_cmd = if content_fits {
            content_flat
        } else {
            cmd(Mode::Break, content)
        };

        let Some(separator) = parts.get(1) else {
            self.cmds.push(content_cmd);
            return;
        };

        if parts.len() == 2 {
            let separator_mode = if content_fits { Mode::Flat } else { Mode::Break };
            self.cmds.push(cmd(separator_mode, separator));
            self.cmds.push(content_cmd);
            return;
        }

        let pair = Command::new(Rc::clone(indent), Mode::Flat, Node::Concat(&parts[..3]));
        let pair_fits = self.fits(&pair, &[], true);
        trace!(content_fits, pair_fits, remaining = parts.len() - 2, "fill separator");

        let separator_mode = if pair_fits { Mode::Flat } else { Mode::Break };
        self.cmds
            .push(Command::new(Rc::clone(indent), mode, Node::Fill(&parts[2..])));
        self.cmds.push(cmd(separator_mode, separator));
        self.cmds.push(content_cmd);
    }

    fn print_line(&mut self, indent: Rc<Indentation>, mode: Mode, node: Node<'doc>, kind: LineKind) {
        if mode == Mode::Flat {
            match kind {
                LineKind::Soft => return,
                LineKind::Normal => {
                    self.out.push(" ");
                    self.pos += 1;
                    return;
                }
                LineKind::Hard | LineKind::Literal => self.should_remeasure = true,
            }
        }

        if !self.line_suffixes.is_empty() {
            self.cmds.push(Command::new(indent, mode, node));
            self.cmds.extend(self.line_suffixes.drain(..).rev());
            return;
        }

        let newline = self.options.end_of_line.as_str();
        if kind == LineKind::Literal {
            self.out.push(newline);
            match indent.captured_root() {
                Some(root) => {
                    self.out.push(root.value().to_owned());
                    self.pos = to_columns(root.length());
                }
                None => self.pos = 0,
            }
        } else {
            self.out.trim();
            self.out.push(newline);
            self.out.push(indent.value().to_owned());
            self.pos = to_columns(indent.length());
        }
    }
}

#[inline]
fn to_columns(count: usize) -> isize {
    isize::try_from(count).unwrap_or(isize::MAX)
}
