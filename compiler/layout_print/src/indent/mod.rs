//! Indentation tracking.
//!
//! An [`Indentation`] is derived functionally from its parent plus one
//! operation, so every command on the printer's stack can hold its own
//! immutable, shared indentation. The rendered prefix is rebuilt from the
//! queue of parts on each derivation:
//!
//! - an indent part renders as one tab (with `use_tabs`) or `tab_width` spaces
//! - a width alignment renders as that many spaces; consecutive width
//!   alignments become tabs when followed by an indent and tabs are on
//! - a text alignment renders verbatim
//!
//! Trailing width alignments always render as spaces.

use std::rc::Rc;

use layout_doc::Alignment;
use smallvec::SmallVec;

use crate::options::PrintOptions;
use crate::width::string_width;

/// One queued indentation operation.
#[derive(Clone, Debug, PartialEq, Eq)]
enum IndentPart {
    Indent,
    Width(usize),
    Text(String),
}

/// Rendered indentation for new lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Indentation {
    value: String,
    length: usize,
    queue: SmallVec<[IndentPart; 4]>,
    root: Option<Rc<Indentation>>,
}

impl Indentation {
    /// Zero indentation with no captured root.
    pub fn root() -> Rc<Self> {
        Rc::new(Indentation::default())
    }

    /// The prefix emitted after a newline.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Column the prefix ends at.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// The indentation literal lines return to, if one was captured.
    #[inline]
    pub fn captured_root(&self) -> Option<&Rc<Indentation>> {
        self.root.as_ref()
    }

    /// One more indentation level.
    #[must_use = "indent returns a new Indentation"]
    pub fn indent(&self, options: &PrintOptions) -> Rc<Self> {
        let mut queue = self.queue.clone();
        queue.push(IndentPart::Indent);
        Rc::new(self.with_queue(queue, options))
    }

    /// Apply an alignment operation.
    #[must_use = "align returns a new Indentation"]
    pub fn align(self: &Rc<Self>, alignment: &Alignment, options: &PrintOptions) -> Rc<Self> {
        match alignment {
            Alignment::Spaces(0) => Rc::clone(self),
            Alignment::Text(prefix) if prefix.is_empty() => Rc::clone(self),
            Alignment::Spaces(width) => {
                let mut queue = self.queue.clone();
                queue.push(IndentPart::Width(*width));
                Rc::new(self.with_queue(queue, options))
            }
            Alignment::Text(prefix) => {
                let mut queue = self.queue.clone();
                queue.push(IndentPart::Text(prefix.clone()));
                Rc::new(self.with_queue(queue, options))
            }
            Alignment::Dedent => {
                let mut queue = self.queue.clone();
                queue.pop();
                Rc::new(self.with_queue(queue, options))
            }
            Alignment::DedentToRoot => self.root.clone().unwrap_or_else(Indentation::root),
            Alignment::MarkAsRoot => Rc::new(Indentation {
                root: Some(Rc::clone(self)),
                ..Indentation::clone(self)
            }),
        }
    }

    /// Render `queue`, keeping this indentation's root.
    fn with_queue(&self, queue: SmallVec<[IndentPart; 4]>, options: &PrintOptions) -> Self {
        let mut render = Render {
            options,
            value: String::new(),
            length: 0,
            pending_tabs: 0,
            pending_spaces: 0,
        };
        for part in &queue {
            match part {
                IndentPart::Indent => {
                    render.flush();
                    if options.use_tabs {
                        render.add_tabs(1);
                    } else {
                        render.add_spaces(options.tab_width);
                    }
                }
                IndentPart::Text(prefix) => {
                    render.flush();
                    render.value.push_str(prefix);
                    render.length += string_width(prefix);
                }
                IndentPart::Width(width) => {
                    render.pending_tabs += 1;
                    render.pending_spaces += width;
                }
            }
        }
        render.flush_spaces();

        Indentation {
            value: render.value,
            length: render.length,
            queue,
            root: self.root.clone(),
        }
    }
}

/// Accumulator for rendering an indentation queue.
struct Render<'a> {
    options: &'a PrintOptions,
    value: String,
    length: usize,
    /// Width alignments seen since the last flush, one tab each.
    pending_tabs: usize,
    /// Total columns of those alignments.
    pending_spaces: usize,
}

impl Render<'_> {
    fn add_tabs(&mut self, count: usize) {
        self.value.push_str(&"\t".repeat(count));
        self.length += self.options.tab_width * count;
    }

    fn add_spaces(&mut self, count: usize) {
        self.value.push_str(&" ".repeat(count));
        self.length += count;
    }

    fn flush(&mut self) {
        if self.options.use_tabs {
            self.flush_tabs();
        } else {
            self.flush_spaces();
        }
    }

    fn flush_tabs(&mut self) {
        if self.pending_tabs > 0 {
            self.add_tabs(self.pending_tabs);
        }
        self.reset_pending();
    }

    fn flush_spaces(&mut self) {
        if self.pending_spaces > 0 {
            self.add_spaces(self.pending_spaces);
        }
        self.reset_pending();
    }

    fn reset_pending(&mut self) {
        self.pending_tabs = 0;
        self.pending_spaces = 0;
    }
}
