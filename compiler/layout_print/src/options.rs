//! Print options.

use serde::Deserialize;

/// Default maximum line width.
pub const DEFAULT_PRINT_WIDTH: usize = 80;

/// Default columns per indentation level.
pub const DEFAULT_TAB_WIDTH: usize = 2;

/// Options controlling layout.
///
/// Deserializes from the conventional camelCase configuration keys
/// (`printWidth`, `tabWidth`, `useTabs`, `endOfLine`); missing keys take
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrintOptions {
    /// Maximum columns before a group breaks.
    pub print_width: usize,

    /// Columns per indentation level (and per tab when measuring).
    pub tab_width: usize,

    /// Indent with tabs instead of spaces.
    pub use_tabs: bool,

    /// Newline emitted for every line break and for `\n` inside texts.
    pub end_of_line: EndOfLine,

    /// Check doc invariants before layout. On by default in debug builds.
    #[serde(skip)]
    pub validate_docs: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            print_width: DEFAULT_PRINT_WIDTH,
            tab_width: DEFAULT_TAB_WIDTH,
            use_tabs: false,
            end_of_line: EndOfLine::Lf,
            validate_docs: cfg!(debug_assertions),
        }
    }
}

impl PrintOptions {
    /// Default options with the given print width.
    pub fn with_print_width(print_width: usize) -> Self {
        Self {
            print_width,
            ..Default::default()
        }
    }

    /// Default options with the given tab width.
    pub fn with_tab_width(tab_width: usize) -> Self {
        Self {
            tab_width,
            ..Default::default()
        }
    }
}

/// Line ending convention.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    Crlf,
    /// `\r`
    Cr,
}

impl EndOfLine {
    /// The newline sequence.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            EndOfLine::Lf => "\n",
            EndOfLine::Crlf => "\r\n",
            EndOfLine::Cr => "\r",
        }
    }
}
