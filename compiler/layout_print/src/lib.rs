//! Layout Printer
//!
//! Renders a [`Doc`](layout_doc::Doc) into a string no wider than the
//! configured print width where possible.
//!
//! # Architecture
//!
//! [`print_doc_to_string`] runs in three steps:
//!
//! 1. **Validation** (when [`PrintOptions::validate_docs`] is set)
//! 2. **Propagation**: groups containing forced breaks are marked broken
//! 3. **Layout**: a work-stack loop picks flat or broken per group, measuring
//!    the rest of the line before committing
//!
//! # Modules
//!
//! - [`options`]: Print options
//! - [`width`]: Display width of text
//! - [`indent`]: Indentation tracking

mod command;
mod error;
mod fits;
pub mod indent;
pub mod options;
mod output;
mod printer;
pub mod width;

use std::sync::Once;

use layout_doc::{propagate_breaks, validate_doc, Doc};
use tracing::debug;

pub use error::PrintError;
pub use options::{EndOfLine, PrintOptions};
pub use output::{CursorNode, PrintedDoc};
pub use width::string_width;

use printer::Printer;

static TRACING_INIT: Once = Once::new();

/// Install a `RUST_LOG`-filtered subscriber for layout diagnostics.
///
/// `RUST_LOG=layout_print=trace` logs every group and fill decision. Does
/// nothing without `RUST_LOG`, and only the first call has any effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        // Another subscriber may already be installed by the host.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(EnvFilter::from_default_env())
            .try_init();
    });
}

/// Render `doc` with `options`.
///
/// # Example
///
/// ```
/// use layout_doc::builders::{group, line, text};
/// use layout_print::{print_doc_to_string, PrintOptions};
///
/// let doc = group(vec![text("foo"), line(), text("bar")]);
///
/// let wide = print_doc_to_string(&doc, &PrintOptions::with_print_width(10)).unwrap();
/// assert_eq!(wide.as_str(), "foo bar");
///
/// let narrow = print_doc_to_string(&doc, &PrintOptions::with_print_width(5)).unwrap();
/// assert_eq!(narrow.as_str(), "foo\nbar");
/// ```
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(print_width = options.print_width, tab_width = options.tab_width)
)]
pub fn print_doc_to_string(doc: &Doc, options: &PrintOptions) -> Result<PrintedDoc, PrintError> {
    if options.validate_docs {
        validate_doc(doc)?;
    }
    let breaks = propagate_breaks(doc);
    let printed = Printer::new(options, &breaks).print(doc)?;
    debug!(
        bytes = printed.formatted.len(),
        cursor = printed.cursor.is_some(),
        "printed doc"
    );
    Ok(printed)
}
