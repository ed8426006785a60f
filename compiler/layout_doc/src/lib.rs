//! Layout Doc IR
//!
//! The intermediate representation a translator builds for formatted output,
//! prior to line-width-aware layout.
//!
//! # Architecture
//!
//! A doc is an immutable tree of [`Doc`] handles. Translators assemble it with
//! the [`builders`]; the printer (in `layout_print`) consumes it:
//!
//! 1. **Propagation**: [`propagate_breaks`] marks every group that contains a
//!    forced break, recording the result in a side table
//! 2. **Layout**: the printer walks the doc, choosing flat or broken per group
//!
//! # Modules
//!
//! - [`doc`]: Node model
//! - [`builders`]: Constructors
//! - [`traverse`]: Explicit-stack enter/exit walk
//! - [`propagate`]: Break propagation
//! - [`utils`]: Mapping, cleaning and inspection helpers
//! - [`validate`]: Structural checks
//! - [`json`]: JSON interchange

pub mod builders;
mod debug;
pub mod doc;
mod error;
pub mod json;
pub mod propagate;
mod stack;
pub mod traverse;
pub mod utils;
pub mod validate;

pub use doc::{Alignment, Doc, DocKey, DocKind, Group, GroupId, LineKind};
pub use error::InvalidDoc;
pub use propagate::{propagate_breaks, PropagatedBreaks};
pub use stack::ensure_sufficient_stack;
pub use traverse::{traverse_doc, traverse_doc_with, DocVisitor, TraverseConditional, Visit};
pub use utils::{
    can_break, clean_doc, find_in_doc, get_doc_parts, inherit_label, map_doc,
    replace_end_of_line, replace_end_of_line_with, strip_trailing_hardline, will_break,
};
pub use validate::validate_doc;
