//! Trace items from Doxygen compounds.
//!
//! [`build_items`] walks a [`CompoundSource`](crate::storage::CompoundSource)
//! and produces the item tree; [`check`] validates where requirements and
//! justifications were placed.

pub mod annotation;
pub use annotation::Annotations;

mod builder;
pub use builder::{build_items, items_from_compound_file};

mod rules;
pub use rules::{check, RuleViolation};

/// Indents `text` by four spaces per level.
pub(crate) fn indent(level: usize, text: &str) -> String {
    format!("{}{text}", "    ".repeat(level))
}
