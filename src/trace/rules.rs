use crate::domain::{LobsterItem, LobsterKind};

/// A requirement or justification placed where it is not allowed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    /// A file compound carries annotations itself.
    #[error("The File '{name}' has requirements or justifications on file level.")]
    FileLevel {
        /// Name of the file.
        name: String,
    },

    /// An annotated item has a child with requirements.
    #[error("The {kind} '{name}' has child item '{child}' with requirements.")]
    ChildRequirement {
        /// Kind of the parent.
        kind: LobsterKind,
        /// Name of the parent.
        name: String,
        /// Name of the offending child.
        child: String,
    },

    /// An annotated item has a child with justifications.
    #[error("The {kind} '{name}' has child item '{child}' with justification.")]
    ChildJustification {
        /// Kind of the parent.
        kind: LobsterKind,
        /// Name of the parent.
        name: String,
        /// Name of the offending child.
        child: String,
    },
}

/// Checks the placement of annotations on the top-level items.
///
/// Annotations are allowed either on an item or on its children, never on
/// both, and never on a file.
///
/// # Errors
///
/// Returns the first violation found, in item order.
pub fn check(items: &[LobsterItem]) -> Result<(), RuleViolation> {
    items.iter().try_for_each(check_item)
}

fn check_item(item: &LobsterItem) -> Result<(), RuleViolation> {
    if item.kind() == LobsterKind::File && item.is_annotated() {
        return Err(RuleViolation::FileLevel {
            name: item.name().to_string(),
        });
    }

    if !item.is_annotated() {
        return Ok(());
    }

    for child in item.children() {
        if child.has_refs() {
            return Err(RuleViolation::ChildRequirement {
                kind: item.kind(),
                name: item.name().to_string(),
                child: child.name().to_string(),
            });
        }
        if child.has_just_up() {
            return Err(RuleViolation::ChildJustification {
                kind: item.kind(),
                name: item.name().to_string(),
                child: child.name().to_string(),
            });
        }
    }

    Ok(())
}
