//! Requirement and justification annotations.
//!
//! Doxygen renders `\xrefitem`-style aliases as `<xrefsect>` elements. Each
//! paragraph of the `<xrefdescription>` either names a requirement or gives a
//! justification.

use crate::storage::doxygen::Description;

use super::indent;

/// Marks a requirement reference inside an `xrefdescription` paragraph.
pub const REQUIREMENT_PREFIX: &str = "Requirement: ";

/// Marks a justification inside an `xrefdescription` paragraph.
pub const JUSTIFICATION_PREFIX: &str = "Justification: ";

/// Requirement references and justifications found in a description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    /// Requirement references, in document order.
    pub refs: Vec<String>,
    /// Justifications, in document order.
    pub just_up: Vec<String>,
}

/// All `xrefdescription` blocks of a detailed description.
///
/// Ordered by paragraph, then by cross-reference section within the paragraph.
pub fn xref_descriptions(description: &Description) -> impl Iterator<Item = &Description> {
    description
        .paras
        .iter()
        .flat_map(|para| para.xrefsects.iter())
        .map(|xrefsect| {
            tracing::debug!("{}", indent(3, &format!("xrefsect: {}", xrefsect.title)));
            &xrefsect.description
        })
}

/// Extracts the annotations from a detailed description.
///
/// Each `xrefdescription` paragraph is trimmed and matched against
/// [`REQUIREMENT_PREFIX`] and [`JUSTIFICATION_PREFIX`]; the text after the
/// prefix is the annotation. Paragraphs matching neither are ignored.
#[must_use]
pub fn extract(description: &Description) -> Annotations {
    let mut annotations = Annotations::default();

    for para in xref_descriptions(description).flat_map(|xref| xref.paras.iter()) {
        let value = para.text.trim();

        if let Some(requirement) = value.strip_prefix(REQUIREMENT_PREFIX) {
            tracing::info!("{}", indent(3, &format!("Requirement: {requirement}")));
            annotations.refs.push(requirement.to_string());
        } else if let Some(justification) = value.strip_prefix(JUSTIFICATION_PREFIX) {
            tracing::info!("{}", indent(3, &format!("Justification: {justification}")));
            annotations.just_up.push(justification.to_string());
        }
    }

    annotations
}
