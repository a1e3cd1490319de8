//! Builds trace items from Doxygen compounds.
//!
//! Every class, struct, interface, file, namespace and group compound becomes
//! one top-level [`LobsterItem`]. Function-like members of those compounds
//! become its children: methods for classes, structs and interfaces, free
//! functions otherwise.

use tracing::instrument;

use super::{annotation, indent};
use crate::{
    domain::{LobsterItem, LobsterKind, Location},
    storage::{
        doxygen::{CompoundDef, CompoundFile, MemberDef, XmlLocation},
        CompoundSource, LoadError,
    },
};

/// Builds the top-level trace items for every compound listed in the index.
///
/// Items appear in index order; children in section and member order.
///
/// # Errors
///
/// Returns an error if the index or any compound file cannot be loaded. No
/// items are returned in that case.
#[instrument(level = "debug", skip(source))]
pub fn build_items(source: &impl CompoundSource) -> Result<Vec<LobsterItem>, LoadError> {
    let index = source.load_index()?;
    let mut items = Vec::new();

    for compound in &index.compounds {
        tracing::debug!(
            "index entry {} '{}' -> {}.xml",
            compound.kind,
            compound.name,
            compound.refid
        );
        let file = source.load_compound(&compound.refid)?;
        items.extend(items_from_compound_file(&file));
    }

    Ok(items)
}

/// Builds the trace items for the compounds of one compound file.
///
/// Compounds of other kinds (pages, directories, ...) are skipped.
#[must_use]
pub fn items_from_compound_file(file: &CompoundFile) -> Vec<LobsterItem> {
    file.compounds
        .iter()
        .filter_map(|compound| {
            tracing::info!("compound: {}", compound.name);

            if let Some(kind) = LobsterKind::from_compound_kind(&compound.kind) {
                tracing::info!("{}", indent(1, &format!("kind: {}", compound.kind)));
                Some(item_from_compound(compound, kind))
            } else {
                tracing::info!("{}", indent(1, &format!("kind: {} (skipped)", compound.kind)));
                None
            }
        })
        .collect()
}

fn item_from_compound(compound: &CompoundDef, kind: LobsterKind) -> LobsterItem {
    let language = compound.language.clone().unwrap_or_default();

    // Groups have no location on compound level.
    let location = compound
        .location
        .as_ref()
        .map_or_else(Location::zero, location_from_xml);

    let mut item = LobsterItem::new(compound.id.clone())
        .with_kind(kind)
        .with_name(compound.name.as_str())
        .with_language(language.as_str())
        .with_location(location);

    let annotations = annotation::extract(&compound.detailed_description);
    item.extend_refs(annotations.refs);
    item.extend_just_up(annotations.just_up);

    for section in &compound.sections {
        tracing::debug!("{}", indent(2, &format!("section: {}", section.kind)));

        for member in &section.members {
            tracing::info!("{}", indent(2, &format!("member: {}", member.name)));

            if let Some(child) = item_from_member(compound, kind, &language, member) {
                tracing::info!("{}", indent(3, &format!("kind: {}", member.kind)));
                item.append_child(child);
            } else {
                tracing::info!("{}", indent(3, &format!("kind: {} (skipped)", member.kind)));
            }
        }
    }

    item
}

fn item_from_member(
    compound: &CompoundDef,
    compound_kind: LobsterKind,
    language: &str,
    member: &MemberDef,
) -> Option<LobsterItem> {
    if !member.is_function_like() {
        return None;
    }

    let (kind, name) = if compound_kind.has_methods() {
        (
            LobsterKind::Method,
            format!("{}.{}", compound.name, member.name),
        )
    } else {
        (LobsterKind::Function, member.name.clone())
    };

    let mut item = LobsterItem::new(member.id.clone())
        .with_kind(kind)
        .with_name(name)
        .with_language(language)
        .with_location(location_from_xml(&member.location));

    let annotations = annotation::extract(&member.detailed_description);
    item.extend_refs(annotations.refs);
    item.extend_just_up(annotations.just_up);

    Some(item)
}

fn location_from_xml(location: &XmlLocation) -> Location {
    Location::new(location.file.as_str(), location.line, location.column)
}
