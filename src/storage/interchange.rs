//! LOBSTER common interchange format output.
//!
//! Writes trace items as a `lobster-imp-trace` (version 3) document.
//! Unannotated container items (classes, structs, interfaces, namespaces)
//! are replaced by their children; file items are not written at all.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::domain::{LobsterItem, LobsterKind};

/// The `schema` field of the interchange file.
pub const SCHEMA: &str = "lobster-imp-trace";

/// The `version` field of the interchange file.
pub const VERSION: u32 = 3;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Serialize)]
struct Document<'a> {
    data: Vec<Record<'a>>,
    generator: &'a str,
    schema: &'static str,
    version: u32,
}

#[derive(Debug, Serialize)]
struct Record<'a> {
    tag: String,
    location: RecordLocation<'a>,
    name: &'a str,
    messages: Vec<String>,
    just_up: &'a [String],
    just_down: Vec<String>,
    just_global: Vec<String>,
    refs: Vec<String>,
    language: &'a str,
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct RecordLocation<'a> {
    kind: &'static str,
    file: &'a str,
    line: Option<u32>,
    column: Option<u32>,
}

impl<'a> From<&'a LobsterItem> for Record<'a> {
    fn from(item: &'a LobsterItem) -> Self {
        let location = item.location();
        Self {
            tag: item.tag(),
            location: RecordLocation {
                kind: "file",
                file: &location.file,
                line: location.line,
                column: location.column,
            },
            name: item.name(),
            messages: Vec::new(),
            just_up: item.just_up(),
            just_down: Vec::new(),
            just_global: Vec::new(),
            refs: item.refs().iter().map(|r| format!("req {r}")).collect(),
            language: item.language(),
            kind: item.kind().as_str(),
        }
    }
}

/// Selects the items that become records, in output order.
///
/// - an unannotated container with children is replaced by its children
/// - a file is dropped, children included
/// - anything else is emitted as is, without its children
#[must_use]
pub fn select_records(items: &[LobsterItem]) -> Vec<&LobsterItem> {
    let mut records = Vec::with_capacity(items.len());

    for item in items {
        if item.kind().is_container() && item.has_children() && !item.is_annotated() {
            records.extend(item.children());
        } else if item.kind() == LobsterKind::File {
            tracing::debug!("Not writing file item '{}'", item.name());
        } else {
            records.push(item);
        }
    }

    records
}

/// Serializes the items as an interchange document.
///
/// The output is 4-space indented JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write<W: Write>(writer: &mut W, items: &[LobsterItem], generator: &str) -> io::Result<()> {
    let document = Document {
        data: select_records(items).into_iter().map(Record::from).collect(),
        generator,
        schema: SCHEMA,
        version: VERSION,
    };

    let mut serializer =
        serde_json::Serializer::with_formatter(&mut *writer, PrettyFormatter::with_indent(INDENT));
    document.serialize(&mut serializer)?;
    writer.write_all(b"\n")
}

/// Writes the interchange document to a file.
///
/// Parent directories are created automatically if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn save(path: &Path, items: &[LobsterItem], generator: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer, items, generator)?;
    writer.flush()
}
