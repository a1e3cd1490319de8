//! The conversion pipeline.
//!
//! Doxygen XML directory → trace items → placement rules → interchange file.
//! The output file is only written once every earlier stage succeeded.

use std::{
    io,
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::{
    domain::Config,
    storage::{interchange, LoadError, XmlDirectory},
    trace::{self, RuleViolation},
};

/// What a successful conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Number of top-level trace items found.
    pub items: usize,
    /// Number of records written to the interchange file.
    pub records: usize,
    /// The interchange file written.
    pub output: PathBuf,
}

/// Errors that abort a conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The input directory has no `index.xml`.
    #[error("No doxygen index.xml file in doxygen_xml_folder {}.", .0.display())]
    MissingIndex(PathBuf),

    /// The index or a compound file could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// No trace items were found and the configuration treats that as fatal.
    #[error("No lobster items found in the doxygen XML output.")]
    NoItems,

    /// Requirements or justifications are placed where they are not allowed.
    #[error(transparent)]
    Rule(#[from] RuleViolation),

    /// The interchange file could not be written.
    #[error("failed to write {}", .path.display())]
    Write {
        /// The output file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    /// The process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingIndex(_) => 3,
            Self::Load(_) => 4,
            Self::NoItems | Self::Rule(_) | Self::Write { .. } => 1,
        }
    }
}

/// Converts the Doxygen XML output in `xml_dir` into an interchange file at
/// `output`.
///
/// # Errors
///
/// Returns an error if `xml_dir` has no index, any Doxygen file fails to
/// load, an annotation is misplaced, or the output cannot be written. The
/// output file is left untouched in all of these cases except the last.
#[instrument(skip(config))]
pub fn convert(xml_dir: &Path, output: &Path, config: &Config) -> Result<Summary, ConvertError> {
    let directory = XmlDirectory::new(xml_dir.to_path_buf());
    if !directory.has_index() {
        return Err(ConvertError::MissingIndex(xml_dir.to_path_buf()));
    }

    let items = trace::build_items(&directory)?;

    if items.is_empty() {
        if config.fail_on_empty {
            return Err(ConvertError::NoItems);
        }
        tracing::warn!("No lobster items found in the doxygen XML output.");
    }

    trace::check(&items)?;

    interchange::save(output, &items, config.generator()).map_err(|source| {
        ConvertError::Write {
            path: output.to_path_buf(),
            source,
        }
    })?;

    let records = interchange::select_records(&items).len();
    tracing::debug!(
        "Wrote {records} records from {} items to {}",
        items.len(),
        output.display()
    );

    Ok(Summary {
        items: items.len(),
        records,
        output: output.to_path_buf(),
    })
}
