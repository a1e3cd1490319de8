//! Access to a Doxygen XML output directory.
//!
//! The [`XmlDirectory`] reads `index.xml` and the per-compound files next to
//! it. The trace builder only depends on the [`CompoundSource`] trait, so it
//! can be fed from memory as well.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

mod xml;
pub use xml::{
    CompoundDef, CompoundFile, CompoundRef, Description, DoxygenIndex, MemberDef, Para,
    SectionDef, XmlLocation, XrefSect,
};

/// File name of the Doxygen index.
pub const INDEX_FILE: &str = "index.xml";

/// A source of parsed Doxygen documents.
pub trait CompoundSource {
    /// Loads the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be read or parsed.
    fn load_index(&self) -> Result<DoxygenIndex, LoadError>;

    /// Loads the compound file for an index entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the compound file cannot be read or parsed.
    fn load_compound(&self, refid: &str) -> Result<CompoundFile, LoadError>;
}

/// A Doxygen XML output directory on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDirectory {
    root: PathBuf,
}

impl XmlDirectory {
    /// Opens a directory at the given path.
    ///
    /// Nothing is read until the index or a compound is loaded.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The directory path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path of the index file.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    /// Whether the directory contains an index file.
    #[must_use]
    pub fn has_index(&self) -> bool {
        self.index_path().is_file()
    }

    fn compound_path(&self, refid: &str) -> PathBuf {
        self.root.join(format!("{refid}.xml"))
    }
}

impl CompoundSource for XmlDirectory {
    fn load_index(&self) -> Result<DoxygenIndex, LoadError> {
        let path = self.index_path();
        tracing::debug!("Loading index from {}", path.display());
        DoxygenIndex::parse(&read(&path)?, &path)
    }

    fn load_compound(&self, refid: &str) -> Result<CompoundFile, LoadError> {
        let path = self.compound_path(refid);
        tracing::debug!("Loading compound from {}", path.display());
        CompoundFile::parse(&read(&path)?, &path)
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Errors that can occur when loading Doxygen XML.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// The file is not well-formed XML.
    #[error("failed to parse {}", .path.display())]
    Xml {
        /// The file being parsed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: roxmltree::Error,
    },
    /// The document is XML, but not the expected Doxygen document.
    #[error("unexpected root element <{found}> in {}, expected <{expected}>", .path.display())]
    UnexpectedRoot {
        /// The file being parsed.
        path: PathBuf,
        /// The expected root element.
        expected: &'static str,
        /// The actual root element.
        found: String,
    },
    /// A required attribute is missing or empty.
    #[error("<{element}> in {} has no '{attribute}' attribute", .path.display())]
    MissingAttribute {
        /// The file being parsed.
        path: PathBuf,
        /// The element lacking the attribute.
        element: String,
        /// The missing attribute.
        attribute: &'static str,
    },
    /// A required child element is missing.
    #[error("<{element}> in {} has no <{child}> element", .path.display())]
    MissingElement {
        /// The file being parsed.
        path: PathBuf,
        /// The element lacking the child.
        element: String,
        /// The missing child element.
        child: &'static str,
    },
    /// A line or column attribute is not a number.
    #[error("invalid {attribute} '{value}' in {}", .path.display())]
    InvalidNumber {
        /// The file being parsed.
        path: PathBuf,
        /// The offending attribute.
        attribute: &'static str,
        /// The attribute value.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn has_index_requires_index_file() {
        let tmp = TempDir::new().unwrap();
        let directory = XmlDirectory::new(tmp.path().to_path_buf());
        assert!(!directory.has_index());

        fs::write(tmp.path().join(INDEX_FILE), "<doxygenindex/>").unwrap();
        assert!(directory.has_index());
    }

    #[test]
    fn loads_compound_by_refid() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("class_foo.xml"),
            r#"<doxygen><compounddef id="class_foo" kind="class"><compoundname>Foo</compoundname></compounddef></doxygen>"#,
        )
        .unwrap();

        let directory = XmlDirectory::new(tmp.path().to_path_buf());
        let file = directory.load_compound("class_foo").unwrap();
        assert_eq!(file.compounds[0].name, "Foo");
    }

    #[test]
    fn missing_compound_file_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let directory = XmlDirectory::new(tmp.path().to_path_buf());

        let error = directory.load_compound("missing").unwrap_err();
        match error {
            LoadError::Io { path, source } => {
                assert_eq!(path, tmp.path().join("missing.xml"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
