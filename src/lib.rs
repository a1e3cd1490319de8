//! Doxygen XML to LOBSTER conversion
//!
//! Reads the XML output of Doxygen, collects the requirement references and
//! justifications attached to code constructs with `\xrefitem`-style aliases,
//! and writes them as a LOBSTER `lobster-imp-trace` interchange file.

pub mod domain;
pub use domain::{Config, LobsterItem, LobsterKind, Location};

/// Reading Doxygen XML and writing interchange files.
pub mod storage;
pub use storage::{CompoundSource, LoadError, XmlDirectory};

pub mod trace;
pub use trace::RuleViolation;

pub mod convert;
pub use convert::{convert, ConvertError, Summary};

#[cfg(test)]
mod testing;
