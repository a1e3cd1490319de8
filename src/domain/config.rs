use std::{io, path::Path};

use serde::Deserialize;

/// The generator name written to the interchange file by default.
pub const DEFAULT_GENERATOR: &str = "doxygen2lobster";

/// Configuration for the conversion.
///
/// All settings are optional; an absent configuration file is equivalent to
/// [`Config::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Versions")]
pub struct Config {
    /// The value of the `generator` field in the interchange file.
    generator: String,

    /// Whether finding no trace items at all is an error.
    ///
    /// When `false` (default) an empty result only produces a warning and an
    /// interchange file with an empty `data` array is still written.
    pub fail_on_empty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generator: default_generator(),
            fail_on_empty: false,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        toml::from_str(&content).map_err(ConfigError::Parse)
    }

    /// The generator name written to the interchange file.
    #[must_use]
    pub fn generator(&self) -> &str {
        &self.generator
    }
}

/// Errors reading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file")]
    Read(#[source] io::Error),
    /// The file is not valid configuration TOML.
    #[error("Failed to parse config file")]
    Parse(#[source] toml::de::Error),
}

fn default_generator() -> String {
    DEFAULT_GENERATOR.to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_generator")]
        generator: String,

        #[serde(default)]
        fail_on_empty: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                generator,
                fail_on_empty,
            } => Self {
                generator,
                fail_on_empty,
            },
        }
    }
}
