//! Domain models for the conversion.
//!
//! This module contains the trace item model, its kind taxonomy and the
//! conversion configuration.

/// Trace item model.
pub mod item;
pub use item::{LobsterItem, Location};

mod kind;
pub use kind::LobsterKind;

mod config;
pub use config::{Config, ConfigError, DEFAULT_GENERATOR};
