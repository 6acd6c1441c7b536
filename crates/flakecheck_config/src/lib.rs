//! Parsing and validation of `flakecheck.toml` configuration files.
//!
//! This crate reads the optional configuration file and produces a strongly-typed
//! [`CheckConfig`] holding the default source encoding, discovery exclusions,
//! the Python interpreter used to run pyflakes, and output preferences.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
