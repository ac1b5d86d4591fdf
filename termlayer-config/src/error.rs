//! Typed error variants for the termlayer-config crate.
//!
//! Only decoding a settings document can fail hard. Everything that goes
//! wrong *inside* a well-formed document is reported as a
//! [`SettingsLoadWarning`](crate::SettingsLoadWarning) instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading a settings layer.
///
/// # Example
///
/// ```rust,no_run
/// use termlayer_config::{ConfigError, LayerOrigin, SettingsLayer};
///
/// match SettingsLayer::load(LayerOrigin::User, "settings.json") {
///     Ok(layer) => println!("loaded {} layer", layer.origin),
///     Err(ConfigError::Io { path, .. }) => eprintln!("cannot read {}", path.display()),
///     Err(ConfigError::Parse { origin, source }) => eprintln!("{origin}: {source}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("JSON parse error in {origin} settings: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}
