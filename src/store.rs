//! Snapshot store for resolved settings.
//!
//! Readers grab the current [`ResolvedSettings`] lock-free through an
//! [`ArcSwap`]. A reload re-reads every source file, runs a full layering
//! pass and swaps in the new snapshot in one step; if any file can't be read
//! or decoded the previous snapshot stays in place.

use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use termlayer_config::{
    ConfigError, LayerOrigin, LayeringEngine, LayeringOptions, ResolvedSettings, SettingsLayer,
    SettingsLoadWarning,
};

/// Where the layers of one load come from, in precedence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSources {
    /// Defaults file; `None` uses the compiled-in defaults document
    pub defaults: Option<PathBuf>,
    /// The user's settings file
    pub user: Option<PathBuf>,
    /// Generator namespace and the file holding its generated profiles
    pub generators: Vec<(String, PathBuf)>,
}

impl SettingsSources {
    /// Builtin defaults plus the given user file.
    pub fn with_user(path: impl Into<PathBuf>) -> Self {
        Self {
            user: Some(path.into()),
            ..Self::default()
        }
    }

    /// Read and decode every layer: defaults, user, then generators.
    pub fn read_layers(&self) -> Result<Vec<SettingsLayer>, ConfigError> {
        let mut layers = Vec::with_capacity(2 + self.generators.len());

        layers.push(match &self.defaults {
            Some(path) => SettingsLayer::load(LayerOrigin::Defaults, path)?,
            None => SettingsLayer::builtin_defaults()?,
        });
        if let Some(path) = &self.user {
            layers.push(SettingsLayer::load(LayerOrigin::User, path)?);
        }
        for (namespace, path) in &self.generators {
            layers.push(SettingsLayer::load(
                LayerOrigin::Generator(namespace.clone()),
                path,
            )?);
        }
        Ok(layers)
    }
}

/// Default location of the user settings file:
/// `<config dir>/termlayer/settings.json`.
pub fn default_user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("termlayer").join("settings.json"))
}

/// Holds the current snapshot and the warnings it was built with.
pub struct SettingsStore {
    sources: SettingsSources,
    options: LayeringOptions,
    current: ArcSwap<ResolvedSettings>,
    warnings: Mutex<Vec<SettingsLoadWarning>>,
}

impl SettingsStore {
    /// Load from `sources`. Fails only if a file can't be read or decoded.
    pub fn load(sources: SettingsSources, options: LayeringOptions) -> Result<Self, ConfigError> {
        let layers = sources.read_layers()?;
        let outcome = LayeringEngine::load(&layers, options);

        Ok(Self {
            sources,
            options,
            current: ArcSwap::from_pointee(outcome.settings),
            warnings: Mutex::new(outcome.warnings),
        })
    }

    /// The current snapshot. Stays valid even if a reload happens while it
    /// is being read.
    pub fn snapshot(&self) -> Arc<ResolvedSettings> {
        self.current.load_full()
    }

    /// Warnings produced by the load that built the current snapshot.
    pub fn warnings(&self) -> Vec<SettingsLoadWarning> {
        self.warnings.lock().clone()
    }

    pub fn sources(&self) -> &SettingsSources {
        &self.sources
    }

    /// Rebuild the snapshot from scratch and swap it in. On error the
    /// previous snapshot and its warnings are kept.
    pub fn reload(&self) -> Result<Arc<ResolvedSettings>, ConfigError> {
        let layers = match self.sources.read_layers() {
            Ok(layers) => layers,
            Err(e) => {
                log::error!("Settings reload failed, keeping previous settings: {}", e);
                return Err(e);
            }
        };

        let outcome = LayeringEngine::load(&layers, self.options);
        let snapshot = Arc::new(outcome.settings);
        let mut warnings = self.warnings.lock();
        self.current.store(Arc::clone(&snapshot));
        *warnings = outcome.warnings;
        log::info!("Settings reloaded ({} warning(s))", warnings.len());
        Ok(snapshot)
    }
}
