//! The finalized, read-only result of a load.

use serde_json::Value;

use crate::global_settings::GlobalAppSettings;
use crate::identity::parse_guid;
use crate::profile_types::{Profile, ProfileId};
use crate::warnings::SettingsLoadWarning;

/// Everything a load produced: the snapshot and the warnings raised while
/// building it.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub settings: ResolvedSettings,
    pub warnings: Vec<SettingsLoadWarning>,
}

/// An immutable snapshot of the merged configuration.
///
/// Only shared references are handed out, so a snapshot can be read from
/// any number of threads once built.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSettings {
    globals: GlobalAppSettings,
    profiles: Vec<Profile>,
}

impl ResolvedSettings {
    pub(crate) fn new(globals: GlobalAppSettings, profiles: Vec<Profile>) -> Self {
        Self { globals, profiles }
    }

    pub fn globals(&self) -> &GlobalAppSettings {
        &self.globals
    }

    /// Profiles in tab order.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profile_by_guid(&self, guid: ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|profile| profile.guid() == guid)
    }

    /// First profile with this exact name
    pub fn profile_by_name(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|profile| profile.name() == name)
    }

    /// Look a profile up by GUID string or, failing that, by name.
    pub fn find_profile(&self, query: &str) -> Option<&Profile> {
        parse_guid(query)
            .and_then(|guid| self.profile_by_guid(guid))
            .or_else(|| self.profile_by_name(query))
    }

    pub fn default_profile(&self) -> Option<&Profile> {
        self.globals
            .default_profile()
            .and_then(|guid| self.profile_by_guid(guid))
    }

    /// Stubs for generated profiles no user-authored layer has touched yet.
    /// Writing these into the user file gives the user an anchor to hang
    /// overrides on.
    pub fn generated_profile_stubs(&self) -> Vec<Value> {
        self.profiles
            .iter()
            .filter(|profile| profile.is_dynamic() && !profile.has_user_origin())
            .map(Profile::generate_stub)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{LayeringEngine, LayeringOptions};
    use crate::layer::SettingsLayer;
    use crate::profile_types::LayerOrigin;
    use serde_json::json;

    fn resolved() -> ResolvedSettings {
        LayeringEngine::load(
            &[
                SettingsLayer::new(
                    LayerOrigin::User,
                    json!({"profiles": [
                        {"name": "cmd"},
                        {"name": "Ubuntu", "source": "Wsl", "fontSize": 11}
                    ]}),
                ),
                SettingsLayer::new(
                    LayerOrigin::Generator("Wsl".into()),
                    json!({"profiles": [{"name": "Ubuntu"}, {"name": "Debian"}]}),
                ),
            ],
            LayeringOptions::default(),
        )
        .settings
    }

    #[test]
    fn test_lookups() {
        let settings = resolved();
        let cmd = settings.profile_by_name("cmd").unwrap();
        assert_eq!(settings.profile_by_guid(cmd.guid()), Some(cmd));
        assert_eq!(settings.find_profile(&cmd.guid().braced().to_string()), Some(cmd));
        assert_eq!(settings.find_profile("Debian").map(Profile::name), Some("Debian"));
        assert!(settings.find_profile("nope").is_none());
        assert_eq!(settings.default_profile(), Some(cmd));
    }

    #[test]
    fn test_generated_profile_stubs_skip_user_touched() {
        let settings = resolved();
        let stubs = settings.generated_profile_stubs();
        assert_eq!(stubs.len(), 1);
        assert_eq!(stubs[0]["name"], json!("Debian"));
        assert_eq!(stubs[0]["source"], json!("Wsl"));
    }
}
