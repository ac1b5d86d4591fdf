//! The layering engine.
//!
//! Layers are applied strictly in the order they are handed in. Profiles are
//! merged into drafts (matched by GUID, then by name/source), global keys go
//! straight into the global record. [`LayeringEngine::finish`] freezes
//! everything into a [`ResolvedSettings`] snapshot.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::global_settings::GlobalAppSettings;
use crate::identity::{is_dynamic_profile_object, parse_guid};
use crate::layer::SettingsLayer;
use crate::profile_types::{LayerOrigin, Profile, ProfileCollection, ProfileDraft};
use crate::resolved::{LoadOutcome, ResolvedSettings};
use crate::warnings::{SettingsLoadWarning, WarningSink};

/// Knobs for a single load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayeringOptions {
    /// Drop dynamic profiles whose generator contributed no layer to this
    /// load (e.g. the generator was uninstalled and only the user's
    /// overrides for its profiles are left).
    pub prune_orphaned_dynamic_profiles: bool,
}

/// Accumulates layers until [`finish`](Self::finish) is called.
#[derive(Debug, Default)]
pub struct LayeringEngine {
    options: LayeringOptions,
    globals: GlobalAppSettings,
    profiles: ProfileCollection,
    sink: WarningSink,
    /// Namespaces of every generator layer seen
    generator_namespaces: HashSet<String>,
    layer_count: usize,
}

impl LayeringEngine {
    pub fn new(options: LayeringOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Apply every layer in order and finish.
    pub fn load(layers: &[SettingsLayer], options: LayeringOptions) -> LoadOutcome {
        let mut engine = Self::new(options);
        for layer in layers {
            engine.apply(layer);
        }
        engine.finish()
    }

    /// Apply one layer. A structurally invalid layer is skipped entirely and
    /// reported; nothing merged so far is touched.
    pub fn apply(&mut self, layer: &SettingsLayer) {
        let contents = match layer.contents() {
            Ok(contents) => contents,
            Err(reason) => {
                self.sink.push(SettingsLoadWarning::InvalidLayer {
                    origin: layer.origin.to_string(),
                    reason,
                });
                return;
            }
        };

        self.layer_count += 1;
        if let Some(namespace) = layer.origin.namespace() {
            self.generator_namespaces.insert(namespace.to_string());
        }

        if let Some(legacy) = contents.legacy_globals {
            self.sink.push(SettingsLoadWarning::LegacyGlobalsProperty {
                origin: layer.origin.to_string(),
            });
            let warnings = self.globals.layer_json(legacy);
            self.sink.extend(warnings);
        }
        if let Some(globals) = contents.globals {
            let warnings = self.globals.layer_json(globals);
            self.sink.extend(warnings);
        }

        for (index, entry) in contents.profiles.into_iter().flatten().enumerate() {
            let Some(obj) = entry.as_object() else {
                self.sink.push(SettingsLoadWarning::InvalidProfileEntry {
                    origin: layer.origin.to_string(),
                    index,
                });
                continue;
            };
            self.apply_profile(&layer.origin, index, obj);
        }
    }

    fn apply_profile(&mut self, origin: &LayerOrigin, index: usize, obj: &Map<String, Value>) {
        // Generated profiles belong to their generator even if the generator
        // didn't say so.
        let stamped;
        let obj = match origin.namespace() {
            Some(namespace) if !is_dynamic_profile_object(obj) => {
                let mut with_source = obj.clone();
                with_source.insert("source".into(), Value::String(namespace.to_string()));
                stamped = with_source;
                &stamped
            }
            _ => obj,
        };

        if let Some(position) = self.profiles.find_match(obj) {
            let warnings = self
                .profiles
                .update(position, |draft| {
                    log::debug!("Layering {} profile onto '{}'", origin, draft.name());
                    draft.record_origin(origin);
                    draft.layer_json(obj)
                })
                .unwrap_or_default();
            self.sink.extend(warnings);
            return;
        }

        if !matches!(obj.get("name"), Some(Value::String(_))) {
            self.sink.push(SettingsLoadWarning::MissingProfileName {
                origin: origin.to_string(),
                index,
            });
            return;
        }

        let (mut draft, warnings) = ProfileDraft::from_json(obj);
        draft.record_origin(origin);
        log::debug!("New profile '{}' from {} layer", draft.name(), origin);
        self.sink.extend(warnings);
        self.profiles.push(draft);
    }

    /// Finalize every profile, resolve cross references and hand back the
    /// snapshot together with every warning raised during the load.
    pub fn finish(self) -> LoadOutcome {
        let Self {
            options,
            mut globals,
            mut profiles,
            mut sink,
            generator_namespaces,
            layer_count,
        } = self;

        if options.prune_orphaned_dynamic_profiles {
            let before = profiles.len();
            profiles.retain(|draft| {
                draft
                    .source_namespace()
                    .is_none_or(|namespace| generator_namespaces.contains(namespace))
            });
            if profiles.len() != before {
                log::info!(
                    "Pruned {} dynamic profile(s) with no generator",
                    before - profiles.len()
                );
            }
        }

        let mut profiles = finalize_profiles(profiles, &mut sink);
        check_color_schemes(&mut profiles, &globals, &mut sink);
        resolve_default_profile(&mut globals, &profiles, &mut sink);

        if profiles.is_empty() {
            sink.push(SettingsLoadWarning::NoProfiles);
        } else if profiles.iter().all(|profile| profile.hidden()) {
            sink.push(SettingsLoadWarning::AllProfilesHidden);
        }

        log::info!(
            "Loaded {} layer(s): {} profile(s), {} color scheme(s), {} keybinding(s), {} warning(s)",
            layer_count,
            profiles.len(),
            globals.color_schemes().len(),
            globals.keybindings().len(),
            sink.len()
        );

        LoadOutcome {
            settings: ResolvedSettings::new(globals, profiles),
            warnings: sink.into_vec(),
        }
    }
}

/// Assign GUIDs and drop any profile whose GUID was already taken.
fn finalize_profiles(profiles: ProfileCollection, sink: &mut WarningSink) -> Vec<Profile> {
    let mut seen = HashSet::new();
    let mut finalized = Vec::with_capacity(profiles.len());

    for draft in profiles.into_drafts() {
        let profile = draft.finalize();
        if seen.insert(profile.guid()) {
            finalized.push(profile);
        } else {
            sink.push(SettingsLoadWarning::DuplicateProfile {
                guid: profile.guid(),
                name: profile.name().to_string(),
            });
        }
    }
    finalized
}

/// Reset `colorScheme` references that don't name a known scheme.
fn check_color_schemes(profiles: &mut [Profile], globals: &GlobalAppSettings, sink: &mut WarningSink) {
    for profile in profiles.iter_mut() {
        let unknown = profile
            .has_color_scheme()
            .then(|| profile.color_scheme())
            .filter(|scheme| !globals.color_schemes().contains_key(scheme));

        if let Some(scheme) = unknown {
            sink.push(SettingsLoadWarning::UnknownColorScheme {
                profile: profile.name().to_string(),
                scheme,
            });
            profile.settings_mut().clear_color_scheme();
        }
    }
}

/// Turn the `defaultProfile` string into a GUID. Tries it as a GUID first,
/// then as a profile name. Falls back to the first profile.
fn resolve_default_profile(
    globals: &mut GlobalAppSettings,
    profiles: &[Profile],
    sink: &mut WarningSink,
) {
    let Some(first) = profiles.first() else {
        return;
    };

    let Some(requested) = globals.unparsed_default_profile().map(str::to_string) else {
        let current = globals.default_profile();
        if !current.is_some_and(|guid| profiles.iter().any(|p| p.guid() == guid)) {
            globals.set_default_profile(first.guid());
        }
        return;
    };

    let by_guid = parse_guid(&requested)
        .and_then(|guid| profiles.iter().find(|profile| profile.guid() == guid));
    let found = by_guid.or_else(|| profiles.iter().find(|profile| profile.name() == requested));

    match found {
        Some(profile) => {
            log::debug!("Default profile is '{}'", profile.name());
            globals.set_default_profile(profile.guid());
        }
        None => {
            sink.push(SettingsLoadWarning::MissingDefaultProfile {
                requested,
                fallback: first.name().to_string(),
            });
            globals.set_default_profile(first.guid());
        }
    }
}
