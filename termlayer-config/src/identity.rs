//! Stable profile identifiers.
//!
//! Profiles that never receive an explicit `guid` get one derived from their
//! name and source, so the same profile maps to the same identifier on every
//! machine and every run.

use serde_json::{Map, Value};
use uuid::{Uuid, uuid};

/// Namespace for synthesized profile GUIDs.
///
/// Changing this changes every synthesized GUID, which orphans user
/// customizations that target profiles by GUID.
pub const PROFILE_GUID_NAMESPACE: Uuid = uuid!("f65ddb7e-706b-4499-8a50-40313caf510a");

/// Derive the GUID for a profile with the given name and source.
///
/// Profiles without a source are hashed directly under
/// [`PROFILE_GUID_NAMESPACE`]. Profiles from a generator are hashed under a
/// namespace derived from the source string, so the same name from two
/// generators never collides.
pub fn generate_profile_guid(name: &str, source: Option<&str>) -> Uuid {
    let namespace = match source {
        Some(source) => Uuid::new_v5(&PROFILE_GUID_NAMESPACE, source.as_bytes()),
        None => PROFILE_GUID_NAMESPACE,
    };
    Uuid::new_v5(&namespace, name.as_bytes())
}

/// Parse a GUID string. Accepts the braced `{...}` form used in settings
/// files as well as the plain hyphenated form.
pub fn parse_guid(text: &str) -> Option<Uuid> {
    Uuid::parse_str(text.trim()).ok()
}

/// Normalize a `source` value: empty strings count as "no source".
pub(crate) fn normalize_source(source: Option<&str>) -> Option<&str> {
    source.filter(|s| !s.is_empty())
}

/// Whether a profile object came from a dynamic profile generator.
pub fn is_dynamic_profile_object(obj: &Map<String, Value>) -> bool {
    obj.get("source").is_some_and(|source| !source.is_null())
}

/// The GUID a profile object would end up with: its explicit `guid` when it
/// has a valid one, otherwise the one synthesized from `name` and `source`.
pub fn guid_or_generate_for_json(obj: &Map<String, Value>) -> Uuid {
    if let Some(guid) = obj.get("guid").and_then(Value::as_str).and_then(parse_guid) {
        return guid;
    }

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(crate::defaults::profile_name);
    let source = normalize_source(obj.get("source").and_then(Value::as_str));
    generate_profile_guid(&name, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_profile_guid("cmd", None);
        let b = generate_profile_guid("cmd", None);
        assert_eq!(a, b);
        assert_eq!(a.get_version_num(), 5);
    }

    #[test]
    fn test_source_namespaces_identifiers() {
        let plain = generate_profile_guid("Ubuntu", None);
        let wsl = generate_profile_guid("Ubuntu", Some("Windows.Terminal.Wsl"));
        let other = generate_profile_guid("Ubuntu", Some("Some.Other.Generator"));
        assert_ne!(plain, wsl);
        assert_ne!(wsl, other);
        assert_ne!(plain, other);
    }

    #[test]
    fn test_distinct_names_differ() {
        assert_ne!(
            generate_profile_guid("cmd", None),
            generate_profile_guid("Cmd", None)
        );
    }

    #[test]
    fn test_no_source_uses_base_namespace() {
        let expected = Uuid::new_v5(&PROFILE_GUID_NAMESPACE, "cmd".as_bytes());
        assert_eq!(generate_profile_guid("cmd", None), expected);
    }

    #[test]
    fn test_parse_guid_forms() {
        let plain = parse_guid("6239a42c-1111-49a3-80bd-e8fdd045185c").unwrap();
        let braced = parse_guid("{6239a42c-1111-49a3-80bd-e8fdd045185c}").unwrap();
        assert_eq!(plain, braced);
        assert!(parse_guid("not-a-guid").is_none());
    }

    #[test]
    fn test_is_dynamic_profile_object() {
        assert!(is_dynamic_profile_object(&object(
            json!({"name": "x", "source": "gen"})
        )));
        assert!(!is_dynamic_profile_object(&object(
            json!({"name": "x", "source": null})
        )));
        assert!(!is_dynamic_profile_object(&object(json!({"name": "x"}))));
    }

    #[test]
    fn test_guid_or_generate_for_json() {
        let explicit = object(json!({
            "name": "cmd",
            "guid": "{6239a42c-1111-49a3-80bd-e8fdd045185c}"
        }));
        assert_eq!(
            guid_or_generate_for_json(&explicit).to_string(),
            "6239a42c-1111-49a3-80bd-e8fdd045185c"
        );

        let synthesized = object(json!({"name": "cmd", "source": ""}));
        assert_eq!(
            guid_or_generate_for_json(&synthesized),
            generate_profile_guid("cmd", None)
        );
    }
}
