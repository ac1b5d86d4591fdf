//! Ordered collection of profile drafts and cross-layer matching.
//!
//! Provides `ProfileCollection`, which keeps drafts in first-seen order (the
//! tab order) and finds the draft an incoming layer object belongs to: an
//! indexed lookup by explicit GUID first, then a scan of the drafts that
//! still have no GUID for a name/source match.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::profile::{ProfileDraft, ProfileId};
use crate::identity::parse_guid;
use crate::json;

/// Manages the drafts built up while layering
#[derive(Debug, Clone, Default)]
pub struct ProfileCollection {
    /// Drafts in first-seen order
    drafts: Vec<ProfileDraft>,

    /// Index of drafts that already carry a GUID
    by_guid: HashMap<ProfileId, usize>,
}

impl ProfileCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Get a draft by position
    pub fn get(&self, index: usize) -> Option<&ProfileDraft> {
        self.drafts.get(index)
    }

    /// Get a draft by its GUID (explicit GUIDs only)
    pub fn get_by_guid(&self, guid: &ProfileId) -> Option<&ProfileDraft> {
        self.by_guid.get(guid).and_then(|&index| self.drafts.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProfileDraft> {
        self.drafts.iter()
    }

    /// Position of the draft `obj` should be layered onto, if any.
    ///
    /// An explicit GUID hit always wins. A GUID in `obj` also matches a
    /// GUID-less draft that would synthesize that same GUID, so a stub
    /// written for a generated profile finds it again. Otherwise the first
    /// GUID-less draft (in first-seen order) whose name and source match is
    /// returned.
    pub fn find_match(&self, obj: &Map<String, Value>) -> Option<usize> {
        if let Some(guid) = json::get_str(obj, "guid").and_then(parse_guid) {
            if let Some(&index) = self.by_guid.get(&guid) {
                return Some(index);
            }
            if let Some(index) = self
                .drafts
                .iter()
                .position(|draft| draft.guid().is_none() && draft.guid_or_generate() == guid)
            {
                return Some(index);
            }
        }

        self.drafts
            .iter()
            .position(|draft| draft.guid().is_none() && draft.should_be_layered(obj))
    }

    /// Append a new draft and return its position
    pub fn push(&mut self, draft: ProfileDraft) -> usize {
        let index = self.drafts.len();
        if let Some(guid) = draft.guid() {
            self.by_guid.entry(guid).or_insert(index);
        }
        self.drafts.push(draft);
        index
    }

    /// Run `f` on a draft, keeping the GUID index in sync if the draft
    /// picked up a GUID along the way.
    pub fn update<R>(&mut self, index: usize, f: impl FnOnce(&mut ProfileDraft) -> R) -> Option<R> {
        let draft = self.drafts.get_mut(index)?;
        let had_guid = draft.guid().is_some();
        let result = f(draft);

        if !had_guid && let Some(guid) = draft.guid() {
            self.by_guid.entry(guid).or_insert(index);
        }
        Some(result)
    }

    /// Keep only drafts matching the predicate
    pub fn retain(&mut self, keep: impl FnMut(&ProfileDraft) -> bool) {
        self.drafts.retain(keep);
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.by_guid.clear();
        for (index, draft) in self.drafts.iter().enumerate() {
            if let Some(guid) = draft.guid() {
                self.by_guid.entry(guid).or_insert(index);
            }
        }
    }

    /// Consume the collection, yielding drafts in first-seen order
    pub fn into_drafts(self) -> Vec<ProfileDraft> {
        self.drafts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::generate_profile_guid;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    const GUID: &str = "{6239a42c-1111-49a3-80bd-e8fdd045185c}";

    #[test]
    fn test_empty_collection() {
        let collection = ProfileCollection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.find_match(&object(json!({"name": "cmd"}))), None);
    }

    #[test]
    fn test_guid_lookup_wins_over_name() {
        let mut collection = ProfileCollection::new();
        collection.push(ProfileDraft::new("cmd"));
        collection.push(ProfileDraft::with_guid(parse_guid(GUID).unwrap(), "PowerShell"));

        let index = collection.find_match(&object(json!({"guid": GUID, "name": "cmd"})));
        assert_eq!(index, Some(1));
    }

    #[test]
    fn test_name_match_only_for_guidless_drafts() {
        let mut collection = ProfileCollection::new();
        collection.push(ProfileDraft::with_guid(parse_guid(GUID).unwrap(), "cmd"));
        assert_eq!(collection.find_match(&object(json!({"name": "cmd"}))), None);

        collection.push(ProfileDraft::new("cmd"));
        assert_eq!(collection.find_match(&object(json!({"name": "cmd"}))), Some(1));
    }

    #[test]
    fn test_guid_matches_would_be_synthesized_guid() {
        let mut collection = ProfileCollection::new();
        collection.push(ProfileDraft::new("cmd"));

        let synthesized = generate_profile_guid("cmd", None).braced().to_string();
        let index = collection.find_match(&object(json!({"guid": synthesized, "name": "renamed"})));
        assert_eq!(index, Some(0));
    }

    #[test]
    fn test_first_seen_order_breaks_ties() {
        let mut collection = ProfileCollection::new();
        collection.push(ProfileDraft::new("cmd"));
        collection.push(ProfileDraft::new("cmd"));
        assert_eq!(collection.find_match(&object(json!({"name": "cmd"}))), Some(0));
    }

    #[test]
    fn test_update_indexes_adopted_guid() {
        let mut collection = ProfileCollection::new();
        let index = collection.push(ProfileDraft::new("cmd"));

        collection.update(index, |draft| draft.layer_json(&object(json!({"guid": GUID}))));

        let guid = parse_guid(GUID).unwrap();
        assert_eq!(collection.get_by_guid(&guid).map(|d| d.name()), Some("cmd"));
        // Once it has a GUID the draft no longer matches by name
        assert_eq!(collection.find_match(&object(json!({"name": "cmd"}))), None);
    }

    #[test]
    fn test_retain_rebuilds_index() {
        let mut collection = ProfileCollection::new();
        collection.push(ProfileDraft::new("gone").source("gen"));
        collection.push(ProfileDraft::with_guid(parse_guid(GUID).unwrap(), "kept"));

        collection.retain(|draft| !draft.is_dynamic());

        assert_eq!(collection.len(), 1);
        let guid = parse_guid(GUID).unwrap();
        assert_eq!(collection.find_match(&object(json!({"guid": GUID}))), Some(0));
        assert!(collection.get_by_guid(&guid).is_some());
    }
}
