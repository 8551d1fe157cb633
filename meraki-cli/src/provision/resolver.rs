//! Name-to-identifier resolution for group membership
//!
//! Group rows list their members by name; the API wants network object ids.
//! A [`NameIndex`] is built once from the organization's inventory and every
//! group resolves its members against it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::RemoteNetworkObject;

/// What to do when several inventory objects share a name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The last matching object in inventory order wins
    #[default]
    LastWins,
    /// Ambiguous names are reported as unresolved
    Reject,
}

/// Result of a single name lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult {
    /// Successfully resolved to an id
    Found(String),
    /// No match found
    NotFound,
    /// Multiple objects have this name, in inventory order
    Duplicate(Vec<String>),
}

/// Outcome of resolving one group's member list.
///
/// `ids.len() + unresolved.len()` always equals the number of names given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub ids: Vec<String>,
    pub unresolved: Vec<String>,
}

/// Lookup table: exact object name -> ids in inventory order
#[derive(Debug, Default)]
pub struct NameIndex {
    entries: HashMap<String, Vec<String>>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, id)` pairs, keeping their order
    pub fn build<'a>(objects: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut index = Self::new();
        for (name, id) in objects {
            index.insert(name, id);
        }
        index
    }

    pub fn from_remote(objects: &[RemoteNetworkObject]) -> Self {
        Self::build(objects.iter().map(|o| (o.name.as_str(), o.id.as_str())))
    }

    pub fn insert(&mut self, name: &str, id: &str) {
        self.entries
            .entry(name.to_string())
            .or_default()
            .push(id.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a single name, case-sensitive, no normalization
    pub fn lookup(&self, name: &str) -> ResolveResult {
        match self.entries.get(name).map(Vec::as_slice) {
            None | Some([]) => ResolveResult::NotFound,
            Some([id]) => ResolveResult::Found(id.clone()),
            Some(ids) => ResolveResult::Duplicate(ids.to_vec()),
        }
    }
}

/// Split a comma-separated cell into trimmed names.
///
/// Empty input yields a single empty name, which then fails to resolve and
/// shows up in the group's unresolved list.
pub fn str_list_to_list(s: &str) -> Vec<String> {
    s.split(',').map(|name| name.trim().to_string()).collect()
}

/// Resolve a raw comma-separated member cell
pub fn resolve(raw_names: &str, index: &NameIndex, policy: DuplicatePolicy) -> Resolution {
    resolve_names(&str_list_to_list(raw_names), index, policy)
}

/// Resolve already-split member names, preserving their order
pub fn resolve_names(names: &[String], index: &NameIndex, policy: DuplicatePolicy) -> Resolution {
    let mut resolution = Resolution::default();

    for name in names {
        let name = name.trim();
        match index.lookup(name) {
            ResolveResult::Found(id) => resolution.ids.push(id),
            ResolveResult::NotFound => {
                log::debug!("Network object '{}' not found", name);
                resolution.unresolved.push(name.to_string());
            }
            ResolveResult::Duplicate(ids) => match policy {
                DuplicatePolicy::LastWins => {
                    log::warn!(
                        "Network object name '{}' matches {} objects ({}), using the last one",
                        name,
                        ids.len(),
                        ids.join(", ")
                    );
                    // Non-empty by construction of Duplicate
                    if let Some(last) = ids.last() {
                        resolution.ids.push(last.clone());
                    }
                }
                DuplicatePolicy::Reject => {
                    log::warn!(
                        "Network object name '{}' matches {} objects ({}), leaving it unresolved",
                        name,
                        ids.len(),
                        ids.join(", ")
                    );
                    resolution.unresolved.push(name.to_string());
                }
            },
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> NameIndex {
        NameIndex::build([("web", "1"), ("db", "2"), ("cache", "3")])
    }

    #[test]
    fn test_str_list_to_list_trims_and_splits() {
        assert_eq!(str_list_to_list("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(str_list_to_list("single"), vec!["single"]);
    }

    #[test]
    fn test_str_list_to_list_empty_input_yields_one_empty_name() {
        assert_eq!(str_list_to_list(""), vec![""]);
    }

    #[test]
    fn test_resolve_accounts_for_every_name() {
        let inputs = ["web", "web, db", "web, missing, db", "", "x, y, z", "web,,db"];
        for raw in inputs {
            let resolution = resolve(raw, &index(), DuplicatePolicy::LastWins);
            assert_eq!(
                resolution.ids.len() + resolution.unresolved.len(),
                str_list_to_list(raw).len(),
                "input: {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_resolve_found_and_missing() {
        let resolution = resolve("db, nope , web", &index(), DuplicatePolicy::LastWins);
        assert_eq!(resolution.ids, vec!["2", "1"]);
        assert_eq!(resolution.unresolved, vec!["nope"]);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let resolution = resolve("Web", &index(), DuplicatePolicy::LastWins);
        assert!(resolution.ids.is_empty());
        assert_eq!(resolution.unresolved, vec!["Web"]);
    }

    #[test]
    fn test_duplicate_names_last_match_wins() {
        let index = NameIndex::build([("A", "1"), ("A", "2")]);
        let resolution = resolve("A", &index, DuplicatePolicy::LastWins);
        assert_eq!(resolution.ids, vec!["2"]);
        assert!(resolution.unresolved.is_empty());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let index = NameIndex::build([("A", "1"), ("A", "2"), ("B", "3")]);
        let resolution = resolve("A, B", &index, DuplicatePolicy::Reject);
        assert_eq!(resolution.ids, vec!["3"]);
        assert_eq!(resolution.unresolved, vec!["A"]);
    }

    #[test]
    fn test_lookup_reports_duplicates_in_order() {
        let index = NameIndex::build([("A", "1"), ("B", "9"), ("A", "2")]);
        assert_eq!(
            index.lookup("A"),
            ResolveResult::Duplicate(vec!["1".to_string(), "2".to_string()])
        );
        assert_eq!(index.lookup("C"), ResolveResult::NotFound);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_duplicate_policy_config_names() {
        #[derive(Deserialize)]
        struct Holder {
            policy: DuplicatePolicy,
        }
        let holder: Holder = toml::from_str("policy = \"reject\"").unwrap();
        assert_eq!(holder.policy, DuplicatePolicy::Reject);
        let holder: Holder = toml::from_str("policy = \"last-wins\"").unwrap();
        assert_eq!(holder.policy, DuplicatePolicy::LastWins);
    }
}
