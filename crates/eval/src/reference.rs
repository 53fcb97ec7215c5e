use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use extract::Relationship;

/// Ground-truth annotation a predicted graph is scored against.
///
/// Structurally parallel to the knowledge graph, but per-person traits and
/// activities are given directly as expected sets. Read-only for the
/// evaluation engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceGraph {
    #[serde(default)]
    pub people: BTreeSet<String>,
    #[serde(default)]
    pub organizations: BTreeSet<String>,
    #[serde(default)]
    pub traits: BTreeMap<String, BTreeSet<String>>,
    #[serde(default)]
    pub activities: BTreeMap<String, BTreeSet<String>>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl ReferenceGraph {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference graph from {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse reference graph in {}", path.display()))
    }

    /// Expected traits for a person; empty when the person is unknown to
    /// the reference (their predictions then score as false positives).
    pub fn traits_of(&self, person: &str) -> BTreeSet<String> {
        self.traits.get(person).cloned().unwrap_or_default()
    }

    pub fn activities_of(&self, person: &str) -> BTreeSet<String> {
        self.activities.get(person).cloned().unwrap_or_default()
    }

    pub fn relationships_of(&self, person: &str) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.subject == person)
            .collect()
    }
}
