//! Entity-centric knowledge graph built by folding per-sentence candidate
//! facts into a single accumulator.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use extract::{CandidateFacts, Relationship};

/// Everything known about one person. Created lazily on first mention,
/// never deleted. Traits and activities are sets; the sentence list keeps
/// one entry per mention, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub traits: BTreeSet<String>,
    pub activities: BTreeSet<String>,
    pub sentences: Vec<String>,
}

/// The aggregate root. Person and organization identity is the exact
/// surface form; no normalization and no coreference.
///
/// The serialized shape (`people`, `organizations`, `person_data`,
/// `relationships`) is a compatibility surface shared with the evaluator
/// and the external visualizer. Do not rename fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    pub people: BTreeSet<String>,
    pub organizations: BTreeSet<String>,
    pub person_data: BTreeMap<String, PersonRecord>,
    pub relationships: Vec<Relationship>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one sentence's candidate facts into the accumulator.
    ///
    /// Trait and activity candidates merge by set union, so repeats across
    /// sentences collapse. Source sentences and relationships append
    /// verbatim: the relationship list grows by |person mentions| x
    /// |organization mentions| for every folded sentence, duplicates and
    /// all. That multiplicative growth is intended, not a bug.
    pub fn fold(mut self, facts: &CandidateFacts) -> Self {
        for org in &facts.organizations {
            self.organizations.insert(org.clone());
        }

        for person in &facts.people {
            self.people.insert(person.clone());
            self.person_data
                .entry(person.clone())
                .or_default()
                .sentences
                .push(facts.sentence.clone());
        }

        for attribution in &facts.traits {
            self.record_for(&attribution.person)
                .traits
                .insert(attribution.value.clone());
        }

        for attribution in &facts.activities {
            self.record_for(&attribution.person)
                .activities
                .insert(attribution.value.clone());
        }

        for relationship in &facts.relationships {
            self.people.insert(relationship.subject.clone());
            self.organizations.insert(relationship.object.clone());
            self.relationships.push(relationship.clone());
        }

        self
    }

    /// Builds a graph from all sentences' facts, in document order.
    pub fn from_facts<'a, I>(facts: I) -> Self
    where
        I: IntoIterator<Item = &'a CandidateFacts>,
    {
        facts.into_iter().fold(Self::new(), |graph, f| graph.fold(f))
    }

    fn record_for(&mut self, person: &str) -> &mut PersonRecord {
        self.people.insert(person.to_string());
        self.person_data.entry(person.to_string()).or_default()
    }

    /// Relationships whose subject is the given person, in fold order.
    pub fn relationships_of(&self, person: &str) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.subject == person)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.person_data.is_empty()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write graph to {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            people = self.people.len(),
            organizations = self.organizations.len(),
            relationships = self.relationships.len(),
            "knowledge graph saved"
        );
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read graph from {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse graph in {}", path.display()))
    }
}
