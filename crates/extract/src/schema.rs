use serde::{Deserialize, Serialize};

pub const WORKS_AT: &str = "works_at";

/// A `(subject, "works_at", object)` triple. Persisted as a 3-element
/// array, which is the shape the visualizer and evaluator consume.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct Relationship {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Relationship {
    pub fn works_at(subject: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            predicate: WORKS_AT.to_string(),
            object: object.into(),
        }
    }
}

impl From<(String, String, String)> for Relationship {
    fn from((subject, predicate, object): (String, String, String)) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl From<Relationship> for (String, String, String) {
    fn from(rel: Relationship) -> Self {
        (rel.subject, rel.predicate, rel.object)
    }
}

/// A trait or activity candidate attributed to one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub person: String,
    pub value: String,
}

impl Attribution {
    pub fn new(person: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            person: person.into(),
            value: value.into(),
        }
    }
}

/// Candidate facts extracted from a single sentence.
///
/// Nothing here is deduplicated; that is the aggregator's job. `people`
/// holds one entry per person mention in document order, and duplicate
/// mentions are preserved all the way through (a person mentioned twice
/// gets its source sentence recorded twice).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateFacts {
    pub sentence: String,
    pub people: Vec<String>,
    pub organizations: Vec<String>,
    pub traits: Vec<Attribution>,
    pub activities: Vec<Attribution>,
    pub relationships: Vec<Relationship>,
}
