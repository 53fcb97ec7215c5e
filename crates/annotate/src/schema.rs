use serde::{Deserialize, Serialize};

/// Coarse universal POS tag, as produced by the annotation service.
/// The wire form is the uppercase spaCy tag string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    #[serde(other)]
    Other,
}

/// Named-entity label. ORG and GPE are treated identically downstream
/// (both count as an organization for the works_at pipeline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Loc,
    #[serde(other)]
    Other,
}

impl EntityLabel {
    pub fn is_person(self) -> bool {
        matches!(self, EntityLabel::Person)
    }

    pub fn is_organization(self) -> bool {
        matches!(self, EntityLabel::Org | EntityLabel::Gpe)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: PosTag,
}

/// A named-entity span over token indices `[start, end)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMention {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

/// A noun-chunk span over token indices `[start, end)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NounChunk {
    pub start: usize,
    pub end: usize,
}

impl NounChunk {
    pub fn contains(&self, token_idx: usize) -> bool {
        self.start <= token_idx && token_idx < self.end
    }

    /// True when the entity span lies entirely inside this chunk.
    pub fn covers(&self, entity: &EntityMention) -> bool {
        self.start <= entity.start && entity.end <= self.end
    }
}

/// One sentence with its full set of linguistic annotations.
/// Immutable once produced by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    pub text: String,
    pub tokens: Vec<Token>,
    pub entities: Vec<EntityMention>,
    #[serde(default)]
    pub noun_chunks: Vec<NounChunk>,
}

impl AnnotatedSentence {
    /// Entity mention texts for a label, in document order.
    /// Duplicate mentions are preserved.
    pub fn mentions_where<F>(&self, pred: F) -> Vec<&EntityMention>
    where
        F: Fn(EntityLabel) -> bool,
    {
        self.entities.iter().filter(|e| pred(e.label)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
