pub mod schema;

pub use schema::{Attribution, CandidateFacts, Relationship, WORKS_AT};

use annotate::{AnnotatedSentence, EntityMention, PosTag};

/// How sentence-level annotations are attributed to person mentions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributionStrategy {
    /// Reference behavior: every adjective and verb in a sentence is
    /// attributed to every person mentioned in it, and relationships are
    /// the full person x organization cross product. Known to over-attribute
    /// in multi-person sentences; evaluation numbers are calibrated
    /// against exactly this policy, so it stays the default.
    #[default]
    SentenceWide,
    /// Attributes each adjective/verb only to the person mention nearest
    /// by token distance, and pairs each organization with its nearest
    /// person only.
    NearestMention,
}

impl std::str::FromStr for AttributionStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sentence-wide" => Ok(Self::SentenceWide),
            "nearest-mention" => Ok(Self::NearestMention),
            other => anyhow::bail!("unknown attribution strategy: {other}"),
        }
    }
}

/// Turns one annotated sentence into candidate facts.
///
/// Pure: no state survives between calls, and the same sentence always
/// yields the same facts. Empty sentences are filtered by the caller
/// before extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceExtractor {
    strategy: AttributionStrategy,
}

impl SentenceExtractor {
    pub fn new(strategy: AttributionStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> AttributionStrategy {
        self.strategy
    }

    pub fn extract(&self, sentence: &AnnotatedSentence) -> CandidateFacts {
        let people: Vec<&EntityMention> = sentence.mentions_where(|l| l.is_person());
        let orgs: Vec<&EntityMention> = sentence.mentions_where(|l| l.is_organization());

        let mut facts = CandidateFacts {
            sentence: sentence.text.trim().to_string(),
            people: people.iter().map(|p| p.text.clone()).collect(),
            ..Default::default()
        };

        // Organizations are only registered when they co-occur with a
        // person; an organization alone in a sentence leaves no trace.
        if !people.is_empty() {
            facts.organizations = orgs.iter().map(|o| o.text.clone()).collect();
        }

        match self.strategy {
            AttributionStrategy::SentenceWide => {
                self.extract_sentence_wide(sentence, &people, &orgs, &mut facts)
            }
            AttributionStrategy::NearestMention => {
                self.extract_nearest_mention(sentence, &people, &orgs, &mut facts)
            }
        }

        facts
    }

    fn extract_sentence_wide(
        &self,
        sentence: &AnnotatedSentence,
        people: &[&EntityMention],
        orgs: &[&EntityMention],
        facts: &mut CandidateFacts,
    ) {
        for person in people {
            // Adjectives inside a noun chunk that contains this person's
            // mention.
            for chunk in &sentence.noun_chunks {
                let mentions_person = sentence
                    .entities
                    .iter()
                    .any(|e| e.label.is_person() && e.text == person.text && chunk.covers(e));
                if !mentions_person {
                    continue;
                }
                for idx in chunk.start..chunk.end.min(sentence.tokens.len()) {
                    let tok = &sentence.tokens[idx];
                    if tok.pos == PosTag::Adj {
                        facts.traits.push(Attribution::new(&person.text, &tok.text));
                    }
                }
            }

            // Every adjective in the sentence, regardless of which person
            // it modifies. Overlaps with the chunk rule above on purpose.
            for tok in &sentence.tokens {
                if tok.pos == PosTag::Adj {
                    facts.traits.push(Attribution::new(&person.text, &tok.text));
                }
            }

            // Every verb lemma in the sentence.
            for tok in &sentence.tokens {
                if tok.pos == PosTag::Verb {
                    facts
                        .activities
                        .push(Attribution::new(&person.text, &tok.lemma));
                }
            }

            // Full cross product with co-occurring organizations.
            for org in orgs {
                facts
                    .relationships
                    .push(Relationship::works_at(&person.text, &org.text));
            }
        }
    }

    fn extract_nearest_mention(
        &self,
        sentence: &AnnotatedSentence,
        people: &[&EntityMention],
        orgs: &[&EntityMention],
        facts: &mut CandidateFacts,
    ) {
        if people.is_empty() {
            return;
        }

        for (idx, tok) in sentence.tokens.iter().enumerate() {
            match tok.pos {
                PosTag::Adj => {
                    let person = nearest_mention(people, idx);
                    facts.traits.push(Attribution::new(&person.text, &tok.text));
                }
                PosTag::Verb => {
                    let person = nearest_mention(people, idx);
                    facts
                        .activities
                        .push(Attribution::new(&person.text, &tok.lemma));
                }
                _ => {}
            }
        }

        for org in orgs {
            let person = nearest_mention(people, org.start);
            facts
                .relationships
                .push(Relationship::works_at(&person.text, &org.text));
        }
    }
}

/// Token distance between an index and a mention span; 0 inside the span.
fn span_distance(mention: &EntityMention, idx: usize) -> usize {
    if idx < mention.start {
        mention.start - idx
    } else if idx >= mention.end {
        idx - (mention.end - 1)
    } else {
        0
    }
}

/// Nearest person mention by token distance; ties go to the earlier mention.
fn nearest_mention<'a>(people: &[&'a EntityMention], idx: usize) -> &'a EntityMention {
    people
        .iter()
        .min_by_key(|p| span_distance(p, idx))
        .copied()
        .expect("people is non-empty")
}
