use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use graph::KnowledgeGraph;

use crate::reference::ReferenceGraph;
use crate::score::{score, Scores};

#[derive(Error, Debug, PartialEq)]
pub enum EvalError {
    /// The predicted graph holds no people, so per-person averages have a
    /// zero denominator. Reported as "nothing to evaluate" instead of an
    /// arithmetic fault.
    #[error("nothing to evaluate: the predicted graph contains no people")]
    EmptyGraph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Traits,
    Activities,
    Relationship,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Traits, Category::Activities, Category::Relationship];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Traits => write!(f, "Traits"),
            Category::Activities => write!(f, "Activities"),
            Category::Relationship => write!(f, "Works_at"),
        }
    }
}

/// One scored row: one person, one fact category.
#[derive(Debug, Clone, Serialize)]
pub struct MetricRecord {
    pub entity: String,
    pub category: Category,
    #[serde(flatten)]
    pub scores: Scores,
}

/// Per-entity rows plus one averaged row per category.
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub rows: Vec<MetricRecord>,
    pub averages: Vec<(Category, Scores)>,
}

/// Scores a predicted graph against a reference annotation.
///
/// Every person present in the predicted graph gets three rows; people
/// who exist only in the reference are not scored (they are recall
/// misses nobody predicted, and there is no row to hang them on). A
/// predicted person missing from the reference scores against empty
/// expected sets, so their precision collapses to zero.
pub fn evaluate(
    predicted: &KnowledgeGraph,
    reference: &ReferenceGraph,
) -> Result<EvalReport, EvalError> {
    if predicted.is_empty() {
        return Err(EvalError::EmptyGraph);
    }

    let mut rows = Vec::new();
    let mut sums = [Scores::ZERO; 3];
    let num_people = predicted.person_data.len() as f64;

    for (person, record) in &predicted.person_data {
        let trait_scores = {
            let pred: HashSet<&str> = record.traits.iter().map(String::as_str).collect();
            let expected = reference.traits_of(person);
            let refs: HashSet<&str> = expected.iter().map(String::as_str).collect();
            score(&pred, &refs)
        };

        let activity_scores = {
            let pred: HashSet<&str> = record.activities.iter().map(String::as_str).collect();
            let expected = reference.activities_of(person);
            let refs: HashSet<&str> = expected.iter().map(String::as_str).collect();
            score(&pred, &refs)
        };

        let relationship_scores = {
            let pred: HashSet<_> = predicted.relationships_of(person).into_iter().collect();
            let refs: HashSet<_> = reference.relationships_of(person).into_iter().collect();
            score(&pred, &refs)
        };

        for (i, (category, scores)) in Category::ALL
            .into_iter()
            .zip([trait_scores, activity_scores, relationship_scores])
            .enumerate()
        {
            sums[i].precision += scores.precision;
            sums[i].recall += scores.recall;
            sums[i].f1 += scores.f1;
            rows.push(MetricRecord {
                entity: person.clone(),
                category,
                scores,
            });
        }
    }

    let averages = Category::ALL
        .into_iter()
        .zip(sums)
        .map(|(category, sum)| {
            (
                category,
                Scores {
                    precision: sum.precision / num_people,
                    recall: sum.recall / num_people,
                    f1: sum.f1 / num_people,
                },
            )
        })
        .collect();

    Ok(EvalReport { rows, averages })
}

impl EvalReport {
    /// Fixed-width table: per-entity rows, a rule, then the averages.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:<10} | {:<12} | {:<8} | {:<8} | {:<8}\n",
            "Person", "Type", "Precision", "Recall", "F1"
        ));
        out.push_str(&"-".repeat(55));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&format!(
                "{:<10} | {:<12} | {:<8.2} | {:<8.2} | {:<8.2}\n",
                row.entity,
                row.category.to_string(),
                row.scores.precision,
                row.scores.recall,
                row.scores.f1
            ));
        }

        out.push_str(&"-".repeat(55));
        out.push('\n');

        for (category, scores) in &self.averages {
            out.push_str(&format!(
                "{:<10} | {:<12} | {:<8.2} | {:<8.2} | {:<8.2}\n",
                "Average",
                category.to_string(),
                scores.precision,
                scores.recall,
                scores.f1
            ));
        }

        out
    }
}
