use async_trait::async_trait;

use crate::error::AnnotateError;
use crate::schema::AnnotatedSentence;

/// A linguistic annotation backend.
///
/// The pipeline treats the provider as a black box: one call, one complete
/// materialized sequence of annotated sentences. No streaming, no partial
/// results; a provider failure fails the whole run.
#[async_trait]
pub trait AnnotationProvider {
    /// Segment `text` into sentences and annotate each one with tokens
    /// (surface form, lemma, coarse POS), named-entity spans and
    /// noun-chunk boundaries.
    async fn analyze(&self, text: &str) -> Result<Vec<AnnotatedSentence>, AnnotateError>;

    /// Sentence segmentation only, without token-level annotations.
    async fn segment_into_sentences(&self, text: &str) -> Result<Vec<String>, AnnotateError>;
}
