use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotateError {
    /// No model tier could be loaded by the annotation service. Fatal:
    /// the pipeline run aborts rather than degrading silently.
    #[error("no annotation model available (tried: {tried:?})")]
    ProviderUnavailable { tried: Vec<String> },

    #[error("annotation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("annotation service returned status {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("invalid annotation payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}
