use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AnnotateError;
use crate::provider::AnnotationProvider;
use crate::schema::AnnotatedSentence;

/// Model tiers, strongest first. The client walks this list at connect
/// time and keeps the first model the service manages to load.
pub const MODEL_TIERS: [&str; 3] = ["en_core_web_lg", "en_core_web_trf", "en_core_web_sm"];

/// HTTP client for a spaCy annotation sidecar.
#[derive(Clone)]
pub struct SpacyClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    model: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    sentences: Vec<AnnotatedSentence>,
}

#[derive(Deserialize)]
struct SegmentResponse {
    sentences: Vec<String>,
}

#[derive(Serialize)]
struct LoadRequest<'a> {
    model: &'a str,
}

impl SpacyClient {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            base_url,
            model,
            client: reqwest::Client::new(),
        }
    }

    pub fn default_url() -> String {
        std::env::var("SPACY_SERVER_URL").unwrap_or_else(|_| "http://localhost:8090".to_string())
    }

    /// Connect to the sidecar, trying each model tier in order.
    ///
    /// Returns a client pinned to the first tier the service loads, or
    /// `ProviderUnavailable` when every tier fails.
    pub async fn connect(base_url: String) -> Result<Self, AnnotateError> {
        let client = reqwest::Client::new();
        let url = format!("{}/load", base_url);

        for model in MODEL_TIERS {
            let response = client
                .post(&url)
                .json(&LoadRequest { model })
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    tracing::info!(model, "annotation model loaded");
                    return Ok(Self::new(base_url, model.to_string()));
                }
                Ok(resp) => {
                    tracing::warn!(model, status = %resp.status(), "model tier unavailable");
                }
                Err(e) => {
                    tracing::warn!(model, error = %e, "model tier unavailable");
                }
            }
        }

        Err(AnnotateError::ProviderUnavailable {
            tried: MODEL_TIERS.iter().map(|m| m.to_string()).collect(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn post_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        text: &str,
    ) -> Result<T, AnnotateError> {
        let url = format!("{}{}", self.base_url, path);
        let request = AnalyzeRequest {
            model: &self.model,
            text,
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(AnnotateError::BadStatus(response.status()));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AnnotationProvider for SpacyClient {
    async fn analyze(&self, text: &str) -> Result<Vec<AnnotatedSentence>, AnnotateError> {
        let response: AnalyzeResponse = self.post_json("/analyze", text).await?;
        Ok(response.sentences)
    }

    async fn segment_into_sentences(&self, text: &str) -> Result<Vec<String>, AnnotateError> {
        let response: SegmentResponse = self.post_json("/segment", text).await?;
        Ok(response.sentences)
    }
}
