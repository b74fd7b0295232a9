//! Hugging Face zero-shot classification provider
//!
//! Calls the hosted inference API for an NLI model with the candidate labels
//! and hypothesis template passed as parameters.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::{
    error::ProviderError,
    labeler::Labeler,
    models::{ClassificationRequest, ClassificationResponse, ScoredLabel},
};

/// Default inference endpoint
pub const DEFAULT_ENDPOINT: &str = "https://router.huggingface.co/hf-inference";

/// Default NLI model used for zero-shot classification
pub const DEFAULT_MODEL: &str = "MoritzLaurer/deberta-v3-large-zeroshot-v2.0";

/// Hugging Face zero-shot provider implementation
pub struct HuggingFaceZeroShot {
    api_token: String,
    endpoint: String,
    model: String,
    client: Arc<Client>,
}

impl HuggingFaceZeroShot {
    /// Create a provider against the default endpoint and model
    pub fn new(api_token: String, timeout: Duration) -> Result<Self, ProviderError> {
        Self::with_endpoint(
            api_token,
            DEFAULT_ENDPOINT.to_string(),
            DEFAULT_MODEL.to_string(),
            timeout,
        )
    }

    /// Create a provider with a custom endpoint and model
    pub fn with_endpoint(
        api_token: String,
        endpoint: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::ConfigError(e.to_string()))?;
        Self::with_client(Arc::new(client), api_token, endpoint, model)
    }

    /// Create a provider with a custom HTTP client
    pub fn with_client(
        client: Arc<Client>,
        api_token: String,
        endpoint: String,
        model: String,
    ) -> Result<Self, ProviderError> {
        if api_token.trim().is_empty() {
            return Err(ProviderError::ConfigError(
                "Hugging Face API token is required".to_string(),
            ));
        }
        if model.trim().is_empty() {
            return Err(ProviderError::ConfigError(
                "Hugging Face model id is required".to_string(),
            ));
        }

        Ok(Self {
            api_token,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.endpoint, self.model)
    }

    fn get_auth_header(&self) -> String {
        format!("Bearer {}", self.api_token)
    }

    /// Convert either response shape into our response
    fn convert_response(
        response: ZeroShotResponse,
    ) -> Result<ClassificationResponse, ProviderError> {
        match response {
            ZeroShotResponse::Columns { labels, scores, .. } => {
                if labels.len() != scores.len() {
                    return Err(ProviderError::ParseError(format!(
                        "{} labels but {} scores",
                        labels.len(),
                        scores.len()
                    )));
                }
                Ok(ClassificationResponse::new(
                    labels
                        .into_iter()
                        .zip(scores)
                        .map(|(label, score)| ScoredLabel { label, score })
                        .collect(),
                ))
            }
            ZeroShotResponse::Rows(rows) => Ok(ClassificationResponse::new(
                rows.into_iter()
                    .map(|row| ScoredLabel {
                        label: row.label,
                        score: row.score,
                    })
                    .collect(),
            )),
            ZeroShotResponse::Failure { error } => Err(ProviderError::ProviderError(error)),
        }
    }
}

#[async_trait]
impl Labeler for HuggingFaceZeroShot {
    fn id(&self) -> &str {
        "huggingface"
    }

    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResponse, ProviderError> {
        debug!("Sending zero-shot request to Hugging Face: {}", self.model);

        let body = ZeroShotRequest {
            inputs: &request.text,
            parameters: ZeroShotParameters {
                candidate_labels: &request.candidate_labels,
                hypothesis_template: &request.hypothesis_template,
                multi_label: false,
            },
        };

        let response = self
            .client
            .post(self.model_url())
            .header("Authorization", self.get_auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to Hugging Face: {}", e);
                ProviderError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Hugging Face API error: {} - {}", status, error_text);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthError,
                StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited,
                _ => ProviderError::ProviderError(format!(
                    "Hugging Face API error: {} - {}",
                    status, error_text
                )),
            });
        }

        let payload: ZeroShotResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Hugging Face response: {}", e);
            ProviderError::ParseError(e.to_string())
        })?;

        Self::convert_response(payload)
    }
}

/// Zero-shot request body
#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [String],
    hypothesis_template: &'a str,
    multi_label: bool,
}

/// The API has answered in two shapes over time
#[derive(Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Columns {
        #[allow(dead_code)]
        #[serde(default)]
        sequence: Option<String>,
        labels: Vec<String>,
        scores: Vec<f64>,
    },
    Rows(Vec<ZeroShotRow>),
    Failure {
        error: String,
    },
}

#[derive(Deserialize)]
struct ZeroShotRow {
    label: String,
    score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_rejected() {
        let result = HuggingFaceZeroShot::new(String::new(), Duration::from_secs(5));
        assert!(matches!(result, Err(ProviderError::ConfigError(_))));
    }

    #[test]
    fn test_model_url_strips_trailing_slash() {
        let provider = HuggingFaceZeroShot::with_endpoint(
            "token".to_string(),
            "http://localhost:8080/".to_string(),
            "org/model".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            provider.model_url(),
            "http://localhost:8080/models/org/model"
        );
    }

    #[test]
    fn test_convert_columns_mismatch() {
        let response = ZeroShotResponse::Columns {
            sequence: None,
            labels: vec!["food".to_string()],
            scores: vec![],
        };
        assert!(matches!(
            HuggingFaceZeroShot::convert_response(response),
            Err(ProviderError::ParseError(_))
        ));
    }

    #[test]
    fn test_convert_rows() {
        let payload = r#"[{"label":"shelter","score":0.8},{"label":"food","score":0.2}]"#;
        let response: ZeroShotResponse = serde_json::from_str(payload).unwrap();
        let converted = HuggingFaceZeroShot::convert_response(response).unwrap();
        assert_eq!(converted.best().unwrap().label, "shelter");
    }
}
