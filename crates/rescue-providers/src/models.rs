//! Request and response models shared by all labelers

use serde::{Deserialize, Serialize};

/// A zero-shot classification request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub text: String,
    pub candidate_labels: Vec<String>,
    /// Natural-language template with a `{}` placeholder for the label
    pub hypothesis_template: String,
}

impl ClassificationRequest {
    pub fn new(
        text: impl Into<String>,
        candidate_labels: Vec<String>,
        hypothesis_template: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            candidate_labels,
            hypothesis_template: hypothesis_template.into(),
        }
    }

    /// Render the hypothesis sentence for one label
    pub fn hypothesis_for(&self, label: &str) -> String {
        self.hypothesis_template.replacen("{}", label, 1)
    }
}

/// One label with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    pub label: String,
    pub score: f64,
}

/// Scored labels returned by a provider
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassificationResponse {
    pub labels: Vec<ScoredLabel>,
}

impl ClassificationResponse {
    pub fn new(labels: Vec<ScoredLabel>) -> Self {
        Self { labels }
    }

    /// Highest-scoring label; the first one wins a tie
    pub fn best(&self) -> Option<&ScoredLabel> {
        self.labels.iter().fold(None, |best, candidate| match best {
            Some(current) if current.score >= candidate.score => Some(current),
            _ => Some(candidate),
        })
    }
}
