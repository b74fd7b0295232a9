//! Offline keyword labeler
//!
//! Deterministic fallback that needs no credential: each candidate label is
//! scored by how early one of its keywords appears in the text.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    error::ProviderError,
    labeler::Labeler,
    models::{ClassificationRequest, ClassificationResponse, ScoredLabel},
};

/// Keyword-matching labeler
pub struct KeywordLabeler {
    keywords: HashMap<String, Vec<String>>,
}

impl KeywordLabeler {
    /// Create a labeler with no keywords beyond the labels themselves
    pub fn new() -> Self {
        Self {
            keywords: HashMap::new(),
        }
    }

    /// Register extra keywords for a label
    pub fn with_keywords(mut self, label: &str, keywords: &[&str]) -> Self {
        self.keywords
            .entry(label.to_lowercase())
            .or_default()
            .extend(keywords.iter().map(|k| k.to_lowercase()));
        self
    }

    /// Keyword table tuned for flood and fire emergency messages
    pub fn emergency_defaults() -> Self {
        Self::new()
            .with_keywords("food", &["hungry", "starving", "meal", "rice", "ration"])
            .with_keywords(
                "drinking water",
                &["thirsty", "water bottles", "dehydrated"],
            )
            .with_keywords("fire engine", &["fire", "smoke", "burning", "flames"])
            .with_keywords(
                "ambulance",
                &["injured", "bleeding", "unconscious", "heart attack", "accident"],
            )
            .with_keywords("medicine", &["insulin", "tablets", "medication", "inhaler"])
            .with_keywords("rescue boat", &["boat", "stranded", "flooded", "submerged"])
            .with_keywords("helicopter", &["airlift", "rooftop", "terrace"])
            .with_keywords("shelter", &["homeless", "tent", "nowhere to stay"])
    }

    /// Earliest byte offset at which any keyword of `label` occurs
    fn earliest_hit(&self, text: &str, label: &str) -> Option<usize> {
        let label = label.to_lowercase();
        let extra = self.keywords.get(&label).map(Vec::as_slice).unwrap_or(&[]);

        std::iter::once(&label)
            .chain(extra.iter())
            .filter_map(|keyword| text.find(keyword.as_str()))
            .min()
    }
}

impl Default for KeywordLabeler {
    fn default() -> Self {
        Self::emergency_defaults()
    }
}

#[async_trait]
impl Labeler for KeywordLabeler {
    fn id(&self) -> &str {
        "keyword"
    }

    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResponse, ProviderError> {
        let text = request.text.to_lowercase();

        let mut labels: Vec<ScoredLabel> = request
            .candidate_labels
            .iter()
            .map(|label| ScoredLabel {
                label: label.clone(),
                score: self
                    .earliest_hit(&text, label)
                    .map(|offset| 1.0 / (1.0 + offset as f64))
                    .unwrap_or(0.0),
            })
            .collect();

        if labels.iter().all(|l| l.score == 0.0) {
            debug!("No keyword matched for input");
            return Err(ProviderError::NoLabel);
        }

        // Stable sort keeps candidate order among equal scores
        labels.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(ClassificationResponse::new(labels))
    }
}
