//! Fixed-answer labeler for tests and dry runs

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::{
    error::ProviderError,
    labeler::Labeler,
    models::{ClassificationRequest, ClassificationResponse, ScoredLabel},
};

/// Labeler that answers from a lookup table
///
/// Texts found in the table get their mapped label; all other texts get the
/// fallback label, or an error when no fallback is set.
pub struct StaticLabeler {
    answers: HashMap<String, String>,
    fallback: Option<String>,
    calls: AtomicUsize,
}

impl StaticLabeler {
    /// Always answer with `label`
    pub fn always(label: &str) -> Self {
        Self {
            answers: HashMap::new(),
            fallback: Some(label.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every request
    pub fn failing() -> Self {
        Self {
            answers: HashMap::new(),
            fallback: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_answer(mut self, text: &str, label: &str) -> Self {
        self.answers.insert(text.to_string(), label.to_string());
        self
    }

    /// Number of classify calls received so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Labeler for StaticLabeler {
    fn id(&self) -> &str {
        "static"
    }

    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let label = self
            .answers
            .get(&request.text)
            .or(self.fallback.as_ref())
            .ok_or_else(|| ProviderError::NetworkError("static labeler has no answer".into()))?;

        Ok(ClassificationResponse::new(vec![ScoredLabel {
            label: label.clone(),
            score: 1.0,
        }]))
    }
}
