//! Need classification on top of a [`Labeler`]
//!
//! Classification is best-effort: any provider failure, an empty text or a
//! label outside the candidate set yields [`Need::Error`] instead of an error.

use std::sync::Arc;

use rescue_domain::Need;
use rescue_providers::{ClassificationRequest, Labeler, RequestPacer};
use tracing::{debug, warn};

/// Hypothesis sentence sent with every request
pub const DEFAULT_HYPOTHESIS_TEMPLATE: &str = "This emergency message indicates a need for {}.";

/// Maps free text to one of the fixed need labels
///
/// ```
/// use std::sync::Arc;
/// use rescue_domain::Need;
/// use rescue_pipeline::NeedClassifier;
/// use rescue_providers::StaticLabeler;
///
/// # tokio_test::block_on(async {
/// let classifier = NeedClassifier::new(Arc::new(StaticLabeler::always("food")));
/// assert_eq!(classifier.classify("we have not eaten in two days").await, Need::Food);
/// assert_eq!(classifier.classify("   ").await, Need::Error);
/// # });
/// ```
#[derive(Clone)]
pub struct NeedClassifier {
    labeler: Arc<dyn Labeler>,
    candidate_labels: Vec<String>,
    hypothesis_template: String,
}

impl NeedClassifier {
    pub fn new(labeler: Arc<dyn Labeler>) -> Self {
        Self::with_template(labeler, DEFAULT_HYPOTHESIS_TEMPLATE)
    }

    pub fn with_template(labeler: Arc<dyn Labeler>, hypothesis_template: &str) -> Self {
        Self {
            labeler,
            candidate_labels: Need::candidate_labels(),
            hypothesis_template: hypothesis_template.to_string(),
        }
    }

    pub fn labeler_id(&self) -> &str {
        self.labeler.id()
    }

    pub async fn classify(&self, text: &str) -> Need {
        self.classify_with_pacer(text, None).await
    }

    /// Classify, holding a pacing turn for the duration of the provider call
    pub async fn classify_with_pacer(&self, text: &str, pacer: Option<&RequestPacer>) -> Need {
        if text.trim().is_empty() {
            debug!("Empty ticket text, skipping classification");
            return Need::Error;
        }

        let turn = match pacer {
            Some(pacer) => Some(pacer.wait_turn().await),
            None => None,
        };

        let request = ClassificationRequest::new(
            text,
            self.candidate_labels.clone(),
            self.hypothesis_template.clone(),
        );
        let result = self.labeler.classify(&request).await;
        drop(turn);

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!("Classification via {} failed: {}", self.labeler.id(), e);
                return Need::Error;
            }
        };

        let Some(best) = response.best() else {
            warn!("Classifier {} returned no labels", self.labeler.id());
            return Need::Error;
        };

        match Need::from_label(&best.label) {
            Ok(need) if !need.is_error() => {
                debug!("Classified need: {} ({:.3})", need, best.score);
                need
            }
            _ => {
                warn!("Classifier returned unexpected label {:?}", best.label);
                Need::Error
            }
        }
    }
}

impl std::fmt::Debug for NeedClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeedClassifier")
            .field("labeler", &self.labeler.id())
            .field("hypothesis_template", &self.hypothesis_template)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rescue_providers::{KeywordLabeler, StaticLabeler};

    #[tokio::test]
    async fn test_returns_best_label() {
        let classifier = NeedClassifier::new(Arc::new(StaticLabeler::always("rescue boat")));
        assert_eq!(
            classifier.classify("water everywhere").await,
            Need::RescueBoat
        );
    }

    #[tokio::test]
    async fn test_failure_becomes_error() {
        let classifier = NeedClassifier::new(Arc::new(StaticLabeler::failing()));
        assert_eq!(classifier.classify("help").await, Need::Error);
    }

    #[tokio::test]
    async fn test_unknown_label_becomes_error() {
        let classifier = NeedClassifier::new(Arc::new(StaticLabeler::always("blankets")));
        assert_eq!(classifier.classify("cold night").await, Need::Error);

        // "error" itself is not a candidate the service may answer with
        let classifier = NeedClassifier::new(Arc::new(StaticLabeler::always("error")));
        assert_eq!(classifier.classify("cold night").await, Need::Error);
    }

    #[tokio::test]
    async fn test_empty_text_skips_call() {
        let labeler = Arc::new(StaticLabeler::always("food"));
        let classifier = NeedClassifier::new(labeler.clone());
        assert_eq!(classifier.classify("   ").await, Need::Error);
        assert_eq!(labeler.calls(), 0);
    }

    #[tokio::test]
    async fn test_keyword_labeler() {
        let classifier = NeedClassifier::new(Arc::new(KeywordLabeler::default()));
        assert_eq!(
            classifier.classify("need ambulance at marina beach").await,
            Need::Ambulance
        );
    }

    #[tokio::test]
    async fn test_pacer_is_used() {
        let classifier = NeedClassifier::new(Arc::new(StaticLabeler::always("food")));
        let pacer = RequestPacer::unlimited();
        assert_eq!(
            classifier.classify_with_pacer("hungry", Some(&pacer)).await,
            Need::Food
        );
    }
}
