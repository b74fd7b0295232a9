//! Landmark resolution: whole-word exact match, then fuzzy match, then fallback

use std::sync::Arc;

use tracing::debug;

use crate::{knowledge::KnowledgeBase, similarity};

/// Fuzzy scores must be strictly above this to be accepted
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 85.0;

/// Similarity scorer on a 0-100 scale
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, text: &str, candidate: &str) -> f64;
}

/// Partial-ratio scorer (best alignment of the shorter string)
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl SimilarityScorer for PartialRatio {
    fn score(&self, text: &str, candidate: &str) -> f64 {
        similarity::partial_ratio(text, candidate)
    }
}

/// How a location was resolved
#[derive(Debug, Clone, PartialEq)]
pub enum LocationMatch {
    Exact(String),
    Fuzzy { name: String, score: f64 },
    Fallback(String),
}

impl LocationMatch {
    pub fn name(&self) -> &str {
        match self {
            LocationMatch::Exact(name) => name,
            LocationMatch::Fuzzy { name, .. } => name,
            LocationMatch::Fallback(name) => name,
        }
    }

    pub fn into_name(self) -> String {
        match self {
            LocationMatch::Exact(name)
            | LocationMatch::Fuzzy { name, .. }
            | LocationMatch::Fallback(name) => name,
        }
    }
}

/// Maps ticket text to a known landmark name or the default location
#[derive(Clone)]
pub struct LocationResolver {
    threshold: f64,
    scorer: Arc<dyn SimilarityScorer>,
}

impl LocationResolver {
    pub fn new(threshold: f64) -> Self {
        Self::with_scorer(threshold, Arc::new(PartialRatio))
    }

    pub fn with_scorer(threshold: f64, scorer: Arc<dyn SimilarityScorer>) -> Self {
        Self { threshold, scorer }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Resolved landmark name
    pub fn resolve(&self, knowledge: &KnowledgeBase, text: &str) -> String {
        self.resolve_detailed(knowledge, text).into_name()
    }

    /// Resolution with the phase that produced it
    pub fn resolve_detailed(&self, knowledge: &KnowledgeBase, text: &str) -> LocationMatch {
        let text = text.trim().to_lowercase();

        if let Some((name, _)) = knowledge
            .landmark_patterns()
            .find(|(_, pattern)| pattern.is_match(&text))
        {
            debug!("Exact landmark match: {}", name);
            return LocationMatch::Exact(name.to_string());
        }

        // First landmark wins a tie on score
        let mut best: Option<(&str, f64)> = None;
        for name in knowledge.landmark_names() {
            let score = self.scorer.score(&text, name);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((name, score));
            }
        }

        match best {
            Some((name, score)) if score > self.threshold => {
                debug!("Fuzzy landmark match: {} ({:.1})", name, score);
                LocationMatch::Fuzzy {
                    name: name.to_string(),
                    score,
                }
            }
            _ => {
                debug!(
                    "No landmark matched, using default location (best: {:?})",
                    best
                );
                LocationMatch::Fallback(knowledge.default_location().to_string())
            }
        }
    }
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_THRESHOLD)
    }
}

impl std::fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationResolver")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}
