//! Urgency scoring and triage colour
//!
//! urgency = round(0.6 * min(count * 5, 50) + 0.4 * weight(need) * 5, 2)
//!
//! Both inputs are capped at 50, so the score always lies in `[0, 50]`.

use once_cell::sync::Lazy;
use regex::Regex;
use rescue_domain::TriageColor;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Severity weight per need label
pub const NEED_WEIGHTS: &[(&str, u32)] = &[
    ("ambulance", 10),
    ("fire engine", 10),
    ("rescue boat", 9),
    ("helicopter", 9),
    ("medicine", 7),
    ("drinking water", 5),
    ("food", 4),
    ("shelter", 3),
    ("error", 1),
];

/// Weight of any label missing from [`NEED_WEIGHTS`]
pub const DEFAULT_NEED_WEIGHT: u32 = 2;

/// Lower bounds of each colour band, checked in order
pub const TRIAGE_BANDS: &[(f64, TriageColor)] = &[
    (30.0, TriageColor::Red),
    (15.0, TriageColor::Yellow),
    (f64::NEG_INFINITY, TriageColor::Green),
];

const QUANTITY_WEIGHT: f64 = 0.6;
const NEED_WEIGHT: f64 = 0.4;
const POINTS_PER_UNIT: f64 = 5.0;
const MAX_QUANTITY_SCORE: f64 = 50.0;

static FIRST_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("number pattern is valid"));

/// Breakdown of one urgency computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriageAssessment {
    /// Victim count read from the quantity description (1 if none)
    pub quantity: u64,
    pub quantity_score: f64,
    pub need_score: f64,
    pub urgency_score: f64,
    pub color: TriageColor,
}

/// Stateless urgency scorer over fixed weight and band tables
#[derive(Debug, Clone, Copy, Default)]
pub struct TriageScorer;

impl TriageScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn need_weight(&self, need: &str) -> u32 {
        NEED_WEIGHTS
            .iter()
            .find(|(label, _)| *label == need)
            .map(|(_, weight)| *weight)
            .unwrap_or(DEFAULT_NEED_WEIGHT)
    }

    /// Colour band for a score; total over every `f64` including NaN
    pub fn color_for(&self, score: f64) -> TriageColor {
        TRIAGE_BANDS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, color)| *color)
            .unwrap_or(TriageColor::Green)
    }

    pub fn assess(&self, need: &str, quantity: &str) -> TriageAssessment {
        let count = victim_count(quantity);
        let quantity_score = (count as f64 * POINTS_PER_UNIT).min(MAX_QUANTITY_SCORE);
        let need_score = self.need_weight(need) as f64 * POINTS_PER_UNIT;
        let urgency_score = round2(quantity_score * QUANTITY_WEIGHT + need_score * NEED_WEIGHT);
        let color = self.color_for(urgency_score);

        debug!(
            "Triage {:?}/{:?}: count={} urgency={} {}",
            need, quantity, count, urgency_score, color
        );

        TriageAssessment {
            quantity: count,
            quantity_score,
            need_score,
            urgency_score,
            color,
        }
    }
}

/// First integer in the description, or 1 for a single unidentified victim
fn victim_count(quantity: &str) -> u64 {
    FIRST_NUMBER
        .find(quantity)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .unwrap_or(1)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
