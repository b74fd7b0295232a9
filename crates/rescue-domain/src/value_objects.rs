//! Value objects representing immutable domain concepts

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// Quantity description used when no victim count could be extracted
pub const QUANTITY_NOT_GIVEN: &str = "not given";

/// Need category predicted for a ticket
///
/// The eight candidate labels are the only values a classifier may produce;
/// [`Need::Error`] marks a ticket whose classification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Need {
    #[serde(rename = "food")]
    Food,
    #[serde(rename = "drinking water")]
    DrinkingWater,
    #[serde(rename = "fire engine")]
    FireEngine,
    #[serde(rename = "ambulance")]
    Ambulance,
    #[serde(rename = "medicine")]
    Medicine,
    #[serde(rename = "rescue boat")]
    RescueBoat,
    #[serde(rename = "helicopter")]
    Helicopter,
    #[serde(rename = "shelter")]
    Shelter,
    #[serde(rename = "error")]
    Error,
}

impl Need {
    /// Candidate labels offered to the classifier, in canonical order
    pub const CANDIDATES: [Need; 8] = [
        Need::Food,
        Need::DrinkingWater,
        Need::FireEngine,
        Need::Ambulance,
        Need::Medicine,
        Need::RescueBoat,
        Need::Helicopter,
        Need::Shelter,
    ];

    /// Get the wire label for this need
    pub fn label(&self) -> &'static str {
        match self {
            Need::Food => "food",
            Need::DrinkingWater => "drinking water",
            Need::FireEngine => "fire engine",
            Need::Ambulance => "ambulance",
            Need::Medicine => "medicine",
            Need::RescueBoat => "rescue boat",
            Need::Helicopter => "helicopter",
            Need::Shelter => "shelter",
            Need::Error => "error",
        }
    }

    /// Parse a label (case and surrounding whitespace are ignored)
    pub fn from_label(label: &str) -> DomainResult<Self> {
        let normalized = label.trim().to_lowercase();
        Self::CANDIDATES
            .iter()
            .chain(std::iter::once(&Need::Error))
            .find(|need| need.label() == normalized)
            .copied()
            .ok_or(DomainError::UnknownNeed { label: normalized })
    }

    /// Candidate labels as owned strings, ready to send to a classifier
    pub fn candidate_labels() -> Vec<String> {
        Self::CANDIDATES
            .iter()
            .map(|need| need.label().to_string())
            .collect()
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Need::Error)
    }
}

impl fmt::Display for Need {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Three-level triage colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageColor {
    Red,
    Yellow,
    Green,
}

impl TriageColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriageColor::Red => "red",
            TriageColor::Yellow => "yellow",
            TriageColor::Green => "green",
        }
    }
}

impl fmt::Display for TriageColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A WGS84 point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create coordinates, rejecting non-finite or out-of-range values
    pub fn validated(latitude: f64, longitude: f64) -> DomainResult<Self> {
        let coordinates = Self::new(latitude, longitude);
        coordinates.validate()?;
        Ok(coordinates)
    }

    /// Parse a combined `"latitude,longitude"` field
    pub fn parse_pair(raw: &str) -> DomainResult<Self> {
        let (lat, lon) = raw
            .split_once(',')
            .ok_or_else(|| DomainError::InvalidCoordinates {
                reason: format!("expected \"latitude,longitude\", got {:?}", raw),
            })?;

        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| DomainError::InvalidCoordinates {
                    reason: format!("{:?}: {}", part.trim(), e),
                })
        };

        Self::validated(parse(lat)?, parse(lon)?)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(DomainError::InvalidCoordinates {
                reason: format!("latitude {} out of range", self.latitude),
            });
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(DomainError::InvalidCoordinates {
                reason: format!("longitude {} out of range", self.longitude),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_need_labels_round_trip() {
        for need in Need::CANDIDATES {
            assert_eq!(Need::from_label(need.label()).unwrap(), need);
        }
        assert_eq!(Need::from_label("error").unwrap(), Need::Error);
    }

    #[test]
    fn test_need_from_label_normalizes() {
        assert_eq!(
            Need::from_label("  Drinking Water ").unwrap(),
            Need::DrinkingWater
        );
    }

    #[test]
    fn test_need_from_label_unknown() {
        let err = Need::from_label("pizza").unwrap_err();
        assert!(matches!(err, DomainError::UnknownNeed { .. }));
    }

    #[test]
    fn test_candidate_labels_excludes_error() {
        let labels = Need::candidate_labels();
        assert_eq!(labels.len(), 8);
        assert!(!labels.contains(&"error".to_string()));
    }

    #[test]
    fn test_need_serializes_as_label() {
        let json = serde_json::to_string(&Need::RescueBoat).unwrap();
        assert_eq!(json, "\"rescue boat\"");
    }

    #[test]
    fn test_parse_pair() {
        let coords = Coordinates::parse_pair("13.0500, 80.2824").unwrap();
        assert_eq!(coords, Coordinates::new(13.05, 80.2824));
    }

    #[test]
    fn test_parse_pair_rejects_garbage() {
        assert!(Coordinates::parse_pair("13.05").is_err());
        assert!(Coordinates::parse_pair("north,80.1").is_err());
        assert!(Coordinates::parse_pair("95.0,80.1").is_err());
    }

    #[test]
    fn test_triage_color_display() {
        assert_eq!(TriageColor::Red.to_string(), "red");
        assert_eq!(
            serde_json::to_string(&TriageColor::Yellow).unwrap(),
            "\"yellow\""
        );
    }
}
