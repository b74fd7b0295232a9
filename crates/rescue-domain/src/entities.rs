//! Domain entities: tickets, knowledge entries and dispatch records

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{DomainError, DomainResult},
    value_objects::{Coordinates, Need, TriageColor},
};

/// Center name reported when no center has capacity for the need
pub const NO_RESOURCE_AVAILABLE: &str = "No Resource Available";

/// Center name reported when no resource table is loaded at all
pub const NO_RESOURCE_DB: &str = "No Resource DB";

/// One raw emergency report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Serial number from the source table, if it carried one
    pub serial: Option<String>,
    /// Raw message text
    pub text: String,
    /// Ground-truth need (evaluation mode only)
    pub expected_need: Option<String>,
    /// Ground-truth location (evaluation mode only)
    pub expected_location: Option<String>,
}

impl Ticket {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            serial: None,
            text: text.into(),
            expected_need: None,
            expected_location: None,
        }
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    /// Attach ground truth, normalized to lowercase and trimmed
    pub fn with_ground_truth(mut self, need: Option<&str>, location: Option<&str>) -> Self {
        self.expected_need = need.map(|n| n.trim().to_lowercase());
        self.expected_location = location.map(|l| l.trim().to_lowercase());
        self
    }

    pub fn has_ground_truth(&self) -> bool {
        self.expected_need.is_some() || self.expected_location.is_some()
    }
}

/// A known place usable as a location anchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkEntry {
    pub name: String,
    pub coordinates: Coordinates,
}

impl LandmarkEntry {
    /// Create a landmark; the name is lowercased and trimmed
    pub fn new(name: &str, coordinates: Coordinates) -> DomainResult<Self> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Err(DomainError::InvalidLandmark {
                reason: "name cannot be empty".to_string(),
            });
        }
        coordinates.validate()?;
        Ok(Self { name, coordinates })
    }
}

/// A resource center and its per-need available units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCenter {
    pub name: String,
    pub coordinates: Coordinates,
    /// Available units keyed by need label
    pub capacities: BTreeMap<String, u32>,
}

impl ResourceCenter {
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            coordinates,
            capacities: BTreeMap::new(),
        }
    }

    pub fn with_capacity(mut self, need: &str, units: u32) -> Self {
        self.capacities.insert(normalize_name(need), units);
        self
    }

    /// Units available for a need label, `None` if the label is not tracked
    pub fn capacity_for(&self, need: &str) -> Option<u32> {
        self.capacities.get(need).copied()
    }
}

/// Outcome of matching a ticket to a resource center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResourceAssignment {
    Assigned { center: String, distance_km: f64 },
    /// Centers exist but none has capacity for the need
    NoResourceAvailable,
    /// No resource table was loaded
    NoResourceDb,
}

impl ResourceAssignment {
    pub fn center_name(&self) -> &str {
        match self {
            ResourceAssignment::Assigned { center, .. } => center,
            ResourceAssignment::NoResourceAvailable => NO_RESOURCE_AVAILABLE,
            ResourceAssignment::NoResourceDb => NO_RESOURCE_DB,
        }
    }

    pub fn distance_km(&self) -> f64 {
        match self {
            ResourceAssignment::Assigned { distance_km, .. } => *distance_km,
            _ => 0.0,
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, ResourceAssignment::Assigned { .. })
    }
}

/// Terminal artifact of the pipeline for one ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    pub need: Need,
    pub location: String,
    pub coordinates: Coordinates,
    pub quantity: String,
    pub urgency_score: f64,
    pub triage: TriageColor,
    pub assignment: ResourceAssignment,
    pub original_text: String,
}

impl DispatchRecord {
    /// Flatten into the shape served to interactive consumers
    pub fn summary(&self) -> TicketSummary {
        TicketSummary {
            need: self.need,
            location: self.location.clone(),
            quantity: self.quantity.clone(),
            urgency: self.urgency_score,
            triage: self.triage,
            assigned_center: self.assignment.center_name().to_string(),
            distance_km: self.assignment.distance_km(),
        }
    }
}

/// Single-ticket API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub need: Need,
    pub location: String,
    pub quantity: String,
    pub urgency: f64,
    pub triage: TriageColor,
    pub assigned_center: String,
    pub distance_km: f64,
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_name_normalized() {
        let entry = LandmarkEntry::new("  Marina Beach ", Coordinates::new(13.05, 80.28)).unwrap();
        assert_eq!(entry.name, "marina beach");
    }

    #[test]
    fn test_landmark_empty_name_rejected() {
        let result = LandmarkEntry::new("   ", Coordinates::new(13.05, 80.28));
        assert!(matches!(result, Err(DomainError::InvalidLandmark { .. })));
    }

    #[test]
    fn test_assignment_sentinels() {
        assert_eq!(
            ResourceAssignment::NoResourceAvailable.center_name(),
            "No Resource Available"
        );
        assert_eq!(
            ResourceAssignment::NoResourceDb.center_name(),
            "No Resource DB"
        );
        assert_eq!(ResourceAssignment::NoResourceDb.distance_km(), 0.0);
    }

    #[test]
    fn test_ticket_ground_truth_normalized() {
        let ticket = Ticket::new("help").with_ground_truth(Some(" Food "), Some("Adyar "));
        assert_eq!(ticket.expected_need.as_deref(), Some("food"));
        assert_eq!(ticket.expected_location.as_deref(), Some("adyar"));
        assert!(ticket.has_ground_truth());
    }

    #[test]
    fn test_summary_flattens_assignment() {
        let record = DispatchRecord {
            need: Need::Ambulance,
            location: "adyar".to_string(),
            coordinates: Coordinates::new(13.0, 80.2),
            quantity: "3 people".to_string(),
            urgency_score: 29.0,
            triage: TriageColor::Yellow,
            assignment: ResourceAssignment::Assigned {
                center: "Adyar Hub".to_string(),
                distance_km: 1.25,
            },
            original_text: "3 people hurt in adyar".to_string(),
        };

        let summary = record.summary();
        assert_eq!(summary.assigned_center, "Adyar Hub");
        assert_eq!(summary.distance_km, 1.25);
        assert_eq!(summary.urgency, 29.0);
    }
}
