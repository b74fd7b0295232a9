//! Nearest capable resource center

use rescue_domain::{Coordinates, ResourceAssignment};
use tracing::debug;

use crate::{
    geo::haversine_km,
    knowledge::{CapableCenters, KnowledgeBase},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceMatcher;

impl ResourceMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Assign the closest center with capacity for `need`
    ///
    /// Distances are compared after rounding to two decimals; on a tie the
    /// center listed first in the resource table wins.
    pub fn assign(
        &self,
        knowledge: &KnowledgeBase,
        need: &str,
        coordinates: Coordinates,
    ) -> ResourceAssignment {
        let centers = match knowledge.capable_centers(need) {
            CapableCenters::NoResourceDb => {
                debug!("No resource table loaded");
                return ResourceAssignment::NoResourceDb;
            }
            CapableCenters::Centers(centers) => centers,
        };

        let mut nearest: Option<(&str, f64)> = None;
        for center in centers {
            let distance = haversine_km(coordinates, center.coordinates);
            if nearest.map_or(true, |(_, best)| distance < best) {
                nearest = Some((&center.name, distance));
            }
        }

        match nearest {
            Some((center, distance_km)) => {
                debug!("Assigned {} to {} ({} km)", need, center, distance_km);
                ResourceAssignment::Assigned {
                    center: center.to_string(),
                    distance_km,
                }
            }
            None => {
                debug!("No center has capacity for {}", need);
                ResourceAssignment::NoResourceAvailable
            }
        }
    }
}
