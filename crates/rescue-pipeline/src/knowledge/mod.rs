//! Read-only knowledge base: landmarks and resource centers
//!
//! Built once at startup and shared by reference with every pipeline stage.
//! Lookups never fail; absent data degrades to the configured default
//! location or to an explicit "no resource data" answer.

pub mod loader;

use std::{
    collections::{BTreeSet, HashMap},
    path::Path,
};

use regex::Regex;
use rescue_domain::{Coordinates, LandmarkEntry, ResourceCenter};
use tracing::info;

use crate::error::Result;

/// Fallback used when a ticket's location cannot be resolved or mapped
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDefaults {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Default for LocationDefaults {
    fn default() -> Self {
        Self {
            name: "chennai general".to_string(),
            coordinates: Coordinates::new(13.0827, 80.2707),
        }
    }
}

/// Resource centers plus the set of capability columns they track
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceTable {
    pub centers: Vec<ResourceCenter>,
    pub capabilities: BTreeSet<String>,
}

impl ResourceTable {
    pub fn new(centers: Vec<ResourceCenter>) -> Self {
        let capabilities = centers
            .iter()
            .flat_map(|c| c.capacities.keys().cloned())
            .collect();
        Self {
            centers,
            capabilities,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

/// Answer to "which centers can serve this need"
#[derive(Debug, PartialEq)]
pub enum CapableCenters<'a> {
    /// No resource data is loaded
    NoResourceDb,
    /// Candidate centers in table order (possibly empty)
    Centers(Vec<&'a ResourceCenter>),
}

#[derive(Debug)]
struct Landmark {
    name: String,
    coordinates: Option<Coordinates>,
    pattern: Regex,
}

/// Landmark set, coordinate map and resource table
#[derive(Debug)]
pub struct KnowledgeBase {
    landmarks: Vec<Landmark>,
    index: HashMap<String, usize>,
    resources: Option<ResourceTable>,
    defaults: LocationDefaults,
}

impl KnowledgeBase {
    pub fn builder() -> KnowledgeBaseBuilder {
        KnowledgeBaseBuilder::default()
    }

    /// Load landmarks from a knowledge table and, optionally, a resource table
    pub fn load(
        knowledge_path: &Path,
        resources_path: Option<&Path>,
        defaults: LocationDefaults,
    ) -> Result<Self> {
        let mut builder = Self::builder().defaults(defaults);

        for record in loader::load_landmarks(knowledge_path)? {
            builder = builder.landmark(&record.name, record.coordinates);
        }
        if let Some(path) = resources_path {
            builder = builder.resources(loader::load_resources(path)?);
        }

        let knowledge = builder.build()?;
        info!(
            "Loaded knowledge base: {} landmarks ({} mapped), {} resource centers",
            knowledge.landmark_count(),
            knowledge.mapped_landmarks().count(),
            knowledge.resource_centers().len()
        );
        Ok(knowledge)
    }

    /// Landmark names in load order
    pub fn landmark_names(&self) -> impl Iterator<Item = &str> {
        self.landmarks.iter().map(|l| l.name.as_str())
    }

    /// Landmark names with their whole-word matchers, in load order
    pub fn landmark_patterns(&self) -> impl Iterator<Item = (&str, &Regex)> {
        self.landmarks.iter().map(|l| (l.name.as_str(), &l.pattern))
    }

    /// Landmarks that carry coordinates, in load order
    pub fn mapped_landmarks(&self) -> impl Iterator<Item = LandmarkEntry> + '_ {
        self.landmarks
            .iter()
            .filter_map(|l| LandmarkEntry::new(&l.name, l.coordinates?).ok())
    }

    pub fn landmark_count(&self) -> usize {
        self.landmarks.len()
    }

    /// Coordinates of a landmark if known
    pub fn lookup_coordinates(&self, name: &str) -> Option<Coordinates> {
        self.index
            .get(name)
            .and_then(|&i| self.landmarks[i].coordinates)
    }

    /// Coordinates of a landmark, or the default coordinates when unmapped
    pub fn coordinates_for(&self, name: &str) -> Coordinates {
        self.lookup_coordinates(name)
            .unwrap_or(self.defaults.coordinates)
    }

    pub fn default_location(&self) -> &str {
        &self.defaults.name
    }

    pub fn default_coordinates(&self) -> Coordinates {
        self.defaults.coordinates
    }

    pub fn has_resources(&self) -> bool {
        self.resources.as_ref().is_some_and(|r| !r.is_empty())
    }

    pub fn resource_centers(&self) -> &[ResourceCenter] {
        self.resources
            .as_ref()
            .map(|r| r.centers.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the resource table has a capacity column for this need
    pub fn is_tracked_capability(&self, need: &str) -> bool {
        self.resources
            .as_ref()
            .is_some_and(|r| r.capabilities.contains(need))
    }

    /// Centers with positive capacity for `need`, or every center when the
    /// need is not a tracked capability
    pub fn capable_centers(&self, need: &str) -> CapableCenters<'_> {
        if !self.has_resources() {
            return CapableCenters::NoResourceDb;
        }

        let centers = self.resource_centers().iter();
        let need = need.trim().to_lowercase();
        if !self.is_tracked_capability(&need) {
            return CapableCenters::Centers(centers.collect());
        }

        CapableCenters::Centers(
            centers
                .filter(|c| c.capacity_for(&need).unwrap_or(0) > 0)
                .collect(),
        )
    }
}

/// Builder for [`KnowledgeBase`]
#[derive(Debug, Default)]
pub struct KnowledgeBaseBuilder {
    landmarks: Vec<(String, Option<Coordinates>)>,
    resources: Option<ResourceTable>,
    defaults: LocationDefaults,
}

impl KnowledgeBaseBuilder {
    pub fn defaults(mut self, defaults: LocationDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Add a landmark occurrence
    ///
    /// Names are lowercased and trimmed. A repeated name keeps its first
    /// position and its first known coordinates.
    pub fn landmark(mut self, name: &str, coordinates: Option<Coordinates>) -> Self {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return self;
        }

        match self.landmarks.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => {
                if existing.is_none() {
                    *existing = coordinates;
                }
            }
            None => self.landmarks.push((name, coordinates)),
        }
        self
    }

    pub fn resources(mut self, table: ResourceTable) -> Self {
        self.resources = Some(table);
        self
    }

    pub fn build(self) -> Result<KnowledgeBase> {
        let mut landmarks = Vec::with_capacity(self.landmarks.len());
        let mut index = HashMap::with_capacity(self.landmarks.len());

        for (name, coordinates) in self.landmarks {
            let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&name)))?;
            index.insert(name.clone(), landmarks.len());
            landmarks.push(Landmark {
                name,
                coordinates,
                pattern,
            });
        }

        Ok(KnowledgeBase {
            landmarks,
            index,
            resources: self.resources,
            defaults: self.defaults,
        })
    }
}
