//! Rescue Dispatch pipeline
//!
//! Turns one free-text emergency ticket into a [`DispatchRecord`] in five
//! phases: need classification, location resolution, quantity extraction,
//! urgency scoring and resource matching. [`DispatchOrchestrator`] composes
//! the phases and runs batches with bounded concurrency.

pub mod error;
pub mod evaluation;
pub mod geo;
pub mod knowledge;
pub mod location;
pub mod matcher;
pub mod need;
pub mod orchestrator;
pub mod quantity;
pub mod report;
pub mod similarity;
pub mod tickets;
pub mod triage;

pub use error::{PipelineError, Result};
pub use evaluation::{evaluate, AccuracyReport};
pub use geo::{haversine_km, EARTH_RADIUS_KM};
pub use knowledge::{
    CapableCenters, KnowledgeBase, KnowledgeBaseBuilder, LocationDefaults, ResourceTable,
};
pub use location::{LocationMatch, LocationResolver, PartialRatio, SimilarityScorer};
pub use matcher::ResourceMatcher;
pub use need::{NeedClassifier, DEFAULT_HYPOTHESIS_TEMPLATE};
pub use orchestrator::DispatchOrchestrator;
pub use quantity::extract_quantity;
pub use report::{build_report, save_report, write_report, DispatchReportRow};
pub use similarity::{partial_ratio, ratio};
pub use tickets::{load_tickets, read_tickets};
pub use triage::{TriageAssessment, TriageScorer};

pub use rescue_domain::DispatchRecord;
