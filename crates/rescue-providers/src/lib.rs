//! Rescue Dispatch classification providers
//!
//! A [`Labeler`] turns free text plus a candidate label set into scored labels.
//! The live implementation calls a hosted zero-shot model; offline and fixed
//! implementations exist for running without a credential and for tests.

pub mod error;
pub mod labeler;
pub mod models;
pub mod providers;
pub mod rate_limiter;

pub use error::ProviderError;
pub use labeler::Labeler;
pub use models::{ClassificationRequest, ClassificationResponse, ScoredLabel};
pub use providers::{HuggingFaceZeroShot, KeywordLabeler, StaticLabeler};
pub use rate_limiter::{PacerTurn, RequestPacer};
