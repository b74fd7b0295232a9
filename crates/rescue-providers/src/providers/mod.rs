//! Labeler implementations

pub mod fixed;
pub mod hugging_face;
pub mod keyword;

pub use fixed::StaticLabeler;
pub use hugging_face::HuggingFaceZeroShot;
pub use keyword::KeywordLabeler;
