//! Labeler trait

use async_trait::async_trait;

use crate::{
    error::ProviderError,
    models::{ClassificationRequest, ClassificationResponse},
};

/// Core trait that all classification providers must implement
#[async_trait]
pub trait Labeler: Send + Sync {
    /// Get the provider's unique identifier
    fn id(&self) -> &str;

    /// Score every candidate label for the request text
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResponse, ProviderError>;
}
