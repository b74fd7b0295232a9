// Pipeline assembly from configuration

use std::{path::Path, sync::Arc};

use rescue_config::{ClassifierConfig, ClassifierProvider, DispatchConfig, LocationConfig};
use rescue_domain::Coordinates;
use rescue_pipeline::{
    DispatchOrchestrator, KnowledgeBase, LocationDefaults, LocationResolver, NeedClassifier,
};
use rescue_providers::{HuggingFaceZeroShot, KeywordLabeler, Labeler, RequestPacer};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Build the labeler selected by `classifier.provider`
///
/// The hosted provider needs its token up front; a missing token is a
/// configuration error rather than a run full of failed classifications.
pub fn build_labeler(config: &ClassifierConfig) -> CliResult<Arc<dyn Labeler>> {
    match config.provider {
        ClassifierProvider::Keyword => {
            info!("Using offline keyword classifier");
            Ok(Arc::new(KeywordLabeler::default()))
        }
        ClassifierProvider::HuggingFace => {
            let token = config.token().ok_or_else(|| {
                CliError::Provider(format!(
                    "no access token found in ${}",
                    config.token_env
                ))
            })?;
            let provider = HuggingFaceZeroShot::with_endpoint(
                token,
                config.endpoint.clone(),
                config.model.clone(),
                config.timeout(),
            )?;
            info!("Using Hugging Face model {}", provider.model());
            Ok(Arc::new(provider))
        }
    }
}

pub fn location_defaults(config: &LocationConfig) -> CliResult<LocationDefaults> {
    let coordinates = Coordinates::validated(config.default_latitude, config.default_longitude)
        .map_err(|e| CliError::Config(e.to_string()))?;
    Ok(LocationDefaults {
        name: config.default_location.trim().to_lowercase(),
        coordinates,
    })
}

pub fn load_knowledge(
    config: &DispatchConfig,
    knowledge: &Path,
    resources: Option<&Path>,
) -> CliResult<KnowledgeBase> {
    debug!(
        "Loading knowledge from {} (resources: {:?})",
        knowledge.display(),
        resources
    );
    let defaults = location_defaults(&config.location)?;
    Ok(KnowledgeBase::load(knowledge, resources, defaults)?)
}

/// Orchestrator wired with the configured classifier, threshold and batch settings
pub fn build_orchestrator(
    config: &DispatchConfig,
    knowledge: KnowledgeBase,
    labeler: Arc<dyn Labeler>,
) -> DispatchOrchestrator {
    let classifier = NeedClassifier::with_template(labeler, &config.classifier.hypothesis_template);

    DispatchOrchestrator::with_classifier(Arc::new(knowledge), classifier)
        .with_resolver(LocationResolver::new(config.location.fuzzy_threshold))
        .with_pacer(Arc::new(RequestPacer::new(config.batch.request_interval())))
        .with_concurrency(config.batch.concurrency)
}
