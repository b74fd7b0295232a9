//! A hosted classifier that stops answering degrades tickets instead of stalling them

use std::{sync::Arc, time::Duration};

use rescue_domain::{Coordinates, Need};
use rescue_pipeline::{DispatchOrchestrator, KnowledgeBase, NeedClassifier};
use rescue_providers::HuggingFaceZeroShot;
use tokio::net::TcpListener;

/// Endpoint that accepts connections and never writes a response
async fn unresponsive_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });
    format!("http://{}", address)
}

async fn hosted_labeler(timeout: Duration) -> Arc<HuggingFaceZeroShot> {
    let labeler = HuggingFaceZeroShot::with_endpoint(
        "test-token".to_string(),
        unresponsive_endpoint().await,
        "org/zeroshot".to_string(),
        timeout,
    )
    .unwrap();
    Arc::new(labeler)
}

#[tokio::test]
async fn test_timed_out_classification_is_error_need() {
    let classifier = NeedClassifier::new(hosted_labeler(Duration::from_millis(300)).await);

    let started = std::time::Instant::now();
    let need = classifier.classify("water rising in adyar, 4 people").await;

    assert_eq!(need, Need::Error);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_timed_out_ticket_still_dispatched() {
    let knowledge = KnowledgeBase::builder()
        .landmark("adyar", Some(Coordinates::new(13.0012, 80.2565)))
        .build()
        .unwrap();
    let orchestrator = DispatchOrchestrator::new(
        Arc::new(knowledge),
        hosted_labeler(Duration::from_millis(300)).await,
    );

    let record = orchestrator
        .dispatch("water rising in adyar, 4 people")
        .await;

    assert_eq!(record.need, Need::Error);
    assert_eq!(record.location, "adyar");
    assert_eq!(record.quantity, "4 people");
}
