//! Per-ticket dispatch and bounded-concurrency batches

use std::{sync::Arc, time::Instant};

use futures::stream::{self, StreamExt};
use rescue_domain::{DispatchRecord, Ticket};
use rescue_providers::{Labeler, RequestPacer};
use tracing::{debug, info};

use crate::{
    extract_quantity,
    knowledge::KnowledgeBase,
    location::LocationResolver,
    matcher::ResourceMatcher,
    need::NeedClassifier,
    triage::TriageScorer,
};

/// Composes the pipeline phases over a shared knowledge base
///
/// Every phase absorbs its own failures, so dispatching a ticket always
/// produces a complete [`DispatchRecord`].
#[derive(Debug, Clone)]
pub struct DispatchOrchestrator {
    knowledge: Arc<KnowledgeBase>,
    classifier: NeedClassifier,
    resolver: LocationResolver,
    scorer: TriageScorer,
    matcher: ResourceMatcher,
    pacer: Arc<RequestPacer>,
    concurrency: usize,
}

impl DispatchOrchestrator {
    /// Orchestrator with default resolver and pacer, running batches sequentially
    pub fn new(knowledge: Arc<KnowledgeBase>, labeler: Arc<dyn Labeler>) -> Self {
        Self::with_classifier(knowledge, NeedClassifier::new(labeler))
    }

    pub fn with_classifier(knowledge: Arc<KnowledgeBase>, classifier: NeedClassifier) -> Self {
        Self {
            knowledge,
            classifier,
            resolver: LocationResolver::default(),
            scorer: TriageScorer::new(),
            matcher: ResourceMatcher::new(),
            pacer: Arc::new(RequestPacer::default()),
            concurrency: 1,
        }
    }

    pub fn with_resolver(mut self, resolver: LocationResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Pacer applied between classification calls in batch mode
    pub fn with_pacer(mut self, pacer: Arc<RequestPacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Maximum tickets in flight during a batch (at least 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Dispatch one raw message
    pub async fn dispatch(&self, text: &str) -> DispatchRecord {
        self.run(text, None).await
    }

    /// Dispatch tickets with up to `concurrency` in flight
    ///
    /// Records come back in input order regardless of completion order.
    pub async fn dispatch_batch(&self, tickets: &[Ticket]) -> Vec<DispatchRecord> {
        let started = Instant::now();
        info!(
            "Dispatching {} tickets with the {} classifier (concurrency {})",
            tickets.len(),
            self.classifier.labeler_id(),
            self.concurrency
        );

        let records: Vec<DispatchRecord> = stream::iter(tickets)
            .map(|ticket| self.run(&ticket.text, Some(self.pacer.as_ref())))
            .buffered(self.concurrency)
            .boxed()
            .collect()
            .await;

        info!(
            "Dispatched {} tickets in {:.2?}",
            records.len(),
            started.elapsed()
        );
        records
    }

    async fn run(&self, text: &str, pacer: Option<&RequestPacer>) -> DispatchRecord {
        let kb = self.knowledge.as_ref();

        let need = self.classifier.classify_with_pacer(text, pacer).await;
        let location = self.resolver.resolve(kb, text);
        let quantity = extract_quantity(text);

        let assessment = self.scorer.assess(need.label(), &quantity);
        let coordinates = kb.coordinates_for(&location);
        let assignment = self.matcher.assign(kb, need.label(), coordinates);

        debug!(
            "Ticket dispatched: need={} location={} urgency={} center={}",
            need,
            location,
            assessment.urgency_score,
            assignment.center_name()
        );

        DispatchRecord {
            need,
            location,
            coordinates,
            quantity,
            urgency_score: assessment.urgency_score,
            triage: assessment.color,
            assignment,
            original_text: text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::ResourceTable;
    use async_trait::async_trait;
    use rescue_domain::{Coordinates, Need, ResourceAssignment, ResourceCenter, TriageColor};
    use rescue_providers::{
        ClassificationRequest, ClassificationResponse, ProviderError, ScoredLabel, StaticLabeler,
    };
    use std::{sync::Mutex, time::Duration};

    /// Labeler that takes longer than the pacing interval and logs each call span
    struct SlowLabeler {
        latency: Duration,
        spans: Mutex<Vec<(Instant, Instant)>>,
    }

    #[async_trait]
    impl Labeler for SlowLabeler {
        fn id(&self) -> &str {
            "slow"
        }

        async fn classify(
            &self,
            _request: &ClassificationRequest,
        ) -> Result<ClassificationResponse, ProviderError> {
            let start = Instant::now();
            tokio::time::sleep(self.latency).await;
            let end = Instant::now();
            self.spans.lock().unwrap().push((start, end));

            Ok(ClassificationResponse::new(vec![ScoredLabel {
                label: "food".to_string(),
                score: 1.0,
            }]))
        }
    }

    fn knowledge() -> Arc<KnowledgeBase> {
        Arc::new(
            KnowledgeBase::builder()
                .landmark("marina beach", Some(Coordinates::new(13.05, 80.28)))
                .landmark("adyar", Some(Coordinates::new(13.0, 80.25)))
                .resources(ResourceTable::new(vec![
                    ResourceCenter::new("Central", Coordinates::new(13.08, 80.27))
                        .with_capacity("ambulance", 2)
                        .with_capacity("food", 0),
                ]))
                .build()
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_dispatch_single_ticket() {
        let orchestrator =
            DispatchOrchestrator::new(knowledge(), Arc::new(StaticLabeler::always("ambulance")));

        let record = orchestrator
            .dispatch("need ambulance at Marina Beach for family of 6")
            .await;

        assert_eq!(record.need, Need::Ambulance);
        assert_eq!(record.location, "marina beach");
        assert_eq!(record.quantity, "6 family members");
        assert_eq!(record.urgency_score, 38.0);
        assert_eq!(record.triage, TriageColor::Red);
        assert_eq!(record.assignment.center_name(), "Central");
    }

    #[tokio::test]
    async fn test_classification_failure_still_yields_record() {
        let orchestrator =
            DispatchOrchestrator::new(knowledge(), Arc::new(StaticLabeler::failing()));

        let record = orchestrator.dispatch("somebody please help").await;
        assert_eq!(record.need, Need::Error);
        assert_eq!(record.location, "chennai general");
        assert_eq!(record.coordinates, Coordinates::new(13.0827, 80.2707));
        assert_eq!(record.quantity, "not given");
        // Untracked "error" need may use any center
        assert!(record.assignment.is_assigned());
    }

    #[tokio::test]
    async fn test_no_capable_center() {
        let orchestrator =
            DispatchOrchestrator::new(knowledge(), Arc::new(StaticLabeler::always("food")));
        let record = orchestrator.dispatch("hungry in adyar").await;
        assert_eq!(record.assignment, ResourceAssignment::NoResourceAvailable);
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let labeler = StaticLabeler::always("food")
            .with_answer("fire in adyar", "fire engine")
            .with_answer("boat to marina beach", "rescue boat");
        let orchestrator = DispatchOrchestrator::new(knowledge(), Arc::new(labeler))
            .with_concurrency(4);

        let tickets = vec![
            Ticket::new("fire in adyar"),
            Ticket::new("boat to marina beach"),
            Ticket::new("hungry"),
        ];
        let records = orchestrator.dispatch_batch(&tickets).await;

        let needs: Vec<_> = records.iter().map(|r| r.need).collect();
        assert_eq!(needs, vec![Need::FireEngine, Need::RescueBoat, Need::Food]);
        assert_eq!(records[0].original_text, "fire in adyar");
    }

    #[tokio::test]
    async fn test_batch_gap_is_measured_from_call_end() {
        let interval = Duration::from_millis(25);
        let labeler = Arc::new(SlowLabeler {
            latency: Duration::from_millis(40),
            spans: Mutex::new(Vec::new()),
        });
        let orchestrator = DispatchOrchestrator::new(knowledge(), labeler.clone())
            .with_pacer(Arc::new(RequestPacer::new(interval)))
            .with_concurrency(3);

        let tickets = vec![
            Ticket::new("hungry in adyar"),
            Ticket::new("no food at marina beach"),
            Ticket::new("rations needed"),
        ];
        let records = orchestrator.dispatch_batch(&tickets).await;
        assert_eq!(records.len(), 3);

        let mut spans = labeler.spans.lock().unwrap().clone();
        spans.sort_by_key(|(start, _)| *start);
        assert_eq!(spans.len(), 3);
        for pair in spans.windows(2) {
            let (_, previous_end) = pair[0];
            let (next_start, _) = pair[1];
            assert!(next_start.duration_since(previous_end) >= interval);
        }
    }

    #[test]
    fn test_concurrency_floor() {
        let orchestrator =
            DispatchOrchestrator::new(knowledge(), Arc::new(StaticLabeler::always("food")))
                .with_concurrency(0);
        assert_eq!(orchestrator.concurrency(), 1);
    }
}
