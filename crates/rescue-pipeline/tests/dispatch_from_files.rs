//! Loading tables from disk and dispatching a batch end to end

use std::{fs, path::PathBuf, sync::Arc};

use rescue_domain::{Need, ResourceAssignment, TriageColor};
use rescue_pipeline::{
    build_report, evaluate, load_tickets, save_report, DispatchOrchestrator, KnowledgeBase,
    LocationDefaults, PipelineError,
};
use rescue_providers::StaticLabeler;
use tempfile::TempDir;

const TICKETS: &str = "\
S.No,Text,Need,Lat_Long,Location_Mentioned
1,need ambulance at Marina Beach for family of 6,ambulance,\"13.0500,80.2824\",Marina Beach
2,we are hungry in Adyar,food,\"13.0012,80.2565\",Adyar
3,fire near t nagar bus stand 2 people,fire engine,\"13.0418,80.2341\",T Nagar
";

const RESOURCES: &str = "\
location,latitude,longitude,ambulance,food,fire engine
Triplicane Depot,13.0588,80.2756,3,0,0
Guindy Depot,13.0067,80.2206,1,5,2
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn labeler() -> StaticLabeler {
    StaticLabeler::failing()
        .with_answer(
            "need ambulance at Marina Beach for family of 6",
            "ambulance",
        )
        .with_answer("we are hungry in Adyar", "food")
        .with_answer("fire near t nagar bus stand 2 people", "fire engine")
}

/// Test: Tables on disk produce one record per ticket and a sorted report
#[tokio::test]
async fn test_batch_from_files() {
    let dir = TempDir::new().unwrap();
    let tickets_path = write(&dir, "tickets.csv", TICKETS);
    let resources_path = write(&dir, "resources.csv", RESOURCES);

    let knowledge = KnowledgeBase::load(
        &tickets_path,
        Some(&resources_path),
        LocationDefaults::default(),
    )
    .unwrap();
    assert_eq!(knowledge.landmark_count(), 3);

    let tickets = load_tickets(&tickets_path).unwrap();
    let orchestrator = DispatchOrchestrator::new(Arc::new(knowledge), Arc::new(labeler()))
        .with_concurrency(2);
    let records = orchestrator.dispatch_batch(&tickets).await;

    assert_eq!(records.len(), 3);

    let first = &records[0];
    assert_eq!(first.need, Need::Ambulance);
    assert_eq!(first.location, "marina beach");
    assert_eq!(first.quantity, "6 family members");
    assert_eq!(first.urgency_score, 38.0);
    assert_eq!(first.triage, TriageColor::Red);
    assert_eq!(first.assignment.center_name(), "Triplicane Depot");

    // Only Guindy carries food
    assert_eq!(records[1].assignment.center_name(), "Guindy Depot");
    assert_eq!(records[2].quantity, "2 people");

    let accuracy = evaluate(&tickets, &records);
    assert_eq!(accuracy.need_accuracy, Some(1.0));
    assert_eq!(accuracy.location_accuracy, Some(1.0));

    let rows = build_report(&tickets, &records);
    assert_eq!(rows[0].serial, "1");
    assert!(rows
        .windows(2)
        .all(|pair| pair[0].urgency_score >= pair[1].urgency_score));

    let output = dir.path().join("final_matched_report.csv");
    save_report(&output, &rows).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 4);
    assert!(written.starts_with("S.No,Triage_Level,Urgency_Score"));
}

/// Test: Without a resource table every record carries the no-database sentinel
#[tokio::test]
async fn test_without_resources() {
    let dir = TempDir::new().unwrap();
    let tickets_path = write(&dir, "tickets.csv", TICKETS);

    let knowledge = KnowledgeBase::load(&tickets_path, None, LocationDefaults::default()).unwrap();
    let orchestrator = DispatchOrchestrator::new(Arc::new(knowledge), Arc::new(labeler()));

    let record = orchestrator.dispatch("we are hungry in Adyar").await;
    assert_eq!(record.assignment, ResourceAssignment::NoResourceDb);
    assert_eq!(record.assignment.distance_km(), 0.0);
}

#[test]
fn test_missing_knowledge_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.csv");

    let err = KnowledgeBase::load(&missing, None, LocationDefaults::default()).unwrap_err();
    assert!(matches!(err, PipelineError::MissingSource { .. }));
}
