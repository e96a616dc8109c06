// Integration tests for Record Match

use record_match::config::Settings;
use record_match::core::{DuplicateDetector, RecordEngine};
use record_match::models::{MatchType, Record};
use std::sync::Arc;

fn create_test_record(id: &str, first: &str, last: &str, email: &str, phone: &str) -> Record {
    Record::new()
        .with_id(id)
        .with_name(first, last)
        .with_email(email)
        .with_phone(phone)
}

#[test]
fn test_integration_end_to_end_ingest() {
    let mut engine = RecordEngine::new();

    let records = vec![
        create_test_record("1", "John", "Doe", "john@x.com", "555-0101")
            .with_score(4.5)
            .with_priority(2.0),
        create_test_record("2", "Jane", "Roe", "jane@x.com", "555-0102")
            .with_score(3.0)
            .with_priority(9.0),
        // Email duplicate
        create_test_record("3", "Bob", "Stone", "JOHN@X.COM", "555-0103")
            .with_score(5.0)
            .with_priority(10.0),
        // Phone duplicate
        create_test_record("4", "Ann", "Lee", "ann@x.com", "(555) 0102").with_score(1.0),
        // Advisory name match
        create_test_record("5", "john", "DOE", "jd@y.com", "555-0199")
            .with_score(2.5)
            .with_priority(5.0),
        // No contact fields at all
        Record::new().with_id("6").with_score(4.5),
        Record::new().with_id("7").with_priority(-1.0),
    ];

    let summary = engine.ingest_all(records).unwrap();

    assert_eq!(summary.total, 7);
    assert_eq!(summary.accepted, 5);
    assert_eq!(summary.rejected, 2);
    assert_eq!(summary.advisory_name_matches, 1);

    // Only accepted records are ranked
    let ids: Vec<&str> = engine
        .ratings()
        .in_order_traversal()
        .into_iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids.len(), 4);
    assert!(!ids.contains(&"3"));
    assert!(!ids.contains(&"4"));
    assert_eq!(ids[0], "5");

    let queue = engine.queue_mut();
    let order: Vec<String> = std::iter::from_fn(|| queue.extract_max())
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(order, vec!["2", "5", "1", "7"]);
}

#[test]
fn test_engine_from_settings() {
    let settings =
        Settings::from_toml_str("[index]\nbucket_count = 53\n[matching]\nmax_edit_distance = 1\n")
            .unwrap();
    let engine = RecordEngine::from_settings(&settings).unwrap();

    assert_eq!(engine.detector().stats().email.bucket_count, 53);
    assert_eq!(engine.detector().max_edit_distance(), 1);
}

#[test]
fn test_name_variants_collide() {
    let mut detector = DuplicateDetector::new();
    detector.add_record(Arc::new(Record::new().with_id("base").with_name("John", "Doe")));

    for (first, last) in [("JOHN", "DOE"), ("  john", "doe  "), ("John", "Doe")] {
        let report = detector.check_duplicate(&Arc::new(Record::new().with_name(first, last)));
        assert_eq!(report.match_type(), Some(MatchType::Name), "{} {} should collide", first, last);
        assert!(!report.is_duplicate, "Name collisions are advisory");
    }
}

#[test]
fn test_similar_after_removal() {
    let mut detector = DuplicateDetector::new();
    let jon = Arc::new(
        Record::new()
            .with_id("jon")
            .with_name("Jon", "Doe")
            .with_email("jon@x.com"),
    );
    detector.add_record(jon.clone());
    detector.add_record(Arc::new(Record::new().with_id("johnny").with_name("Johnny", "Doe")));

    let query = Arc::new(Record::new().with_name("John", "Doe"));
    let similar = detector.find_similar(&query);
    assert_eq!(similar.len(), 2);
    assert_eq!(similar[0].candidate.id, "jon");

    detector.remove_record(&jon);
    let similar = detector.find_similar(&query);
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0].candidate.id, "johnny");
    assert_eq!(similar[0].distance, 2);
    assert!(!detector.check_duplicate(&jon).is_duplicate);
}

#[test]
fn test_records_round_trip_json() {
    let json = r#"[
        {"id": "a", "firstName": "Ada", "lastName": "Lovelace", "email": "ada@x.com",
         "score": 4.9, "priority": 3},
        {"id": "b", "firstName": "Ada", "lastName": "Lovelace", "email": "ADA@X.COM"}
    ]"#;
    let records: Vec<Record> = serde_json::from_str(json).unwrap();

    let mut engine = RecordEngine::new();
    let first = engine.ingest(records[0].clone()).unwrap();
    let second = engine.ingest(records[1].clone()).unwrap();

    assert!(first.accepted);
    assert!(!second.accepted);

    let report = serde_json::to_value(&second.report).unwrap();
    assert_eq!(report["isDuplicate"], true);
    assert_eq!(report["emailMatch"]["id"], "a");
}
