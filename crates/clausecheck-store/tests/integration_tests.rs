//! Integration tests for clausecheck-store
//!
//! These tests verify the full create/list/get/delete cycle for analysis records.

use chrono::{Duration, TimeZone, Utc};
use clausecheck_domain::traits::AnalysisStore;
use clausecheck_domain::{AnalysisId, AnalysisRecord, Finding, RiskLevel};
use clausecheck_store::{SqliteStore, StoreError};

fn sample_findings() -> Vec<Finding> {
    vec![
        Finding::new(
            "The Company may terminate this agreement at any time.",
            "Unilateral Termination Clause",
            "Only the Company can end the agreement without notice.",
            "Either party may terminate with 30 days written notice.",
            RiskLevel::High,
        ),
        Finding::new(
            "Payment shall be made within 90 days.",
            "Extended Payment Terms",
            "Ninety days is well beyond standard net-30 terms.",
            "Payment shall be made within 30 days of invoice.",
            RiskLevel::Medium,
        ),
    ]
}

fn record_at(filename: &str, seconds: i64) -> AnalysisRecord {
    let mut record = AnalysisRecord::new(filename, sample_findings());
    record.processed_at = Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap();
    record
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_create_and_get_record() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let record = AnalysisRecord::new("contract.pdf", sample_findings());

    store.create(&record).unwrap();

    let retrieved = store.get_by_id(&record.id).unwrap();
    assert_eq!(retrieved, Some(record));
}

#[test]
fn test_finding_order_is_preserved() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let findings: Vec<Finding> = (0..12)
        .map(|i| Finding::new(format!("clause {}", i), "issue", "why", "instead", RiskLevel::Low))
        .collect();
    let record = AnalysisRecord::new("ordered.pdf", findings.clone());
    store.create(&record).unwrap();

    let retrieved = store.get_by_id(&record.id).unwrap().unwrap();
    assert_eq!(retrieved.analysis_results, findings);
}

#[test]
fn test_record_with_no_findings() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let record = AnalysisRecord::new("clean.pdf", Vec::new());

    store.create(&record).unwrap();

    let retrieved = store.get_by_id(&record.id).unwrap().unwrap();
    assert!(retrieved.analysis_results.is_empty());
}

#[test]
fn test_get_missing_record() {
    let store = SqliteStore::new(":memory:").unwrap();
    assert_eq!(store.get_by_id(&AnalysisId::new()).unwrap(), None);
}

#[test]
fn test_duplicate_id_is_rejected_without_side_effects() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let record = AnalysisRecord::new("a.pdf", sample_findings());
    store.create(&record).unwrap();

    let mut clash = AnalysisRecord::new("b.pdf", Vec::new());
    clash.id = record.id;

    let result = store.create(&clash);
    assert!(matches!(result, Err(StoreError::Duplicate(_))));

    let retrieved = store.get_by_id(&record.id).unwrap().unwrap();
    assert_eq!(retrieved.filename, "a.pdf");
    assert_eq!(retrieved.analysis_results.len(), 2);
}

#[test]
fn test_list_recent_newest_first() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let oldest = record_at("oldest.pdf", 0);
    let newest = record_at("newest.pdf", 120);
    let middle = record_at("middle.pdf", 60);

    store.create(&oldest).unwrap();
    store.create(&newest).unwrap();
    store.create(&middle).unwrap();

    let listed = store.list_recent(100).unwrap();
    let names: Vec<&str> = listed.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(names, vec!["newest.pdf", "middle.pdf", "oldest.pdf"]);
    assert_eq!(listed[0].analysis_results.len(), 2);
}

#[test]
fn test_list_recent_respects_limit() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    for i in 0..5 {
        store.create(&record_at(&format!("{}.pdf", i), i)).unwrap();
    }

    let listed = store.list_recent(3).unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].filename, "4.pdf");
    assert_eq!(listed[2].filename, "2.pdf");
}

#[test]
fn test_list_recent_uses_time_not_insertion_order() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let base = Utc::now();
    let mut later = AnalysisRecord::new("later.pdf", Vec::new());
    later.processed_at = base + Duration::seconds(10);
    let mut earlier = AnalysisRecord::new("earlier.pdf", Vec::new());
    earlier.processed_at = base;

    store.create(&later).unwrap();
    store.create(&earlier).unwrap();

    let listed = store.list_recent(10).unwrap();
    assert_eq!(listed[0].filename, "later.pdf");
}

#[test]
fn test_delete_record_once() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let record = AnalysisRecord::new("contract.pdf", sample_findings());
    store.create(&record).unwrap();

    assert_eq!(store.delete_by_id(&record.id).unwrap(), 1);
    assert_eq!(store.get_by_id(&record.id).unwrap(), None);

    // Second delete removes nothing
    assert_eq!(store.delete_by_id(&record.id).unwrap(), 0);
}

#[test]
fn test_delete_only_touches_target() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let keep = AnalysisRecord::new("keep.pdf", sample_findings());
    let gone = AnalysisRecord::new("gone.pdf", sample_findings());
    store.create(&keep).unwrap();
    store.create(&gone).unwrap();

    store.delete_by_id(&gone.id).unwrap();

    let kept = store.get_by_id(&keep.id).unwrap().unwrap();
    assert_eq!(kept.analysis_results.len(), 2);
    assert_eq!(store.list_recent(10).unwrap().len(), 1);
}

#[test]
fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clausecheck.db");

    let record = AnalysisRecord::new("persisted.pdf", sample_findings());
    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.create(&record).unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    assert_eq!(store.get_by_id(&record.id).unwrap(), Some(record));
}
