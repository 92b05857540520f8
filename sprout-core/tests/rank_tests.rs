// Tests for filtering, deduplication, and ranking

use sprout_core::model::{KeywordMetrics, KeywordRecord, KeywordSource, Recommendation};
use sprout_core::rank::{
    dedup_records, filter_records, normalized, rank_metrics, rank_records, top_recommendations,
    KeywordFilter,
};

fn record(keyword: &str, trend_score: Option<f64>) -> KeywordRecord {
    let mut record = KeywordRecord::new(keyword, KeywordSource::Autocomplete);
    record.trend_score = trend_score;
    record
}

fn scored(keyword: &str, opportunity: Option<f64>, recommendation: Recommendation) -> KeywordMetrics {
    let mut metrics = KeywordMetrics::new(keyword);
    metrics.opportunity_score = opportunity;
    metrics.recommendation = recommendation;
    metrics
}

// ============================================================================
// Normalization Tests
// ============================================================================

#[test]
fn test_normalized_folds_case_and_trims() {
    assert_eq!(normalized("  Crypto Jobs  "), "crypto jobs");
    assert_eq!(normalized("CRYPTO JOBS"), "crypto jobs");
}

// ============================================================================
// Filter Tests
// ============================================================================

#[test]
fn test_filter_inactive_by_default() {
    assert!(!KeywordFilter::default().is_active());
    assert!(KeywordFilter {
        min_length: Some(3),
        ..Default::default()
    }
    .is_active());
}

#[test]
fn test_filter_min_and_max_length() {
    let filter = KeywordFilter {
        min_length: Some(5),
        max_length: Some(10),
        phrase_match: None,
    };

    assert!(!filter.accepts("tiny"));
    assert!(filter.accepts("midsize"));
    assert!(!filter.accepts("far too long phrase"));
}

#[test]
fn test_filter_phrase_match_is_case_insensitive() {
    let filter = KeywordFilter {
        min_length: None,
        max_length: None,
        phrase_match: Some("CRM".to_string()),
    };

    assert!(filter.accepts("best crm software"));
    assert!(!filter.accepts("best erp software"));
}

#[test]
fn test_filter_predicates_combine_with_and() {
    let filter = KeywordFilter {
        min_length: Some(5),
        max_length: None,
        phrase_match: Some("crm".to_string()),
    };

    let records = vec![
        record("crm", Some(50.0)),              // too short
        record("best crm software", Some(40.0)),
        record("best erp software", Some(90.0)), // no phrase match
    ];

    let kept = filter_records(records, &filter);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].keyword, "best crm software");
}

// ============================================================================
// Deduplication Tests
// ============================================================================

#[test]
fn test_dedup_keeps_highest_trend_score() {
    let records = vec![
        record("Crypto Jobs", Some(30.0)),
        record("crypto jobs", Some(80.0)),
        record("web3 careers", Some(50.0)),
    ];

    let deduped = dedup_records(records);

    assert_eq!(deduped.len(), 2);
    assert_eq!(deduped[0].keyword, "crypto jobs");
    assert_eq!(deduped[0].trend_score, Some(80.0));
    assert_eq!(deduped[1].keyword, "web3 careers");
}

#[test]
fn test_dedup_ties_break_by_first_seen() {
    let records = vec![
        record("Crypto Jobs", Some(50.0)),
        record("crypto jobs  ", Some(50.0)),
    ];

    let deduped = dedup_records(records);

    assert_eq!(deduped.len(), 1);
    assert_eq!(deduped[0].keyword, "Crypto Jobs");
}

#[test]
fn test_dedup_unknown_score_loses_to_known() {
    let records = vec![
        record("crypto jobs", None),
        record("CRYPTO JOBS", Some(1.0)),
    ];

    let deduped = dedup_records(records);

    assert_eq!(deduped.len(), 1);
    assert_eq!(deduped[0].trend_score, Some(1.0));
}

#[test]
fn test_dedup_is_idempotent() {
    let records = vec![
        record("alpha", Some(10.0)),
        record("Alpha", Some(90.0)),
        record("beta", None),
        record("gamma", Some(40.0)),
    ];

    let once = dedup_records(records);
    let twice = dedup_records(once.clone());

    assert_eq!(once.len(), twice.len());
    for (a, b) in once.iter().zip(twice.iter()) {
        assert_eq!(a.keyword, b.keyword);
        assert_eq!(a.trend_score, b.trend_score);
    }
}

// ============================================================================
// Ranking Tests
// ============================================================================

#[test]
fn test_rank_records_descending_unknown_last() {
    let mut records = vec![
        record("unknown", None),
        record("low", Some(10.0)),
        record("high", Some(90.0)),
    ];

    rank_records(&mut records);

    assert_eq!(records[0].keyword, "high");
    assert_eq!(records[1].keyword, "low");
    assert_eq!(records[2].keyword, "unknown");
}

#[test]
fn test_rank_metrics_by_opportunity() {
    let mut metrics = vec![
        scored("unknown", None, Recommendation::InsufficientData),
        scored("good", Some(85.0), Recommendation::HighPriority),
        scored("fair", Some(55.0), Recommendation::Consider),
    ];

    rank_metrics(&mut metrics);

    assert_eq!(metrics[0].keyword, "good");
    assert_eq!(metrics[1].keyword, "fair");
    assert_eq!(metrics[2].keyword, "unknown");
}

#[test]
fn test_top_recommendations_filters_and_truncates() {
    let metrics = vec![
        scored("a", Some(90.0), Recommendation::HighPriority),
        scored("b", Some(80.0), Recommendation::LongTerm),
        scored("c", Some(70.0), Recommendation::MediumPriority),
        scored("d", Some(60.0), Recommendation::Consider),
        scored("e", Some(50.0), Recommendation::Avoid),
    ];

    let top = top_recommendations(&metrics, 2);

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].keyword, "a");
    assert_eq!(top[1].keyword, "c");
}

#[test]
fn test_top_recommendations_smaller_corpus_than_requested() {
    let metrics = vec![scored("a", Some(90.0), Recommendation::HighPriority)];
    assert_eq!(top_recommendations(&metrics, 10).len(), 1);
}
