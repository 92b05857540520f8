// Keyword aggregation: filtering, deduplication, ranking

use crate::model::{KeywordMetrics, KeywordRecord};
use std::collections::HashSet;
use tracing::info;

/// Case-folded, trimmed dedup identity for a keyword.
pub fn normalized(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

/// Caller-supplied keyword predicates, AND-combined. Lengths are in
/// characters, the phrase match is a case-insensitive substring.
#[derive(Debug, Clone, Default)]
pub struct KeywordFilter {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub phrase_match: Option<String>,
}

impl KeywordFilter {
    pub fn is_active(&self) -> bool {
        self.min_length.is_some() || self.max_length.is_some() || self.phrase_match.is_some()
    }

    pub fn accepts(&self, keyword: &str) -> bool {
        let length = keyword.chars().count();

        if let Some(min) = self.min_length
            && length < min
        {
            return false;
        }
        if let Some(max) = self.max_length
            && length > max
        {
            return false;
        }
        if let Some(ref phrase) = self.phrase_match
            && !keyword.to_lowercase().contains(&phrase.to_lowercase())
        {
            return false;
        }

        true
    }
}

/// Drop records failing any active predicate.
pub fn filter_records(records: Vec<KeywordRecord>, filter: &KeywordFilter) -> Vec<KeywordRecord> {
    let before = records.len();
    let kept: Vec<KeywordRecord> = records
        .into_iter()
        .filter(|record| filter.accepts(&record.keyword))
        .collect();

    info!("Filtered to {} keywords from {}", kept.len(), before);
    kept
}

/// Keep one record per case-folded, trimmed form: the one with the
/// highest known trend score, first-seen order breaking ties. The stable
/// sort puts the survivors in trend order, which is also the basic-mode
/// ranking, so running this twice is a no-op.
pub fn dedup_records(records: Vec<KeywordRecord>) -> Vec<KeywordRecord> {
    let before = records.len();

    let mut sorted = records;
    sorted.sort_by(|a, b| sort_key(b.trend_score).total_cmp(&sort_key(a.trend_score)));

    let mut seen: HashSet<String> = HashSet::new();
    let deduped: Vec<KeywordRecord> = sorted
        .into_iter()
        .filter(|record| seen.insert(normalized(&record.keyword)))
        .collect();

    info!("Deduplicated to {} keywords from {}", deduped.len(), before);
    deduped
}

/// Basic corpus ranking: trend score descending, unknown scores last.
pub fn rank_records(records: &mut [KeywordRecord]) {
    records.sort_by(|a, b| sort_key(b.trend_score).total_cmp(&sort_key(a.trend_score)));
}

/// Scored corpus ranking: opportunity descending, unknown scores last.
pub fn rank_metrics(metrics: &mut [KeywordMetrics]) {
    metrics.sort_by(|a, b| sort_key(b.opportunity_score).total_cmp(&sort_key(a.opportunity_score)));
}

/// Ranked metrics restricted to actionable buckets, truncated to `top_n`.
pub fn top_recommendations(metrics: &[KeywordMetrics], top_n: usize) -> Vec<KeywordMetrics> {
    metrics
        .iter()
        .filter(|m| m.recommendation.is_actionable())
        .take(top_n)
        .cloned()
        .collect()
}

fn sort_key(score: Option<f64>) -> f64 {
    score.unwrap_or(f64::NEG_INFINITY)
}
