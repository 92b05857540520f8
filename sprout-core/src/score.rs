// Heuristic keyword scoring

use crate::model::{CompetitionData, CompetitionLevel, KeywordMetrics, Recommendation};

/// Lexical markers of commercial intent.
pub const COMMERCIAL_TERMS: [&str; 10] = [
    "buy", "price", "cost", "cheap", "best", "review", "tool", "software", "service", "solution",
];

/// Opportunity score in [0, 100], higher is better. Starts at a base of
/// 50 and adds independently bounded contributions for volume,
/// competition, trend direction, specificity, and commercial intent.
pub fn opportunity_score(metrics: &KeywordMetrics) -> f64 {
    let mut score = 50.0;

    // Volume tier (0-30). A known volume of zero is still "known" and
    // earns the floor bonus.
    if let Some(volume) = metrics.search_volume {
        score += match volume {
            v if v > 10_000 => 30.0,
            v if v > 5_000 => 25.0,
            v if v > 1_000 => 20.0,
            v if v > 500 => 15.0,
            v if v > 100 => 10.0,
            _ => 5.0,
        };
    }

    // Competition (0-25), inverted: weaker competition is worth more.
    if let Some(ref competition) = metrics.competition {
        score += (1.0 - competition.score()) * 25.0;
    }

    // Trend direction scaled to +/-20.
    if let Some(ref seasonal) = metrics.seasonal_trend {
        score += trend_direction(seasonal) * 20.0;
    }

    // Specificity (0-15): long-tail phrases target better.
    score += match word_count(&metrics.keyword) {
        n if n >= 4 => 15.0,
        3 => 10.0,
        2 => 5.0,
        _ => 0.0,
    };

    // Commercial intent (0 or 10).
    let lowered = metrics.keyword.to_lowercase();
    if COMMERCIAL_TERMS.iter().any(|term| lowered.contains(term)) {
        score += 10.0;
    }

    score.clamp(0.0, 100.0)
}

/// Difficulty score in [0, 100], higher is harder to rank for.
pub fn difficulty_score(metrics: &KeywordMetrics) -> f64 {
    let mut score = 50.0;

    if let Some(ref competition) = metrics.competition {
        score += competition.score() * 40.0;
    }

    // High-volume phrases attract more contenders.
    if let Some(volume) = metrics.search_volume {
        score += match volume {
            v if v > 50_000 => 30.0,
            v if v > 10_000 => 20.0,
            v if v > 5_000 => 10.0,
            v if v > 1_000 => 5.0,
            _ => 0.0,
        };
    }

    // Head terms are harder, long-tail phrases easier.
    score += match word_count(&metrics.keyword) {
        1 => 20.0,
        2 => 10.0,
        n if n >= 4 => -10.0,
        _ => 0.0,
    };

    score.clamp(0.0, 100.0)
}

/// Direction of a seasonal series in [-1, 1]: the last three samples
/// compared against the first three. Fewer than three samples, or a zero
/// early-period mean, reads as flat.
pub fn trend_direction(samples: &[f64]) -> f64 {
    if samples.len() < 3 {
        return 0.0;
    }

    let early = mean(&samples[..3]);
    let recent = mean(&samples[samples.len() - 3..]);

    if early == 0.0 {
        return 0.0;
    }

    ((recent - early) / early).clamp(-1.0, 1.0)
}

/// Shape-based competition estimate for when no measured figures are
/// available: longer, more specific phrases are assumed to face weaker
/// competition. Always tagged `Estimated`.
pub fn estimate_competition(keyword: &str) -> CompetitionData {
    let words = word_count(keyword);
    let chars = keyword.chars().count();

    if words >= 4 || chars >= 25 {
        CompetitionData::Estimated {
            level: CompetitionLevel::Low,
            score: 0.3,
        }
    } else if words >= 3 || chars >= 15 {
        CompetitionData::Estimated {
            level: CompetitionLevel::Medium,
            score: 0.5,
        }
    } else {
        CompetitionData::Estimated {
            level: CompetitionLevel::High,
            score: 0.8,
        }
    }
}

/// Map opportunity and difficulty to a priority bucket. Total over its
/// inputs; only an unknown opportunity yields `InsufficientData`, and an
/// unknown difficulty reads as the 50 baseline.
///
/// The difficulty cutoffs differ per opportunity bracket (the middle
/// bracket cuts at 40, not 60), so this stays a nested decision tree.
pub fn recommend(opportunity: Option<f64>, difficulty: Option<f64>) -> Recommendation {
    let Some(opportunity) = opportunity else {
        return Recommendation::InsufficientData;
    };
    let difficulty = difficulty.unwrap_or(50.0);

    if opportunity >= 80.0 {
        if difficulty <= 30.0 {
            Recommendation::HighPriority
        } else if difficulty <= 60.0 {
            Recommendation::MediumPriority
        } else {
            Recommendation::LongTerm
        }
    } else if opportunity >= 60.0 {
        if difficulty <= 40.0 {
            Recommendation::MediumPriority
        } else {
            Recommendation::Consider
        }
    } else if opportunity >= 40.0 {
        if difficulty <= 30.0 {
            Recommendation::Consider
        } else {
            Recommendation::LowPriority
        }
    } else {
        Recommendation::Avoid
    }
}

/// Derive the three scores in place from whatever signals were resolved.
pub fn apply_scores(metrics: &mut KeywordMetrics) {
    let opportunity = opportunity_score(metrics);
    let difficulty = difficulty_score(metrics);
    metrics.opportunity_score = Some(opportunity);
    metrics.difficulty_score = Some(difficulty);
    metrics.recommendation = recommend(Some(opportunity), Some(difficulty));
}

fn word_count(keyword: &str) -> usize {
    keyword.split_whitespace().count()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
