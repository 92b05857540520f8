use serde::{Deserialize, Serialize};

/// Where a discovered keyword came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum KeywordSource {
    Autocomplete,
    TrendsRelated,
}

impl KeywordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordSource::Autocomplete => "autocomplete",
            KeywordSource::TrendsRelated => "trends_related",
        }
    }
}

/// One discovered keyword with its basic-mode signal. Everything here is
/// transient; nothing survives past the run that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub source: KeywordSource,
    pub trend_score: Option<f64>,
    pub error: Option<String>,
}

impl KeywordRecord {
    pub fn new(keyword: &str, source: KeywordSource) -> Self {
        Self {
            keyword: keyword.to_string(),
            source,
            trend_score: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
}

impl CompetitionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompetitionLevel::Low => "LOW",
            CompetitionLevel::Medium => "MEDIUM",
            CompetitionLevel::High => "HIGH",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LOW" => Some(CompetitionLevel::Low),
            "MEDIUM" => Some(CompetitionLevel::Medium),
            "HIGH" => Some(CompetitionLevel::High),
            _ => None,
        }
    }
}

/// Competition data tagged with its provenance: real figures from the
/// credentialed metrics endpoint, or the shape-based estimate. Consumers
/// that care about the difference match on the variant; consumers that
/// don't use the accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompetitionData {
    Measured {
        level: CompetitionLevel,
        score: f64,
        cpc_low: Option<f64>,
        cpc_high: Option<f64>,
    },
    Estimated {
        level: CompetitionLevel,
        score: f64,
    },
}

impl CompetitionData {
    pub fn level(&self) -> CompetitionLevel {
        match self {
            CompetitionData::Measured { level, .. } => *level,
            CompetitionData::Estimated { level, .. } => *level,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            CompetitionData::Measured { score, .. } => *score,
            CompetitionData::Estimated { score, .. } => *score,
        }
    }

    pub fn cpc_low(&self) -> Option<f64> {
        match self {
            CompetitionData::Measured { cpc_low, .. } => *cpc_low,
            CompetitionData::Estimated { .. } => None,
        }
    }

    pub fn cpc_high(&self) -> Option<f64> {
        match self {
            CompetitionData::Measured { cpc_high, .. } => *cpc_high,
            CompetitionData::Estimated { .. } => None,
        }
    }

    pub fn is_estimated(&self) -> bool {
        matches!(self, CompetitionData::Estimated { .. })
    }

    pub fn provenance(&self) -> &'static str {
        match self {
            CompetitionData::Measured { .. } => "measured",
            CompetitionData::Estimated { .. } => "estimated",
        }
    }
}

/// Priority bucket derived from opportunity and difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Recommendation {
    HighPriority,
    MediumPriority,
    LongTerm,
    Consider,
    LowPriority,
    Avoid,
    InsufficientData,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::HighPriority => "HIGH_PRIORITY",
            Recommendation::MediumPriority => "MEDIUM_PRIORITY",
            Recommendation::LongTerm => "LONG_TERM",
            Recommendation::Consider => "CONSIDER",
            Recommendation::LowPriority => "LOW_PRIORITY",
            Recommendation::Avoid => "AVOID",
            Recommendation::InsufficientData => "INSUFFICIENT_DATA",
        }
    }

    /// Buckets worth surfacing in the recommendation list.
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            Recommendation::HighPriority
                | Recommendation::MediumPriority
                | Recommendation::Consider
        )
    }
}

/// Full per-keyword metrics produced by enhanced analysis. Built once by
/// the scoring pass and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordMetrics {
    pub keyword: String,
    pub search_volume: Option<u64>,
    pub trend_score: Option<f64>,
    pub competition: Option<CompetitionData>,
    pub seasonal_trend: Option<Vec<f64>>,
    pub opportunity_score: Option<f64>,
    pub difficulty_score: Option<f64>,
    pub recommendation: Recommendation,
}

impl KeywordMetrics {
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            search_volume: None,
            trend_score: None,
            competition: None,
            seasonal_trend: None,
            opportunity_score: None,
            difficulty_score: None,
            recommendation: Recommendation::InsufficientData,
        }
    }

    /// Mean of the seasonal series, when one was resolved.
    pub fn seasonal_avg(&self) -> Option<f64> {
        let seasonal = self.seasonal_trend.as_ref()?;
        if seasonal.is_empty() {
            return None;
        }
        Some(seasonal.iter().sum::<f64>() / seasonal.len() as f64)
    }
}
