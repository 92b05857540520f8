use crate::model::{CompetitionData, CompetitionLevel, KeywordMetrics};
use crate::rank;
use crate::score;
use sprout_harvest::competition::{CompetitionClient, CompetitionFigures};
use sprout_harvest::trends::{TrendSource, YEAR_TIMEFRAME};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

/// Enhanced per-keyword analysis: resolves volume, competition, and
/// seasonal signals for each keyword, then derives the heuristic scores.
///
/// Competition is measured when a credentialed client is configured and
/// estimated from keyword shape otherwise; a failing measured lookup
/// degrades to the estimate instead of failing the run.
pub struct Analyzer<T> {
    trends: T,
    competition: Option<CompetitionClient>,
    region: String,
    pacing: Duration,
}

impl<T: TrendSource> Analyzer<T> {
    pub fn new(trends: T, region: &str) -> Self {
        Self {
            trends,
            competition: None,
            region: region.to_string(),
            pacing: Duration::from_millis(500),
        }
    }

    pub fn with_competition(mut self, client: CompetitionClient) -> Self {
        self.competition = Some(client);
        self
    }

    /// Pause inserted between per-keyword lookups. Zero disables pacing
    /// for tests.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    async fn pace(&self) {
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }
    }

    /// Analyze every keyword and return the metrics sorted by opportunity
    /// score, best first.
    pub async fn analyze(&self, keywords: &[String]) -> Vec<KeywordMetrics> {
        info!("Analyzing {} keywords...", keywords.len());

        // Measured competition arrives in one batch when credentials are
        // configured.
        let measured = match &self.competition {
            Some(client) => match client.competition(keywords, &self.region).await {
                Ok(figures) => figures,
                Err(e) => {
                    warn!(
                        "Measured competition unavailable ({}), falling back to estimates",
                        e
                    );
                    HashMap::new()
                }
            },
            None => HashMap::new(),
        };

        let mut results = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            self.pace().await;

            let mut metrics = KeywordMetrics::new(keyword);

            // Interest over the past year doubles as the volume estimate:
            // the provider's 0-100 scale, spread over a rough thousand
            // searches per point.
            match self.trends.interest(keyword, YEAR_TIMEFRAME, &self.region).await {
                Ok(Some(interest)) => {
                    metrics.trend_score = Some(interest);
                    metrics.search_volume = Some((interest * 1000.0) as u64);
                }
                Ok(None) => {}
                Err(e) => warn!("Interest lookup failed for '{}': {}", keyword, e),
            }

            metrics.competition = Some(match measured.get(keyword.as_str()) {
                Some(figures) => to_competition(figures)
                    .unwrap_or_else(|| score::estimate_competition(keyword)),
                None => score::estimate_competition(keyword),
            });

            match self.trends.seasonal(keyword, &self.region).await {
                Ok(seasonal) => metrics.seasonal_trend = seasonal,
                Err(e) => warn!("Seasonal lookup failed for '{}': {}", keyword, e),
            }

            score::apply_scores(&mut metrics);
            results.push(metrics);
        }

        rank::rank_metrics(&mut results);
        info!("Keyword analysis completed");
        results
    }

    /// Analyze and keep only the actionable buckets, best `top_n`.
    pub async fn top_recommendations(
        &self,
        keywords: &[String],
        top_n: usize,
    ) -> Vec<KeywordMetrics> {
        let metrics = self.analyze(keywords).await;
        rank::top_recommendations(&metrics, top_n)
    }
}

fn to_competition(figures: &CompetitionFigures) -> Option<CompetitionData> {
    let level = CompetitionLevel::from_str(&figures.level)?;
    Some(CompetitionData::Measured {
        level,
        score: figures.score,
        cpc_low: figures.cpc_low,
        cpc_high: figures.cpc_high,
    })
}
