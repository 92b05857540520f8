use crate::error::{HarvestError, Result};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const METRICS_ENDPOINT: &str = "https://trends.googleapis.com/trends/api";

/// Competition figures as reported by the paid metrics endpoint.
#[derive(Debug, Clone)]
pub struct CompetitionFigures {
    /// Raw provider level, usually LOW / MEDIUM / HIGH.
    pub level: String,
    /// Competition index in [0, 1].
    pub score: f64,
    pub cpc_low: Option<f64>,
    pub cpc_high: Option<f64>,
}

/// Client for the credentialed keyword-metrics endpoint. Only built when
/// the caller supplies an API key; without one the scoring layer falls
/// back to its shape-based estimate.
pub struct CompetitionClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CompetitionClient {
    pub fn new(api_key: &str) -> Self {
        let client = Client::builder()
            .user_agent("Sprout/0.1 (keyword research toolkit)")
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: METRICS_ENDPOINT.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Override the API root. Intended for tests.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Fetch measured competition for a batch of phrases. Phrases the
    /// provider does not know are simply absent from the result map.
    pub async fn competition(
        &self,
        phrases: &[String],
        region: &str,
    ) -> Result<HashMap<String, CompetitionFigures>> {
        debug!("Fetching measured competition for {} phrases", phrases.len());

        let url = Url::parse_with_params(
            &format!("{}/competition", self.base_url),
            &[
                ("keywords", phrases.join(",")),
                ("geo", region.to_string()),
                ("key", self.api_key.clone()),
            ],
        )
        .map_err(|e| HarvestError::Parse(format!("Invalid endpoint URL: {}", e)))?;

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body: Value = response.json().await?;

        let entries = body["keywords"]
            .as_array()
            .ok_or_else(|| HarvestError::Parse("keyword list missing from response".to_string()))?;

        let mut results = HashMap::new();
        for entry in entries {
            let Some(keyword) = entry["keyword"].as_str() else {
                continue;
            };
            results.insert(
                keyword.to_string(),
                CompetitionFigures {
                    level: entry["competition"].as_str().unwrap_or("UNKNOWN").to_string(),
                    score: entry["competition_index"].as_f64().unwrap_or(0.5),
                    cpc_low: entry["cpc_low_range"].as_f64(),
                    cpc_high: entry["cpc_high_range"].as_f64(),
                },
            );
        }

        info!("Measured competition resolved for {} phrases", results.len());
        Ok(results)
    }
}
