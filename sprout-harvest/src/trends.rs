use crate::error::{HarvestError, Result};
use chrono::{DateTime, Datelike};
use reqwest::Client;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

/// Largest number of phrases the interest endpoint compares in one request.
pub const BATCH_LIMIT: usize = 5;

/// Timeframe used for scalar interest lookups.
pub const SHORT_TIMEFRAME: &str = "today 1-m";

/// Timeframe used for seasonal series and volume estimation.
pub const YEAR_TIMEFRAME: &str = "today 12-m";

/// A provider of relative search-popularity data.
///
/// All scores are on the provider's 0-100 interest scale. "No data" is a
/// valid answer and comes back as `None`, never as an error.
#[allow(async_fn_in_trait)]
pub trait TrendSource {
    /// Scalar popularity for one phrase over the given timeframe.
    async fn interest(&self, phrase: &str, timeframe: &str, region: &str)
        -> Result<Option<f64>>;

    /// Popularity for many phrases, chunked to the provider batch limit.
    /// A failed chunk maps every phrase in it to `None`; remaining chunks
    /// still run.
    async fn batch_interest(
        &self,
        phrases: &[String],
        timeframe: &str,
        region: &str,
    ) -> HashMap<String, Option<f64>>;

    /// Monthly interest means over the past year.
    async fn seasonal(&self, phrase: &str, region: &str) -> Result<Option<Vec<f64>>>;

    /// Related queries, top results before rising ones, deduplicated,
    /// the input phrase excluded.
    async fn related(&self, phrase: &str, timeframe: &str, region: &str) -> Result<Vec<String>>;
}

const TRENDS_ENDPOINT: &str = "https://trends.google.com/trends/api";

/// Trend provider backed by the unofficial trends widget API.
///
/// Every lookup is two requests: `explore` hands out per-widget tokens,
/// then `widgetdata/*` serves the actual series. Responses carry an
/// anti-XSSI prefix that must be stripped before JSON parsing.
pub struct InterestClient {
    client: Client,
    base_url: String,
    language: String,
    timezone: i32,
    pacing: Duration,
}

struct TimelinePoint {
    time: i64,
    values: Vec<f64>,
}

impl InterestClient {
    pub fn new(language: &str) -> Self {
        let client = Client::builder()
            .user_agent("Sprout/0.1 (keyword research toolkit)")
            .timeout(Duration::from_secs(30))
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: TRENDS_ENDPOINT.to_string(),
            language: language.to_string(),
            timezone: 360,
            pacing: Duration::from_secs(1),
        }
    }

    /// Override the API root. Intended for tests.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Pause inserted before each `explore` round-trip. The provider
    /// throttles aggressively; zero disables pacing for tests.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    async fn pace(&self) {
        if !self.pacing.is_zero() {
            sleep(self.pacing).await;
        }
    }

    async fn fetch_api(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = Url::parse_with_params(&format!("{}/{}", self.base_url, path), params)
            .map_err(|e| HarvestError::Parse(format!("Invalid endpoint URL: {}", e)))?;

        let response = self.client.get(url).send().await?.error_for_status()?;
        let text = response.text().await?;

        serde_json::from_str(strip_antixssi_prefix(&text))
            .map_err(|e| HarvestError::Parse(format!("Invalid JSON payload: {}", e)))
    }

    async fn explore(&self, phrases: &[String], timeframe: &str, region: &str) -> Result<Value> {
        let items: Vec<Value> = phrases
            .iter()
            .map(|phrase| json!({ "keyword": phrase, "geo": region, "time": timeframe }))
            .collect();
        let request = json!({ "comparisonItem": items, "category": 0, "property": "" });

        self.pace().await;
        self.fetch_api(
            "explore",
            &[
                ("hl", self.language.clone()),
                ("tz", self.timezone.to_string()),
                ("req", request.to_string()),
            ],
        )
        .await
    }

    async fn widget_data(&self, path: &str, widget: &Value) -> Result<Value> {
        let token = widget["token"]
            .as_str()
            .ok_or_else(|| HarvestError::Parse("widget token missing".to_string()))?;
        let request = widget
            .get("request")
            .ok_or_else(|| HarvestError::Parse("widget request missing".to_string()))?;

        self.fetch_api(
            path,
            &[
                ("hl", self.language.clone()),
                ("tz", self.timezone.to_string()),
                ("req", request.to_string()),
                ("token", token.to_string()),
            ],
        )
        .await
    }

    /// Interest-over-time rows for up to [`BATCH_LIMIT`] phrases; each row
    /// carries one value per requested phrase, in request order.
    async fn timeline(
        &self,
        phrases: &[String],
        timeframe: &str,
        region: &str,
    ) -> Result<Vec<TimelinePoint>> {
        debug!("Fetching interest timeline for {:?}", phrases);
        let explore = self.explore(phrases, timeframe, region).await?;
        let widget = find_widget(&explore, "TIMESERIES")?;
        let data = self.widget_data("widgetdata/multiline", widget).await?;
        parse_timeline(&data)
    }
}

impl TrendSource for InterestClient {
    async fn interest(
        &self,
        phrase: &str,
        timeframe: &str,
        region: &str,
    ) -> Result<Option<f64>> {
        let points = self
            .timeline(&[phrase.to_string()], timeframe, region)
            .await?;
        let series = column(&points, 0);

        if series.is_empty() {
            warn!("No interest data for '{}'", phrase);
            return Ok(None);
        }

        // The latest sample can lag behind the period average; report
        // whichever is higher as the more representative signal.
        let latest = series.last().copied().unwrap_or(0.0);
        let score = latest.max(mean(&series));

        info!("Interest for '{}': {:.1}", phrase, score);
        Ok(Some(score))
    }

    async fn batch_interest(
        &self,
        phrases: &[String],
        timeframe: &str,
        region: &str,
    ) -> HashMap<String, Option<f64>> {
        let mut results = HashMap::new();

        for (index, chunk) in phrases.chunks(BATCH_LIMIT).enumerate() {
            info!(
                "Processing interest chunk {} ({} phrases)",
                index + 1,
                chunk.len()
            );

            match self.timeline(chunk, timeframe, region).await {
                Ok(points) => {
                    for (i, phrase) in chunk.iter().enumerate() {
                        let series = column(&points, i);
                        let score = if series.is_empty() {
                            None
                        } else {
                            Some(mean(&series))
                        };
                        results.insert(phrase.clone(), score);
                    }
                }
                Err(e) => {
                    warn!(
                        "Interest chunk failed ({}), marking {} phrases unknown",
                        e,
                        chunk.len()
                    );
                    for phrase in chunk {
                        results.insert(phrase.clone(), None);
                    }
                }
            }
        }

        results
    }

    async fn seasonal(&self, phrase: &str, region: &str) -> Result<Option<Vec<f64>>> {
        let points = self
            .timeline(&[phrase.to_string()], YEAR_TIMEFRAME, region)
            .await?;
        let monthly = monthly_means(&points);

        if monthly.is_empty() {
            return Ok(None);
        }
        Ok(Some(monthly))
    }

    async fn related(&self, phrase: &str, timeframe: &str, region: &str) -> Result<Vec<String>> {
        let explore = self
            .explore(&[phrase.to_string()], timeframe, region)
            .await?;
        let widget = find_widget(&explore, "RELATED_QUERIES")?;
        let data = self.widget_data("widgetdata/relatedsearches", widget).await?;

        let ranked = data["default"]["rankedList"]
            .as_array()
            .ok_or_else(|| HarvestError::Parse("related query list missing".to_string()))?;

        let mut queries: Vec<String> = Vec::new();
        if let Some(top) = ranked.first() {
            queries.extend(ranked_queries(top, 10));
        }
        if let Some(rising) = ranked.get(1) {
            queries.extend(ranked_queries(rising, 5));
        }

        let phrase_lower = phrase.to_lowercase();
        let mut seen = HashSet::new();
        let unique: Vec<String> = queries
            .into_iter()
            .filter(|q| q.to_lowercase() != phrase_lower && seen.insert(q.to_lowercase()))
            .collect();

        info!("Found {} related queries for '{}'", unique.len(), phrase);
        Ok(unique)
    }
}

/// Widget API bodies open with an anti-XSSI garbage prefix before the
/// actual JSON document.
fn strip_antixssi_prefix(body: &str) -> &str {
    match body.find(|c: char| c == '{' || c == '[') {
        Some(start) => &body[start..],
        None => body,
    }
}

fn find_widget<'a>(explore: &'a Value, id: &str) -> Result<&'a Value> {
    explore["widgets"]
        .as_array()
        .and_then(|widgets| widgets.iter().find(|w| w["id"].as_str() == Some(id)))
        .ok_or_else(|| {
            HarvestError::Parse(format!("{} widget missing from explore response", id))
        })
}

fn parse_timeline(data: &Value) -> Result<Vec<TimelinePoint>> {
    let entries = data["default"]["timelineData"]
        .as_array()
        .ok_or_else(|| HarvestError::Parse("timeline data missing".to_string()))?;

    let mut points = Vec::with_capacity(entries.len());
    for entry in entries {
        let time = entry["time"]
            .as_str()
            .and_then(|t| t.parse::<i64>().ok())
            .unwrap_or(0);
        let values = entry["value"]
            .as_array()
            .map(|vs| vs.iter().filter_map(Value::as_f64).collect())
            .unwrap_or_default();
        points.push(TimelinePoint { time, values });
    }
    Ok(points)
}

fn ranked_queries(list: &Value, limit: usize) -> Vec<String> {
    list["rankedKeyword"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e["query"].as_str().map(str::to_string))
                .take(limit)
                .collect()
        })
        .unwrap_or_default()
}

fn column(points: &[TimelinePoint], index: usize) -> Vec<f64> {
    points
        .iter()
        .filter_map(|p| p.values.get(index).copied())
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Collapse a weekly series into per-month means, chronological order.
fn monthly_means(points: &[TimelinePoint]) -> Vec<f64> {
    let mut buckets: Vec<((i32, u32), Vec<f64>)> = Vec::new();

    for point in points {
        let Some(timestamp) = DateTime::from_timestamp(point.time, 0) else {
            continue;
        };
        let Some(&value) = point.values.first() else {
            continue;
        };

        let key = (timestamp.year(), timestamp.month());
        match buckets.last_mut() {
            Some((last_key, values)) if *last_key == key => values.push(value),
            _ => buckets.push((key, vec![value])),
        }
    }

    buckets
        .into_iter()
        .map(|(_, values)| mean(&values))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    const EXPLORE_BODY: &str = concat!(
        ")]}'\n",
        r#"{"widgets":[
            {"id":"TIMESERIES","token":"time-token","request":{"w":1}},
            {"id":"RELATED_QUERIES","token":"related-token","request":{"w":2}}
        ]}"#
    );

    fn client_for(server: &MockServer) -> InterestClient {
        InterestClient::new("en-US")
            .with_base_url(server.uri())
            .with_pacing(Duration::ZERO)
    }

    async fn mount_explore(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/explore"))
            .respond_with(ResponseTemplate::new(200).set_body_string(EXPLORE_BODY))
            .mount(server)
            .await;
    }

    #[test]
    fn test_strip_antixssi_prefix() {
        assert_eq!(strip_antixssi_prefix(")]}'\n{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_antixssi_prefix(")]}',\n[1,2]"), "[1,2]");
        assert_eq!(strip_antixssi_prefix("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_monthly_means_groups_by_calendar_month() {
        // 2024-01-01, 2024-01-08, 2024-02-05
        let points = vec![
            TimelinePoint { time: 1704067200, values: vec![40.0] },
            TimelinePoint { time: 1704672000, values: vec![60.0] },
            TimelinePoint { time: 1707091200, values: vec![90.0] },
        ];

        assert_eq!(monthly_means(&points), vec![50.0, 90.0]);
    }

    #[tokio::test]
    async fn test_interest_takes_max_of_latest_and_mean() {
        let server = MockServer::start().await;
        mount_explore(&server).await;

        Mock::given(method("GET"))
            .and(path("/widgetdata/multiline"))
            .and(query_param("token", "time-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(concat!(
                ")]}',\n",
                r#"{"default":{"timelineData":[
                    {"time":"1704067200","value":[40]},
                    {"time":"1704672000","value":[80]}
                ]}}"#
            )))
            .mount(&server)
            .await;

        let score = client_for(&server)
            .interest("crypto jobs", SHORT_TIMEFRAME, "US")
            .await
            .unwrap();

        // mean is 60, latest is 80
        assert_eq!(score, Some(80.0));
    }

    #[tokio::test]
    async fn test_interest_returns_none_on_empty_timeline() {
        let server = MockServer::start().await;
        mount_explore(&server).await;

        Mock::given(method("GET"))
            .and(path("/widgetdata/multiline"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(")]}',\n{\"default\":{\"timelineData\":[]}}"),
            )
            .mount(&server)
            .await;

        let score = client_for(&server)
            .interest("crypto jobs", SHORT_TIMEFRAME, "US")
            .await
            .unwrap();

        assert_eq!(score, None);
    }

    #[tokio::test]
    async fn test_batch_interest_assigns_columns_in_request_order() {
        let server = MockServer::start().await;
        mount_explore(&server).await;

        Mock::given(method("GET"))
            .and(path("/widgetdata/multiline"))
            .respond_with(ResponseTemplate::new(200).set_body_string(concat!(
                ")]}',\n",
                r#"{"default":{"timelineData":[
                    {"time":"1704067200","value":[10,70]},
                    {"time":"1704672000","value":[30,90]}
                ]}}"#
            )))
            .mount(&server)
            .await;

        let phrases = vec!["first".to_string(), "second".to_string()];
        let scores = client_for(&server)
            .batch_interest(&phrases, SHORT_TIMEFRAME, "US")
            .await;

        assert_eq!(scores.get("first"), Some(&Some(20.0)));
        assert_eq!(scores.get("second"), Some(&Some(80.0)));
    }

    #[tokio::test]
    async fn test_batch_interest_marks_failed_chunk_unknown() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/explore"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let phrases: Vec<String> = (0..7).map(|i| format!("phrase {}", i)).collect();
        let scores = client_for(&server)
            .batch_interest(&phrases, SHORT_TIMEFRAME, "US")
            .await;

        assert_eq!(scores.len(), 7);
        assert!(scores.values().all(|score| score.is_none()));
    }

    #[tokio::test]
    async fn test_related_merges_top_and_rising_without_duplicates() {
        let server = MockServer::start().await;
        mount_explore(&server).await;

        Mock::given(method("GET"))
            .and(path("/widgetdata/relatedsearches"))
            .and(query_param("token", "related-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(concat!(
                ")]}',\n",
                r#"{"default":{"rankedList":[
                    {"rankedKeyword":[
                        {"query":"crypto jobs remote","value":100},
                        {"query":"Crypto Jobs","value":90},
                        {"query":"web3 jobs","value":80}
                    ]},
                    {"rankedKeyword":[
                        {"query":"web3 jobs","value":250},
                        {"query":"defi careers","value":120}
                    ]}
                ]}}"#
            )))
            .mount(&server)
            .await;

        let related = client_for(&server)
            .related("crypto jobs", SHORT_TIMEFRAME, "US")
            .await
            .unwrap();

        // The input phrase is excluded and "web3 jobs" appears once.
        assert_eq!(
            related,
            vec![
                "crypto jobs remote".to_string(),
                "web3 jobs".to_string(),
                "defi careers".to_string(),
            ]
        );
    }
}
