use crate::error::{HarvestError, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

/// A provider of related-phrase suggestions for a single input phrase.
///
/// Implementations return suggestions in provider order and never include
/// the input phrase itself (compared case-insensitively).
#[allow(async_fn_in_trait)]
pub trait SuggestionSource {
    async fn fetch(&self, phrase: &str) -> Result<Vec<String>>;
}

const SUGGEST_ENDPOINT: &str = "https://suggestqueries.google.com/complete/search";

/// Suggestion provider backed by the public autocomplete endpoint.
///
/// Uses the `firefox` client variant, which answers with a plain JSON
/// array instead of JSONP.
pub struct AutocompleteClient {
    client: Client,
    endpoint: String,
    language: String,
    country: String,
}

impl AutocompleteClient {
    pub fn new(language: &str, country: &str) -> Self {
        Self::with_timeout(language, country, 10)
    }

    pub fn with_timeout(language: &str, country: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("Sprout/0.1 (keyword research toolkit)")
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(timeout_secs / 2))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: SUGGEST_ENDPOINT.to_string(),
            language: language.to_string(),
            country: country.to_string(),
        }
    }

    /// Override the suggestion endpoint. Intended for tests.
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }
}

impl SuggestionSource for AutocompleteClient {
    async fn fetch(&self, phrase: &str) -> Result<Vec<String>> {
        debug!("Fetching suggestions for '{}'", phrase);

        let url = Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "firefox"),
                ("q", phrase),
                ("hl", self.language.as_str()),
                ("gl", self.country.as_str()),
            ],
        )
        .map_err(|e| HarvestError::Parse(format!("Invalid endpoint URL: {}", e)))?;

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body: Value = response.json().await?;

        // The payload is a two-element array; suggestions sit in the second
        // element. Anything else is a malformed response.
        let suggestions = body
            .get(1)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                HarvestError::Parse("suggestion list missing from response".to_string())
            })?;

        let phrase_lower = phrase.to_lowercase();
        let filtered: Vec<String> = suggestions
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| !s.is_empty() && s.to_lowercase() != phrase_lower)
            .map(str::to_string)
            .collect();

        info!("Found {} suggestions for '{}'", filtered.len(), phrase);
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer) -> AutocompleteClient {
        AutocompleteClient::new("en", "US")
            .with_endpoint(format!("{}/complete/search", server.uri()))
    }

    #[tokio::test]
    async fn test_fetch_parses_suggestion_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/complete/search"))
            .and(query_param("client", "firefox"))
            .and(query_param("q", "crypto jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                "crypto jobs",
                ["crypto jobs remote", "crypto jobs salary", "crypto jobs london"]
            ])))
            .mount(&server)
            .await;

        let suggestions = client_for(&server).fetch("crypto jobs").await.unwrap();

        assert_eq!(
            suggestions,
            vec![
                "crypto jobs remote".to_string(),
                "crypto jobs salary".to_string(),
                "crypto jobs london".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_filters_the_input_phrase() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/complete/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                "web3 careers",
                ["Web3 Careers", "web3 careers for beginners", ""]
            ])))
            .mount(&server)
            .await;

        let suggestions = client_for(&server).fetch("web3 careers").await.unwrap();

        // The echoed phrase (any casing) and empty entries are dropped.
        assert_eq!(suggestions, vec!["web3 careers for beginners".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_maps_http_failure_to_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/complete/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch("blockchain").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_rejects_malformed_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/complete/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"weird": true})),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).fetch("blockchain").await;
        assert!(matches!(result, Err(HarvestError::Parse(_))));
    }
}
