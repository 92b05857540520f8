use crate::suggest::SuggestionSource;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub type ProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Question and commercial-intent prefixes used for variation generation
/// when the caller configures none.
pub const DEFAULT_PREFIXES: [&str; 7] =
    ["what is", "how to", "best", "top", "free", "cheap", "online"];

/// Job and commerce-oriented suffixes used for variation generation when
/// the caller configures none.
pub const DEFAULT_SUFFIXES: [&str; 13] = [
    "jobs",
    "career",
    "salary",
    "course",
    "training",
    "certification",
    "skills",
    "tools",
    "software",
    "companies",
    "remote",
    "2024",
    "2025",
];

/// Drives seed phrases through a [`SuggestionSource`] to build a candidate
/// keyword list.
///
/// Three mutually exclusive strategies: a plain one-level fetch per seed,
/// depth-bounded breadth-first expansion, and prefix/suffix variation
/// generation. All of them skip failing phrases instead of aborting, and
/// all of them preserve first-discovery order so downstream tie-breaks
/// are well-defined.
pub struct Explorer<S> {
    source: S,
    max_depth: usize,
    max_per_seed: usize,
    pacing: Duration,
    prefixes: Vec<String>,
    suffixes: Vec<String>,
    progress_callback: Option<ProgressCallback>,
}

impl<S: SuggestionSource> Explorer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_depth: 2,
            max_per_seed: 5,
            pacing: Duration::from_millis(500),
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            progress_callback: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_max_per_seed(mut self, limit: usize) -> Self {
        self.max_per_seed = limit;
        self
    }

    /// Pause inserted before each provider call. Zero disables pacing,
    /// which tests rely on.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.prefixes = prefixes;
        self
    }

    pub fn with_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.suffixes = suffixes;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    async fn pace(&self) {
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }
    }

    fn report(&self, phrase: &str) {
        if let Some(ref callback) = self.progress_callback {
            callback(phrase.to_string());
        }
    }

    /// Plain one-level fetch: one provider call per seed, all suggestions
    /// unioned. A failing seed is logged and skipped.
    pub async fn expand_once(&self, seeds: &[String]) -> Vec<String> {
        let mut results = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for seed in seeds {
            let seed = seed.trim();
            self.report(seed);
            self.pace().await;

            match self.source.fetch(seed).await {
                Ok(suggestions) => {
                    for suggestion in suggestions {
                        if seen.insert(suggestion.clone()) {
                            results.push(suggestion);
                        }
                    }
                }
                Err(e) => {
                    warn!("Suggestion fetch failed for '{}': {}", seed, e);
                }
            }
        }

        info!("Collected {} suggestions from {} seeds", results.len(), seeds.len());
        results
    }

    /// Depth-bounded breadth-first expansion.
    ///
    /// A FIFO queue of `(phrase, depth)` starts at the trimmed seeds with
    /// depth 0. Each popped phrase is dropped if already processed or at
    /// the depth bound, otherwise it joins the result list and its first
    /// `max_per_seed` suggestions are taken in provider order; a
    /// suggestion is enqueued at `depth + 1` only while `depth + 1 <
    /// max_depth`. The processed set holds exact trimmed phrases, so the
    /// queue drains in finitely many steps for any branching factor.
    pub async fn expand_recursive(&self, seeds: &[String]) -> Vec<String> {
        let mut queue: VecDeque<(String, usize)> = seeds
            .iter()
            .map(|seed| (seed.trim().to_string(), 0))
            .collect();
        let mut processed: HashSet<String> = HashSet::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut results: Vec<String> = Vec::new();

        while let Some((phrase, depth)) = queue.pop_front() {
            if processed.contains(&phrase) || depth >= self.max_depth {
                continue;
            }

            processed.insert(phrase.clone());
            if seen.insert(phrase.clone()) {
                results.push(phrase.clone());
            }

            self.report(&phrase);
            self.pace().await;

            let suggestions = match self.source.fetch(&phrase).await {
                Ok(suggestions) => suggestions,
                Err(e) => {
                    warn!("Suggestion fetch failed for '{}': {}", phrase, e);
                    continue;
                }
            };

            for suggestion in suggestions.into_iter().take(self.max_per_seed) {
                if seen.insert(suggestion.clone()) {
                    results.push(suggestion.clone());
                }
                if !processed.contains(&suggestion) && depth + 1 < self.max_depth {
                    queue.push_back((suggestion, depth + 1));
                }
            }
        }

        info!("Recursive expansion found {} unique keywords", results.len());
        results
    }

    /// Prefix/suffix variation generation: the seed itself plus
    /// `"{prefix} {seed}"` and `"{seed} {suffix}"` candidates, each sent
    /// through the provider once. No recursion. A failing candidate is
    /// logged and skipped.
    pub async fn expand_variations(&self, seed: &str) -> Vec<String> {
        let seed = seed.trim();

        let mut candidates =
            Vec::with_capacity(1 + self.prefixes.len() + self.suffixes.len());
        candidates.push(seed.to_string());
        for prefix in &self.prefixes {
            candidates.push(format!("{} {}", prefix, seed));
        }
        for suffix in &self.suffixes {
            candidates.push(format!("{} {}", seed, suffix));
        }

        let mut results = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for candidate in candidates {
            self.report(&candidate);
            self.pace().await;

            match self.source.fetch(&candidate).await {
                Ok(suggestions) => {
                    for suggestion in suggestions {
                        if seen.insert(suggestion.clone()) {
                            results.push(suggestion);
                        }
                    }
                }
                Err(e) => {
                    warn!("Suggestion fetch failed for '{}': {}", candidate, e);
                }
            }
        }

        info!("Found {} variations for '{}'", results.len(), seed);
        results
    }
}
