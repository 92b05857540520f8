use crate::model::{KeywordRecord, KeywordSource};
use crate::rank::{self, KeywordFilter};
use indicatif::{ProgressBar, ProgressStyle};
use sprout_harvest::explorer::Explorer;
use sprout_harvest::suggest::SuggestionSource;
use sprout_harvest::trends::{TrendSource, SHORT_TIMEFRAME};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// How seed phrases are expanded into candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpansionStrategy {
    /// One suggestion lookup per seed.
    Plain,
    /// Depth-bounded breadth-first expansion.
    Recursive,
    /// Prefix/suffix variation generation per seed.
    Variations,
}

/// Options for one discovery run.
pub struct DiscoveryOptions {
    pub seeds: Vec<String>,
    pub strategy: ExpansionStrategy,
    pub max_depth: usize,
    pub max_per_seed: usize,
    pub region: String,
    pub filter: KeywordFilter,
    pub dedup: bool,
    pub pacing: Duration,
    pub show_progress_bars: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            strategy: ExpansionStrategy::Plain,
            max_depth: 2,
            max_per_seed: 5,
            region: "US".to_string(),
            filter: KeywordFilter::default(),
            dedup: true,
            pacing: Duration::from_millis(500),
            show_progress_bars: false,
        }
    }
}

/// Callback for run-level status lines.
pub type DiscoveryProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Number of discovered keywords probed for related queries, and the
/// number of related queries kept per probe.
const RELATED_PROBES: usize = 3;
const RELATED_PER_PROBE: usize = 5;

/// Execute a discovery run: expand the seeds, enrich with trend scores,
/// widen with related queries, filter, deduplicate, rank.
///
/// The seeds themselves are always part of the discovered set, so a run
/// whose every expansion fails still reports them. The only error is an
/// empty seed list.
pub async fn execute_discovery<S, T>(
    options: DiscoveryOptions,
    suggestions: S,
    trends: &T,
    progress_callback: Option<DiscoveryProgressCallback>,
) -> Result<Vec<KeywordRecord>, String>
where
    S: SuggestionSource,
    T: TrendSource,
{
    let DiscoveryOptions {
        seeds,
        strategy,
        max_depth,
        max_per_seed,
        region,
        filter,
        dedup,
        pacing,
        show_progress_bars,
    } = options;

    if seeds.is_empty() {
        return Err("No seed keywords provided".to_string());
    }

    // Single spinner for overall progress (only if enabled)
    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Expanding seeds...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let queried_count = Arc::new(std::sync::atomic::AtomicUsize::new(0));

    let internal_progress: sprout_harvest::explorer::ProgressCallback = if show_progress_bars {
        let pb_clone = progress_bar.clone().unwrap();
        let count_clone = queried_count.clone();
        Arc::new(move |phrase: String| {
            let count = count_clone.fetch_add(1, std::sync::atomic::Ordering::Relaxed) + 1;
            pb_clone.set_message(format!("Expanding... {} phrases queried ({})", count, phrase));
            pb_clone.tick();
        })
    } else {
        Arc::new(|_phrase: String| {})
    };

    let explorer = Explorer::new(suggestions)
        .with_max_depth(max_depth)
        .with_max_per_seed(max_per_seed)
        .with_pacing(pacing)
        .with_progress_callback(internal_progress);

    let mut keywords: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for seed in &seeds {
        let trimmed = seed.trim().to_string();
        if seen.insert(trimmed.clone()) {
            keywords.push(trimmed);
        }
    }

    match strategy {
        ExpansionStrategy::Plain => {
            for keyword in explorer.expand_once(&seeds).await {
                if seen.insert(keyword.clone()) {
                    keywords.push(keyword);
                }
            }
        }
        ExpansionStrategy::Recursive => {
            for keyword in explorer.expand_recursive(&seeds).await {
                if seen.insert(keyword.clone()) {
                    keywords.push(keyword);
                }
            }
        }
        ExpansionStrategy::Variations => {
            for (idx, seed) in seeds.iter().enumerate() {
                if let Some(ref callback) = progress_callback
                    && seeds.len() > 1
                {
                    callback(format!(
                        "Expanding variations for seed {}/{}: {}",
                        idx + 1,
                        seeds.len(),
                        seed
                    ));
                }
                for keyword in explorer.expand_variations(seed).await {
                    if seen.insert(keyword.clone()) {
                        keywords.push(keyword);
                    }
                }
            }
        }
    }

    info!(
        "Collected {} unique keywords from {} seeds",
        keywords.len(),
        seeds.len()
    );

    if let Some(ref pb) = progress_bar {
        pb.set_message(format!("Fetching trends for {} keywords...", keywords.len()));
    }

    // Trend enrichment for the whole discovered set. A failed chunk
    // leaves its keywords unknown; the records survive regardless.
    let trend_scores = trends
        .batch_interest(&keywords, SHORT_TIMEFRAME, &region)
        .await;

    let mut records: Vec<KeywordRecord> = keywords
        .iter()
        .map(|keyword| {
            let mut record = KeywordRecord::new(keyword, KeywordSource::Autocomplete);
            record.trend_score = trend_scores.get(keyword).copied().flatten();
            record
        })
        .collect();

    // Related queries for the first few keywords widen the net a little.
    let mut related_phrases: Vec<String> = Vec::new();
    for keyword in keywords.iter().take(RELATED_PROBES) {
        match trends.related(keyword, SHORT_TIMEFRAME, &region).await {
            Ok(related) => {
                related_phrases.extend(related.into_iter().take(RELATED_PER_PROBE));
            }
            Err(e) => {
                warn!("Related query lookup failed for '{}': {}", keyword, e);
            }
        }
    }
    related_phrases.retain(|phrase| seen.insert(phrase.clone()));

    if !related_phrases.is_empty() {
        info!(
            "Found {} related keywords from trends",
            related_phrases.len()
        );
        let related_scores = trends
            .batch_interest(&related_phrases, SHORT_TIMEFRAME, &region)
            .await;
        for phrase in related_phrases {
            let mut record = KeywordRecord::new(&phrase, KeywordSource::TrendsRelated);
            record.trend_score = related_scores.get(&phrase).copied().flatten();
            records.push(record);
        }
    }

    if filter.is_active() {
        records = rank::filter_records(records, &filter);
    }

    if dedup {
        records = rank::dedup_records(records);
    } else {
        rank::rank_records(&mut records);
    }

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!("Discovery complete! {} keywords", records.len()));
    }

    Ok(records)
}
