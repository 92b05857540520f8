use clap::ArgMatches;
use colored::Colorize;
use sprout_core::analyze::Analyzer;
use sprout_core::model::{KeywordMetrics, KeywordRecord, Recommendation};
use sprout_core::pipeline::{
    execute_discovery, DiscoveryOptions, DiscoveryProgressCallback, ExpansionStrategy,
};
use sprout_core::rank::KeywordFilter;
use sprout_core::report::{
    generate_basic_csv, generate_basic_text, generate_enhanced_csv, generate_json_report,
    generate_text_report, save_report, ReportData, ReportFormat,
};
use sprout_harvest::competition::CompetitionClient;
use sprout_harvest::suggest::SuggestionSource;
use sprout_harvest::{AutocompleteClient, InterestClient};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

// Helper functions for seed handling

/// Split a comma-separated seed list, dropping blanks.
pub fn parse_seed_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|seed| !seed.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load and parse seeds from a file. Lines are newline or comma
/// separated; blank lines and '#' comments are skipped.
pub fn load_seeds_from_file(path: &Path) -> Result<Vec<String>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read seeds file {}: {}", path.display(), e))?;

    let seeds: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(parse_seed_list)
        .collect();

    if seeds.is_empty() {
        return Err(format!("No seed keywords found in {}", path.display()));
    }

    Ok(seeds)
}

/// Load seeds from either a literal list or a file argument.
pub fn load_seeds_from_source(
    seeds: Option<&String>,
    seeds_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    if let Some(path) = seeds_file {
        load_seeds_from_file(path)
    } else if let Some(list) = seeds {
        let parsed = parse_seed_list(list);
        if parsed.is_empty() {
            return Err("No seed keywords provided".to_string());
        }
        Ok(parsed)
    } else {
        Err("Either --seeds or --seeds-file must be provided".to_string())
    }
}

/// Derive the enhanced-analysis output path from the basic one.
pub fn enhanced_output_path(output: &str) -> String {
    match output.strip_suffix(".csv") {
        Some(stem) => format!("{}_enhanced.csv", stem),
        None => format!("{}_enhanced", output),
    }
}

/// Derive the companion text report path from the output path.
pub fn report_output_path(output: &str) -> String {
    match output.strip_suffix(".csv") {
        Some(stem) => format!("{}_report.txt", stem),
        None => format!("{}_report.txt", output),
    }
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

fn resolve_seeds(sub_matches: &ArgMatches) -> Vec<String> {
    let seeds_arg = sub_matches.get_one::<String>("seeds");
    let file_arg = sub_matches
        .get_one::<String>("seeds-file")
        .map(|raw| expand_path(raw));

    match load_seeds_from_source(seeds_arg, file_arg.as_ref()) {
        Ok(seeds) => seeds,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

fn write_or_exit(content: &str, path: &Path) {
    if let Err(e) = save_report(content, path) {
        eprintln!("✗ Failed to write {}: {}", path.display(), e);
        std::process::exit(1);
    }
}

pub async fn handle_discover(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let seeds = resolve_seeds(sub_matches);

    let recursive = sub_matches.get_flag("recursive");
    let variations = sub_matches.get_flag("variations");
    let strategy = if recursive {
        ExpansionStrategy::Recursive
    } else if variations {
        ExpansionStrategy::Variations
    } else {
        ExpansionStrategy::Plain
    };

    let max_depth = *sub_matches.get_one::<usize>("max-depth").unwrap_or(&2);
    let max_per_seed = *sub_matches.get_one::<usize>("max-per-seed").unwrap_or(&5);
    let language = sub_matches
        .get_one::<String>("language")
        .cloned()
        .unwrap_or_else(|| "en".to_string());
    let country = sub_matches
        .get_one::<String>("country")
        .cloned()
        .unwrap_or_else(|| "US".to_string());
    let geo = sub_matches
        .get_one::<String>("geo")
        .cloned()
        .unwrap_or_else(|| "US".to_string());
    let top_n = *sub_matches.get_one::<usize>("top").unwrap_or(&10);
    let analyze = sub_matches.get_flag("analyze");
    let api_key = sub_matches.get_one::<String>("api-key").cloned();
    let write_report = sub_matches.get_flag("report");
    let output = sub_matches
        .get_one::<String>("output")
        .cloned()
        .unwrap_or_else(|| "keyword_analysis.csv".to_string());
    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Csv);

    let filter = KeywordFilter {
        min_length: sub_matches.get_one::<usize>("min-length").copied(),
        max_length: sub_matches.get_one::<usize>("max-length").copied(),
        phrase_match: sub_matches.get_one::<String>("phrase-match").cloned(),
    };
    let dedup = !sub_matches.get_flag("no-dedup");

    println!("\n🌱 Discovering keywords from {} seed(s)", seeds.len());
    let strategy_str = match strategy {
        ExpansionStrategy::Recursive => "recursive expansion",
        ExpansionStrategy::Variations => "prefix/suffix variations",
        ExpansionStrategy::Plain => "plain suggestion fetch",
    };
    println!("Strategy: {}", strategy_str);
    if strategy == ExpansionStrategy::Recursive {
        println!("Max depth: {}", max_depth);
    }
    println!("Region: {}\n", geo);

    let suggestions = AutocompleteClient::new(&language, &country);
    let trends = InterestClient::new(&format!("{}-{}", language, country));

    let options = DiscoveryOptions {
        seeds: seeds.clone(),
        strategy,
        max_depth,
        max_per_seed,
        region: geo.clone(),
        filter,
        dedup,
        pacing: Duration::from_millis(500),
        show_progress_bars: true,
    };

    let progress_callback: DiscoveryProgressCallback = Arc::new(|msg: String| {
        println!("{}", msg);
    });

    let records =
        match execute_discovery(options, suggestions, &trends, Some(progress_callback)).await {
            Ok(records) => records,
            Err(e) => {
                eprintln!("✗ Discovery failed: {}", e);
                std::process::exit(1);
            }
        };

    println!(
        "\n{} Discovered {} keywords\n",
        "✓".green().bold(),
        records.len()
    );

    // Enhanced analysis needs credentials; without them the run is
    // reported and degrades to the basic export.
    let mut metrics: Option<Vec<KeywordMetrics>> = None;
    if analyze {
        match api_key {
            Some(ref key) => {
                println!("🔬 Running enhanced analysis...\n");
                let analyzer =
                    Analyzer::new(trends, &geo).with_competition(CompetitionClient::new(key));
                let keywords: Vec<String> =
                    records.iter().map(|r| r.keyword.clone()).collect();
                metrics = Some(analyzer.top_recommendations(&keywords, top_n).await);
            }
            None => {
                eprintln!(
                    "{} Enhanced analysis requires --api-key; exporting basic results instead",
                    "⚠".yellow().bold()
                );
            }
        }
    }

    match metrics {
        Some(analyzed) if !analyzed.is_empty() => {
            let enhanced_output = enhanced_output_path(&output);
            write_or_exit(&generate_enhanced_csv(&analyzed), &expand_path(&enhanced_output));

            if write_report {
                let report_output = report_output_path(&output);
                write_or_exit(&generate_text_report(&analyzed), &expand_path(&report_output));
                println!(
                    "{} Analysis report saved to {}",
                    "✓".green().bold(),
                    report_output
                );
            }

            print_enhanced_summary(&analyzed, &enhanced_output);
        }
        _ => {
            let content = match format {
                ReportFormat::Csv => generate_basic_csv(&records),
                ReportFormat::Text => generate_basic_text(&records),
                ReportFormat::Json => {
                    match generate_json_report(&ReportData::new(seeds.clone(), records.clone())) {
                        Ok(json) => json,
                        Err(e) => {
                            eprintln!("✗ Failed to serialize report: {}", e);
                            std::process::exit(1);
                        }
                    }
                }
            };
            write_or_exit(&content, &expand_path(&output));
            print_basic_summary(&records, &output);
        }
    }
}

pub async fn handle_suggest(sub_matches: &ArgMatches) {
    let phrase = sub_matches.get_one::<String>("PHRASE").unwrap();
    let language = sub_matches
        .get_one::<String>("language")
        .cloned()
        .unwrap_or_else(|| "en".to_string());
    let country = sub_matches
        .get_one::<String>("country")
        .cloned()
        .unwrap_or_else(|| "US".to_string());

    let client = AutocompleteClient::new(&language, &country);

    match client.fetch(phrase).await {
        Ok(suggestions) if suggestions.is_empty() => {
            println!("No suggestions found for '{}'", phrase);
        }
        Ok(suggestions) => {
            println!("\nSuggestions for '{}':\n", phrase.bright_white().bold());
            for (idx, suggestion) in suggestions.iter().enumerate() {
                println!("  {}. {}", idx + 1, suggestion);
            }
        }
        Err(e) => {
            eprintln!("✗ Suggestion fetch failed: {}", e);
            std::process::exit(1);
        }
    }
}

pub async fn handle_analyze(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let keywords = resolve_seeds(sub_matches);
    let language = sub_matches
        .get_one::<String>("language")
        .cloned()
        .unwrap_or_else(|| "en".to_string());
    let country = sub_matches
        .get_one::<String>("country")
        .cloned()
        .unwrap_or_else(|| "US".to_string());
    let geo = sub_matches
        .get_one::<String>("geo")
        .cloned()
        .unwrap_or_else(|| "US".to_string());
    let api_key = sub_matches.get_one::<String>("api-key");
    let output = sub_matches.get_one::<String>("output");

    println!("\n🔬 Analyzing {} keyword(s)", keywords.len());

    let trends = InterestClient::new(&format!("{}-{}", language, country));
    let mut analyzer = Analyzer::new(trends, &geo);
    match api_key {
        Some(key) => {
            analyzer = analyzer.with_competition(CompetitionClient::new(key));
        }
        None => {
            println!(
                "{} No API key provided; competition will be estimated from keyword shape",
                "⚠".yellow().bold()
            );
        }
    }

    let metrics = analyzer.analyze(&keywords).await;

    let report = generate_text_report(&metrics);
    println!("{}", report);

    if let Some(output) = output {
        let path = expand_path(output);
        write_or_exit(&generate_enhanced_csv(&metrics), &path);
        println!(
            "{} Enhanced metrics written to {}",
            "✓".green().bold(),
            path.display()
        );
    }
}

fn print_basic_summary(records: &[KeywordRecord], output: &str) {
    let with_trends = records.iter().filter(|r| r.trend_score.is_some()).count();
    let scores: Vec<f64> = records.iter().filter_map(|r| r.trend_score).collect();

    println!("\n📊 Export Summary:");
    println!("Total keywords: {}", records.len());
    println!("Keywords with trend data: {}", with_trends);
    if scores.is_empty() {
        println!("Average trend score: N/A");
    } else {
        println!(
            "Average trend score: {:.1}",
            scores.iter().sum::<f64>() / scores.len() as f64
        );
    }
    println!("Output file: {}", output);
}

fn print_enhanced_summary(metrics: &[KeywordMetrics], output: &str) {
    let high = metrics
        .iter()
        .filter(|m| m.recommendation == Recommendation::HighPriority)
        .count();
    let medium = metrics
        .iter()
        .filter(|m| m.recommendation == Recommendation::MediumPriority)
        .count();
    let with_volume = metrics.iter().filter(|m| m.search_volume.is_some()).count();

    println!("\n🎯 Enhanced Analysis Summary:");
    println!("Keywords analyzed: {}", metrics.len());
    println!("High priority targets: {}", high);
    println!("Medium priority targets: {}", medium);
    println!("Keywords with search volume: {}", with_volume);
    println!("Enhanced output file: {}", output);
}
