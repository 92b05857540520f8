// Report and export generation

use crate::model::{KeywordMetrics, KeywordRecord, Recommendation};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            _ => None,
        }
    }
}

/// Everything one run hands to the exporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub run_id: String,
    pub seeds: Vec<String>,
    pub records: Vec<KeywordRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<KeywordMetrics>>,
}

impl ReportData {
    pub fn new(seeds: Vec<String>, records: Vec<KeywordRecord>) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            seeds,
            records,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Vec<KeywordMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

/// Basic-mode CSV: one row per discovered keyword, unknown numerics as
/// empty fields. Rows are expected pre-sorted.
pub fn generate_basic_csv(records: &[KeywordRecord]) -> String {
    let mut csv = String::from("keyword,source,trend_score,error\n");

    for record in records {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            csv_field(&record.keyword),
            record.source.as_str(),
            format_optional(record.trend_score),
            csv_field(record.error.as_deref().unwrap_or("")),
        ));
    }

    csv
}

/// Enhanced-mode CSV with the full metric set per keyword.
pub fn generate_enhanced_csv(metrics: &[KeywordMetrics]) -> String {
    let mut csv = String::from(
        "keyword,search_volume,trend_score,competition,competition_score,cpc_low,cpc_high,\
         opportunity_score,difficulty_score,recommendation,seasonal_trend_avg\n",
    );

    for metric in metrics {
        let competition = metric.competition.as_ref();
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{}\n",
            csv_field(&metric.keyword),
            metric
                .search_volume
                .map(|v| v.to_string())
                .unwrap_or_default(),
            format_optional(metric.trend_score),
            competition.map(|c| c.level().as_str()).unwrap_or(""),
            format_optional(competition.map(|c| c.score())),
            format_optional(competition.and_then(|c| c.cpc_low())),
            format_optional(competition.and_then(|c| c.cpc_high())),
            format_optional(metric.opportunity_score),
            format_optional(metric.difficulty_score),
            metric.recommendation.as_str(),
            format_optional(metric.seasonal_avg()),
        ));
    }

    csv
}

/// Basic-mode text listing, for terminal display.
pub fn generate_basic_text(records: &[KeywordRecord]) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Keywords discovered: {}\n", records.len()));

    let with_trends = records.iter().filter(|r| r.trend_score.is_some()).count();
    report.push_str(&format!("  Keywords with trend data: {}\n", with_trends));

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for record in records {
        let score = record
            .trend_score
            .map(|s| format!("{:5.1}", s))
            .unwrap_or_else(|| "    -".to_string());
        report.push_str(&format!(
            "  {}  {}  ({})\n",
            score,
            record.keyword,
            record.source.as_str()
        ));
    }

    report
}

/// Full analysis report: priority breakdown, top recommendations, and
/// corpus-level insights.
pub fn generate_text_report(metrics: &[KeywordMetrics]) -> String {
    if metrics.is_empty() {
        return "No keyword data available for analysis.\n".to_string();
    }

    let mut report = String::new();

    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report.push_str("                KEYWORD ANALYSIS REPORT\n");
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str(&format!(
        "Analysis Date:     {}\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    report.push_str(&format!("Keywords Analyzed: {}\n\n", metrics.len()));

    // Priority breakdown
    let high = count_bucket(metrics, Recommendation::HighPriority);
    let medium = count_bucket(metrics, Recommendation::MediumPriority);
    let consider = count_bucket(metrics, Recommendation::Consider);

    report.push_str("PRIORITY BREAKDOWN\n");
    report.push_str(&format!("  High priority:   {}\n", high));
    report.push_str(&format!("  Medium priority: {}\n", medium));
    report.push_str(&format!("  Consider:        {}\n\n", consider));

    // Top recommendations
    let top: Vec<&KeywordMetrics> = metrics
        .iter()
        .filter(|m| {
            matches!(
                m.recommendation,
                Recommendation::HighPriority | Recommendation::MediumPriority
            )
        })
        .take(10)
        .collect();

    if !top.is_empty() {
        report.push_str("TOP KEYWORD RECOMMENDATIONS\n");
        report.push_str("────────────────────────────────────────\n");

        for (idx, metric) in top.iter().enumerate() {
            report.push_str(&format!("{}. {}\n", idx + 1, metric.keyword));
            report.push_str(&format!(
                "   Priority:    {}\n",
                metric.recommendation.as_str()
            ));
            report.push_str(&format!(
                "   Opportunity: {}/100\n",
                format_optional_padded(metric.opportunity_score)
            ));
            report.push_str(&format!(
                "   Difficulty:  {}/100\n",
                format_optional_padded(metric.difficulty_score)
            ));
            if let Some(volume) = metric.search_volume {
                report.push_str(&format!("   Est. volume: {}\n", volume));
            }
            if let Some(ref competition) = metric.competition {
                report.push_str(&format!(
                    "   Competition: {} ({})\n",
                    competition.level().as_str(),
                    competition.provenance()
                ));
            }
            report.push('\n');
        }
    }

    // Insights
    let avg_opportunity = average(metrics.iter().filter_map(|m| m.opportunity_score));
    let avg_difficulty = average(metrics.iter().filter_map(|m| m.difficulty_score));

    report.push_str("INSIGHTS\n");
    report.push_str(&format!(
        "  Average opportunity score: {}\n",
        format_optional_padded(avg_opportunity)
    ));
    report.push_str(&format!(
        "  Average difficulty score:  {}\n",
        format_optional_padded(avg_difficulty)
    ));

    match avg_opportunity {
        Some(avg) if avg > 70.0 => {
            report.push_str("  Strong keyword opportunities identified.\n");
        }
        Some(avg) if avg > 50.0 => {
            report.push_str("  Moderate keyword opportunities available.\n");
        }
        _ => {
            report.push_str("  Consider expanding the keyword research.\n");
        }
    }

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report
}

/// Structured JSON report with run metadata. Competition provenance is
/// carried by the serialized enum tag.
pub fn generate_json_report(data: &ReportData) -> Result<String, serde_json::Error> {
    let with_trends = data
        .records
        .iter()
        .filter(|r| r.trend_score.is_some())
        .count();

    let analysis_summary = data.metrics.as_ref().map(|metrics| {
        serde_json::json!({
            "high_priority": count_bucket(metrics, Recommendation::HighPriority),
            "medium_priority": count_bucket(metrics, Recommendation::MediumPriority),
            "consider": count_bucket(metrics, Recommendation::Consider),
            "with_search_volume": metrics.iter().filter(|m| m.search_volume.is_some()).count(),
            "average_opportunity_score": average(metrics.iter().filter_map(|m| m.opportunity_score)),
            "average_difficulty_score": average(metrics.iter().filter_map(|m| m.difficulty_score)),
        })
    });

    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Sprout",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "run_id": data.run_id,
            },
            "seeds": data.seeds,
            "summary": {
                "total_keywords": data.records.len(),
                "with_trend_data": with_trends,
                "analysis": analysis_summary,
            },
            "keywords": data.records,
            "analysis": data.metrics,
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

// Helper functions

fn count_bucket(metrics: &[KeywordMetrics], bucket: Recommendation) -> usize {
    metrics.iter().filter(|m| m.recommendation == bucket).count()
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let collected: Vec<f64> = values.collect();
    if collected.is_empty() {
        return None;
    }
    Some(collected.iter().sum::<f64>() / collected.len() as f64)
}

fn format_optional(value: Option<f64>) -> String {
    value.map(|v| format!("{}", v)).unwrap_or_default()
}

fn format_optional_padded(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
