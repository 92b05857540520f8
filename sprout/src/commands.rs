use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("sprout")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sprout")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("discover")
                .about(
                    "Discover keywords from seed phrases, score them against trends, and \
                write a ranked export.",
                )
                .arg(
                    arg!(-s --"seeds" <LIST>)
                        .required(false)
                        .help("Comma-separated seed keywords (e.g. \"crypto jobs, web3 careers\")")
                        .conflicts_with("seeds-file"),
                )
                .arg(
                    arg!(-f --"seeds-file" <PATH>)
                        .required(false)
                        .help("Path to a file of seed keywords, newline or comma separated")
                        .conflicts_with("seeds"),
                )
                .arg(
                    arg!(-r --"recursive")
                        .required(false)
                        .help("Expand suggestions recursively (slower but more comprehensive)")
                        .action(clap::ArgAction::SetTrue)
                        .conflicts_with("variations"),
                )
                .arg(
                    arg!(--"variations")
                        .required(false)
                        .help("Generate prefix/suffix variations per seed")
                        .action(clap::ArgAction::SetTrue)
                        .conflicts_with("recursive"),
                )
                .arg(
                    arg!(--"max-depth" <DEPTH>)
                        .required(false)
                        .help("Maximum recursion depth for recursive expansion")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("2"),
                )
                .arg(
                    arg!(--"max-per-seed" <COUNT>)
                        .required(false)
                        .help("Maximum suggestions taken per expanded phrase")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("5"),
                )
                .arg(
                    arg!(--"language" <LANG>)
                        .required(false)
                        .help("Language code for suggestions")
                        .default_value("en"),
                )
                .arg(
                    arg!(--"country" <COUNTRY>)
                        .required(false)
                        .help("Country code for suggestions")
                        .default_value("US"),
                )
                .arg(
                    arg!(--"geo" <REGION>)
                        .required(false)
                        .help("Geographic region for trend lookups")
                        .default_value("US"),
                )
                .arg(
                    arg!(--"min-length" <CHARS>)
                        .required(false)
                        .help("Minimum keyword length filter")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"max-length" <CHARS>)
                        .required(false)
                        .help("Maximum keyword length filter")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"phrase-match" <PHRASE>)
                        .required(false)
                        .help("Required phrase in kept keywords (case insensitive)"),
                )
                .arg(
                    arg!(--"no-dedup")
                        .required(false)
                        .help("Disable keyword deduplication")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"analyze")
                        .required(false)
                        .help("Run enhanced analysis and recommendations (requires --api-key)")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"api-key" <KEY>)
                        .required(false)
                        .help("API key for measured competition metrics"),
                )
                .arg(
                    arg!(--"top" <COUNT>)
                        .required(false)
                        .help("Number of top recommendations to keep in enhanced mode")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Output file path")
                        .default_value("keyword_analysis.csv"),
                )
                .arg(
                    arg!(--"format" <FORMAT>)
                        .required(false)
                        .help("Export format: csv, json, text")
                        .value_parser(["csv", "json", "text"])
                        .default_value("csv"),
                )
                .arg(
                    arg!(--"report")
                        .required(false)
                        .help("Write a companion text analysis report in enhanced mode")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("suggest")
                .about("Print raw suggestions for a single phrase.")
                .arg(arg!([PHRASE]).required(true).help("The phrase to expand"))
                .arg(
                    arg!(--"language" <LANG>)
                        .required(false)
                        .help("Language code for suggestions")
                        .default_value("en"),
                )
                .arg(
                    arg!(--"country" <COUNTRY>)
                        .required(false)
                        .help("Country code for suggestions")
                        .default_value("US"),
                ),
        )
        .subcommand(
            command!("analyze")
                .about(
                    "Run enhanced scoring on an explicit keyword list, skipping discovery.",
                )
                .arg(
                    arg!(-s --"seeds" <LIST>)
                        .required(false)
                        .help("Comma-separated keywords to analyze")
                        .conflicts_with("seeds-file"),
                )
                .arg(
                    arg!(-f --"seeds-file" <PATH>)
                        .required(false)
                        .help("Path to a file of keywords, newline or comma separated")
                        .conflicts_with("seeds"),
                )
                .arg(
                    arg!(--"language" <LANG>)
                        .required(false)
                        .help("Language code for trend lookups")
                        .default_value("en"),
                )
                .arg(
                    arg!(--"country" <COUNTRY>)
                        .required(false)
                        .help("Country code for trend lookups")
                        .default_value("US"),
                )
                .arg(
                    arg!(--"geo" <REGION>)
                        .required(false)
                        .help("Geographic region for trend lookups")
                        .default_value("US"),
                )
                .arg(
                    arg!(--"api-key" <KEY>)
                        .required(false)
                        .help("API key for measured competition metrics"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Write the enhanced metrics CSV to this path"),
                ),
        )
}
