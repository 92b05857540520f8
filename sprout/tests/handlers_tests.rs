use sprout::handlers::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_parse_seed_list_splits_on_commas() {
    let seeds = parse_seed_list("crypto jobs, web3 careers,blockchain");
    assert_eq!(
        seeds,
        vec![
            "crypto jobs".to_string(),
            "web3 careers".to_string(),
            "blockchain".to_string(),
        ]
    );
}

#[test]
fn test_parse_seed_list_drops_blanks() {
    let seeds = parse_seed_list(" , crypto jobs, ,");
    assert_eq!(seeds, vec!["crypto jobs".to_string()]);
}

#[test]
fn test_parse_seed_list_empty_input() {
    assert!(parse_seed_list("").is_empty());
    assert!(parse_seed_list(" , , ").is_empty());
}

#[test]
fn test_load_seeds_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "# marketing angles")?;
    writeln!(temp_file, "crypto jobs, web3 careers")?;
    writeln!(temp_file)?; // Empty line
    writeln!(temp_file, "blockchain developer")?;

    let seeds = load_seeds_from_file(temp_file.path())?;

    assert_eq!(seeds.len(), 3);
    assert_eq!(seeds[0], "crypto jobs");
    assert_eq!(seeds[1], "web3 careers");
    assert_eq!(seeds[2], "blockchain developer");

    Ok(())
}

#[test]
fn test_load_seeds_from_file_empty() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "# only comments").unwrap();
    writeln!(temp_file, "   ").unwrap();

    let result = load_seeds_from_file(temp_file.path());

    assert!(result.is_err());
    assert!(result.unwrap_err().contains("No seed keywords"));
}

#[test]
fn test_load_seeds_from_file_missing() {
    let result = load_seeds_from_file(&PathBuf::from("/definitely/not/a/real/path.txt"));
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Failed to read"));
}

#[test]
fn test_load_seeds_from_source_literal_list() {
    let list = "crypto jobs, web3 careers".to_string();
    let seeds = load_seeds_from_source(Some(&list), None).unwrap();
    assert_eq!(seeds.len(), 2);
}

#[test]
fn test_load_seeds_from_source_blank_list_is_an_error() {
    let list = " , ".to_string();
    let result = load_seeds_from_source(Some(&list), None);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("No seed keywords"));
}

#[test]
fn test_load_seeds_from_source_no_input() {
    let result = load_seeds_from_source(None, None);
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .contains("Either --seeds or --seeds-file must be provided")
    );
}

#[test]
fn test_load_seeds_from_source_prefers_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "from the file")?;

    let list = "from the list".to_string();
    let path = PathBuf::from(temp_file.path());
    let seeds = load_seeds_from_source(Some(&list), Some(&path))?;

    assert_eq!(seeds, vec!["from the file".to_string()]);
    Ok(())
}

#[test]
fn test_enhanced_output_path() {
    assert_eq!(
        enhanced_output_path("keyword_analysis.csv"),
        "keyword_analysis_enhanced.csv"
    );
    assert_eq!(enhanced_output_path("results"), "results_enhanced");
}

#[test]
fn test_report_output_path() {
    assert_eq!(
        report_output_path("keyword_analysis.csv"),
        "keyword_analysis_report.txt"
    );
    assert_eq!(report_output_path("results"), "results_report.txt");
}
