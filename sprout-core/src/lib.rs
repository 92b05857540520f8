pub mod analyze;
pub mod model;
pub mod pipeline;
pub mod rank;
pub mod report;
pub mod score;

use colored::Colorize;

pub fn print_banner() {
    let banner = r#"
                                      _
     ___ _ __  _ __ ___  _   _ _ __ | |_
    / __| '_ \| '__/ _ \| | | | '_ \| __|
    \__ \ |_) | | | (_) | |_| | |_) | |_
    |___/ .__/|_|  \___/ \__,_| .__/ \__|
        |_|                   |_|
"#;
    println!("{}", banner.bright_green().bold());
    println!(
        "{}",
        format!(
            "    v{} - keyword discovery and opportunity scoring",
            env!("CARGO_PKG_VERSION")
        )
        .bright_white()
    );
    println!();
}
