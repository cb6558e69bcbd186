//! Terminal rendering.

use colored::Colorize;
use serde_json::Value;
use sitetrust_core::{Level, SiteScoreRecord};

pub fn print_record(record: &SiteScoreRecord) {
    let level = match record.level {
        Level::Green => record.level.as_str().green().bold(),
        Level::Amber => record.level.as_str().yellow().bold(),
        Level::Red => record.level.as_str().red().bold(),
    };

    println!("{}  {:.1}  [{level}]", record.host.bold(), record.score);
    println!("  security      S = {:.3}", record.breakdown.s);
    println!("  credibility   C = {:.3}", record.breakdown.c);
    println!("  transparency  T = {:.3}", record.breakdown.t);
    println!(
        "  community     U = {:.3}  (no votes consulted)",
        record.breakdown.u
    );
}

pub fn print_signals(host: &str, signals: &[(String, Value)]) {
    println!("{}", host.bold());
    for (key, value) in signals {
        println!("  {key:<28} {value}");
    }
}
