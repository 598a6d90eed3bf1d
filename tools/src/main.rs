//! acv-runner: headless report runner for the won-ACV mix dashboard.
//!
//! Usage:
//!   acv-runner --data data/customer-type.json
//!   acv-runner --data data/customer-type.json --config dashboard.json --json
//!   acv-runner --synthetic --seed 7 --quarters 6 --deals 40

use acvmix_core::{
    config::DashboardConfig,
    dashboard::{Dashboard, DashboardState},
    loader::load_or_empty,
    record::ParsedRecords,
    synthetic::{generate, SyntheticSpec},
};
use anyhow::Result;
use std::env;

const DEFAULT_DATA_PATH: &str = "./data/customer-type.json";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json_mode = args.iter().any(|a| a == "--json");
    let synthetic = args.iter().any(|a| a == "--synthetic");
    let data_path = string_arg(&args, "--data").unwrap_or(DEFAULT_DATA_PATH);

    let config = match string_arg(&args, "--config") {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };

    let parsed: ParsedRecords = if synthetic {
        let defaults = SyntheticSpec::default();
        let spec = SyntheticSpec {
            seed: parse_arg(&args, "--seed", defaults.seed),
            quarters: parse_arg(&args, "--quarters", defaults.quarters),
            deals_per_quarter: parse_arg(&args, "--deals", defaults.deals_per_quarter),
            ..defaults
        };
        log::info!("Generating synthetic dataset: {spec:?}");
        ParsedRecords {
            records: generate(&spec),
            rejected: Vec::new(),
        }
    } else {
        load_or_empty(data_path).parsed
    };

    let dashboard = Dashboard::from_parsed(&parsed, &config)?;

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print_report(&dashboard);
    }
    Ok(())
}

fn print_report(dashboard: &Dashboard) {
    println!("=== {} ===", dashboard.title);
    if dashboard.rejected_count() > 0 {
        println!("  skipped {} malformed record(s)", dashboard.rejected_count());
    }
    println!();

    let (bar, donut, table) = match &dashboard.state {
        DashboardState::NoData { message } => {
            println!("  {message}");
            return;
        }
        DashboardState::Ready {
            bar, donut, table, ..
        } => (bar, donut, table),
    };

    println!("--- ACV by quarter ---");
    for b in &bar.bars {
        let segments: Vec<String> = b
            .segments
            .iter()
            .map(|s| format!("{}: {}", s.customer_type, s.label))
            .collect();
        println!("  {:<8} {:>8} | {}", b.quarter, b.total_label, segments.join(", "));
    }
    println!();

    println!("--- ACV share ({} {}) ---", donut.center_caption, donut.center_label);
    for s in &donut.slices {
        println!("  {:<20} {}", s.customer_type, s.label);
    }
    println!();

    println!("--- Summary ---");
    print!("{}", table.render_text());
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
