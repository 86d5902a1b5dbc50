//! Reserving System CLI
//!
//! Loads an exposure dataset, runs the reserve methods and trend analysis,
//! and prints a formatted report. Supports JSON output for API integration
//! via --json.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use reserving_system::persistence::InMemoryStore;
use reserving_system::records::load_records;
use reserving_system::trend::TrendResult;
use reserving_system::{EngineConfig, ReserveEngine, ReserveMethod, ReserveResult};

#[derive(Parser)]
#[command(name = "reserving_system", about = "Actuarial reserve calculation engine")]
struct Args {
    /// Path to the exposure records CSV
    #[arg(long, default_value = "data/insurance_claims.csv")]
    records: String,

    /// Run a single method instead of all three
    /// (chain_ladder, bornhuetter_ferguson, frequency_severity)
    #[arg(long)]
    method: Option<String>,

    /// Confidence level for intervals
    #[arg(long, default_value_t = 0.95)]
    confidence_level: f64,

    /// Development periods in the triangle
    #[arg(long, default_value_t = 12)]
    development_periods: usize,

    /// Tail development factor
    #[arg(long, default_value_t = 1.05)]
    tail_factor: f64,

    /// Number of origin cohorts
    #[arg(long, default_value_t = 5)]
    cohorts: usize,

    /// Expected loss ratio (Bornhuetter-Ferguson)
    #[arg(long, default_value_t = 0.75)]
    expected_loss_ratio: f64,

    /// Premium loading factor (Bornhuetter-Ferguson)
    #[arg(long, default_value_t = 1.2)]
    premium_loading: f64,

    /// Skip the trend analysis
    #[arg(long)]
    no_trends: bool,

    /// Emit results as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonReport {
    record_count: usize,
    reserves: Vec<ReserveResult>,
    trends: Option<std::collections::BTreeMap<String, TrendResult>>,
}

fn parse_method(name: &str) -> anyhow::Result<ReserveMethod> {
    match name {
        "chain_ladder" => Ok(ReserveMethod::ChainLadder),
        "bornhuetter_ferguson" => Ok(ReserveMethod::BornhuetterFerguson),
        "frequency_severity" => Ok(ReserveMethod::FrequencySeverity),
        other => anyhow::bail!(
            "unknown method `{}` (expected chain_ladder, bornhuetter_ferguson, or frequency_severity)",
            other
        ),
    }
}

fn print_reserve_table(result: &ReserveResult) {
    println!("\n{}", result.method.as_str());
    println!("{}", "=".repeat(result.method.as_str().len()));
    println!("  Total reserves: ${:.2}", result.total_reserves);

    if let Some(ci) = &result.confidence_interval {
        println!(
            "  {:.0}% interval: [${:.2}, ${:.2}]  (std error ${:.2})",
            ci.confidence_level * 100.0,
            ci.lower_bound,
            ci.upper_bound,
            ci.standard_error
        );
    }

    if !result.reserves_by_cohort.is_empty() {
        println!("\n  {:>8} {:>16} {:>16} {:>16}", "Cohort", "Reported", "Ultimate", "Reserve");
        for cohort in &result.reserves_by_cohort {
            println!(
                "  {:>8} {:>16.2} {:>16.2} {:>16.2}",
                cohort.cohort, cohort.reported, cohort.ultimate, cohort.reserve
            );
        }
    }
}

fn print_trend_table(trends: &std::collections::BTreeMap<String, TrendResult>) {
    println!("\nTrend Analysis");
    println!("==============");
    println!(
        "  {:<18} {:>12} {:>10} {:>10}  {}",
        "Metric", "Slope", "R^2", "p-value", "Direction"
    );
    for result in trends.values() {
        println!(
            "  {:<18} {:>12.6} {:>10.4} {:>10.4}  {:?}",
            result.metric, result.slope, result.trend_strength, result.p_value, result.trend_direction
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let config = EngineConfig {
        confidence_level: args.confidence_level,
        development_periods: args.development_periods,
        tail_factor: args.tail_factor,
        cohort_count: args.cohorts,
        expected_loss_ratio: args.expected_loss_ratio,
        premium_loading_factor: args.premium_loading,
    };

    let records = load_records(&args.records)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("failed to load records from {}", args.records))?;

    let store = Arc::new(InMemoryStore::new());
    let engine = ReserveEngine::new(config).with_store(store.clone());

    let reserves: Vec<ReserveResult> = match &args.method {
        Some(name) => vec![engine.calculate(parse_method(name)?, &records)?],
        None => engine
            .calculate_all(&records)
            .into_iter()
            .collect::<Result<_, _>>()?,
    };

    let trends = if args.no_trends {
        None
    } else {
        Some(engine.analyze_trends(&records)?)
    };

    if args.json {
        let report = JsonReport {
            record_count: records.len(),
            reserves,
            trends,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Reserving System v0.1.0");
    println!("=======================");
    println!("Records loaded: {}", records.len());

    for result in &reserves {
        print_reserve_table(result);
    }

    if let Some(trends) = &trends {
        print_trend_table(trends);
    }

    let summary = store.summary(10);
    println!("\nCalculation history: {} reserve runs persisted", summary.total_calculations);

    Ok(())
}
