//! Command-line front end for the admission simulator
//!
//! Compares 3G, test-everyone, 2G and no-restriction admission for one set
//! of parameters and prints per-policy means (text) or the full report with
//! histograms (JSON).
//!
//! Percent-valued flags mirror the interactive inputs:
//!
//! ```text
//! admission-sim --capacity 200 --prevalence 1 --efficacy 66 \
//!     --vaccination-rate 80 --sensitivity 80 --specificity 97
//! ```

use admission_simulator_core_rs::policy::compare_policies;
use admission_simulator_core_rs::stats::DEFAULT_HISTOGRAM_PADDING;
use admission_simulator_core_rs::{
    ComparisonReport, Counter, PercentInputs, PercentOverrides, PolicyKind, SimulationConfig,
};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "admission-sim",
    version,
    about = "Monte Carlo comparison of 2G/3G event admission policies"
)]
struct Args {
    /// JSON file with a base configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of people admitted to the venue
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=10_000))]
    capacity: Option<u32>,

    /// Prevalence in percent
    #[arg(long)]
    prevalence: Option<f64>,

    /// Vaccine efficacy against infection in percent (may be negative)
    #[arg(long, allow_negative_numbers = true)]
    efficacy: Option<f64>,

    /// Vaccination rate in percent
    #[arg(long)]
    vaccination_rate: Option<f64>,

    /// Test sensitivity in percent
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Test specificity in percent
    #[arg(long)]
    specificity: Option<f64>,

    /// Monte Carlo runs per policy
    #[arg(long)]
    runs: Option<u32>,

    /// Base random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Empty histogram bins on each side of the observed range
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_PADDING)]
    padding: u32,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn percent_overrides(&self) -> PercentOverrides {
        PercentOverrides {
            capacity: self.capacity,
            prevalence_pct: self.prevalence,
            vaccine_efficacy_pct: self.efficacy,
            vaccination_rate_pct: self.vaccination_rate,
            test_sensitivity_pct: self.sensitivity,
            test_specificity_pct: self.specificity,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the base configuration and apply flag overrides
fn resolve_config(args: &Args) -> Result<SimulationConfig> {
    let base = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            SimulationConfig::from_json_str(&json)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimulationConfig::from_percentages(PercentInputs::default())
            .context("default parameters")?,
    };

    let mut config = base.with_percentages(&args.percent_overrides());
    if let Some(runs) = args.runs {
        config.trial_count = runs;
    }
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }

    config.validate().context("invalid parameters")?;
    Ok(config)
}

fn print_text(report: &ComparisonReport) {
    let c = &report.config;
    println!(
        "People: {}, prevalence: {:.2}%, test sensitivity: {:.2}%, test specificity: {:.2}%, \
         vaccination rate: {:.0}%, vaccine efficacy: {:.0}%",
        c.capacity,
        c.prevalence * 100.0,
        c.test_sensitivity * 100.0,
        c.test_specificity * 100.0,
        c.vaccination_rate * 100.0,
        c.vaccine_efficacy * 100.0,
    );
    println!("Runs per policy: {}, seed: {}", c.trial_count, c.rng_seed);
    println!("Config hash: {}", report.config_hash);

    let sections = [
        (Counter::AdmittedInfected, "Infected people inside"),
        (Counter::RejectedInfected, "Infected people rejected"),
        (Counter::RejectedUninfected, "Uninfected people rejected"),
    ];

    for (counter, title) in sections {
        println!();
        println!("{}", title);
        println!("  {:<16} {:>10} {:>10} {:>10}", "policy", "mean", "std", "expected");
        for policy in &report.policies {
            // Untested policies have nothing to report on rejections
            if counter != Counter::AdmittedInfected
                && matches!(policy.policy, PolicyKind::TwoG | PolicyKind::NoRestriction)
            {
                continue;
            }
            if let Some(entry) = policy.counter(counter) {
                let expected = entry
                    .expected
                    .map(|e| format!("{:.2}", e))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "  {:<16} {:>10.2} {:>10.2} {:>10}",
                    policy.label, entry.summary.mean, entry.summary.std_dev, expected
                );
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring worker threads")?;
    }

    let config = resolve_config(&args)?;
    info!(?config, "running policy comparison");

    let comparison = compare_policies(&config)?;
    let report = ComparisonReport::from_comparison(&comparison, args.padding)?;

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
