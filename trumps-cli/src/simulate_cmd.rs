//! Simulate command - run repeated brackets over a roster file
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load(), run_with_progress(), report_results()
//! - Level 3: build_config(), create_progress_bar()
//! - Level 4: formatting utilities (see report)

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use trumps_core::Resolution;
use trumps_tournament::{run_simulation, SimulationConfig, SimulationReport};

use crate::loader::{load_roster, Roster};
use crate::report::{format_json, format_table};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Attribute file. The first column is the card name, headers with a
    /// trailing - mean lower is better
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of simulated brackets
    #[arg(short = 'n', long = "trials", default_value = "100000")]
    pub trials: usize,

    /// Competitors per team
    #[arg(long, default_value = "1")]
    pub team_size: usize,

    /// How team members' values combine (max, sum or min)
    #[arg(long, default_value = "max")]
    pub resolution: Resolution,

    /// Run all trials on one thread
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Field delimiter of the attribute file
    #[arg(long, default_value = ",")]
    pub delimiter: char,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// This function reads like a table of contents:
/// 1. Load the roster
/// 2. Run the brackets
/// 3. Report results
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    let roster = load(&args)?;
    let config = build_config(&args, seed);

    let report = run_with_progress(&roster, &config, &args)?;

    report_results(&report, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load(args: &SimulateArgs) -> Result<Roster> {
    let delimiter = delimiter_byte(args.delimiter)?;
    let roster = load_roster(&args.file, delimiter)?;

    tracing::info!(
        "Loaded {} competitors with {} attributes from {}",
        roster.competitors.len(),
        roster.schema.len(),
        args.file.display()
    );
    tracing::debug!(
        "Attributes: {}",
        roster
            .schema
            .attributes()
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if roster.competitors.is_empty() {
        tracing::warn!("No competitors found in {}", args.file.display());
    }

    Ok(roster)
}

/// Run the simulation, driving a progress bar from the trial callback
pub fn run_with_progress(
    roster: &Roster,
    config: &SimulationConfig,
    args: &SimulateArgs,
) -> Result<SimulationReport> {
    let progress = create_progress_bar(config.trials, args.no_progress || args.json)?;
    let started = Instant::now();

    tracing::info!(
        "Starting simulation: trials={}, team_size={}, resolution={}",
        config.trials,
        config.team_size,
        config.resolution
    );

    let result = run_simulation(&roster.competitors, &roster.schema, config, |_| progress.inc(1));
    progress.finish_and_clear();
    let report = result?;

    tracing::info!(
        "Finished {} trials of {} teams in {:.2?} (seed={})",
        report.tally.trials(),
        report.team_count,
        started.elapsed(),
        report.seed
    );

    Ok(report)
}

fn report_results(report: &SimulationReport, args: &SimulateArgs) -> Result<()> {
    if args.json {
        println!("{}", format_json(report)?);
    } else {
        print!("{}", format_table(report));
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Build simulation configuration from command arguments
pub fn build_config(args: &SimulateArgs, seed: Option<u64>) -> SimulationConfig {
    let mut config = SimulationConfig::new(args.trials)
        .with_team_size(args.team_size)
        .with_resolution(args.resolution);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if args.sequential {
        config = config.sequential();
    }
    config
}

fn create_progress_bar(trials: usize, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(trials as u64);
    bar.set_style(ProgressStyle::with_template(
        "{bar:40.cyan/blue} {human_pos}/{human_len} trials ({per_sec}, eta {eta})",
    )?);
    Ok(bar)
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got '{}'", delimiter);
    }
    Ok(delimiter as u8)
}
