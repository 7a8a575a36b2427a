//! Trial runner - repeat brackets and tally finishing ranks
//!
//! Level 1 - Orchestration and Level 2 - Phases
//!
//! Every trial gets its own ChaCha stream derived from the base seed and
//! the trial index, so a seeded run yields the same tally whether trials
//! run sequentially or across the rayon pool.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use trumps_core::{make_teams, Competitor, Result, Schema, SimError, Team};

use crate::bracket::run_trial;
use crate::config::SimulationConfig;
use crate::rounds::{aggregate, RoundBuckets};
use crate::tally::RankTally;

/// Everything a presentation layer needs from one run
#[derive(Clone, Debug, Serialize)]
pub struct SimulationReport {
    /// Configuration the run used, with the seed filled in
    pub config: SimulationConfig,
    /// Base seed the trial streams were derived from
    pub seed: u64,
    /// Teams per bracket
    pub team_count: usize,
    pub tally: RankTally,
    pub rounds: RoundBuckets,
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run a full simulation and bucket the results by round
///
/// # Arguments
/// * `competitors` - The field
/// * `schema` - Attribute schema every competitor must match
/// * `config` - Simulation configuration
/// * `on_trial` - Called with the trial index after each completed trial
pub fn run_simulation<F>(
    competitors: &[Competitor],
    schema: &Schema,
    config: &SimulationConfig,
    on_trial: F,
) -> Result<SimulationReport>
where
    F: Fn(usize) + Sync,
{
    let team_count = validate_input(competitors, schema, config)?;
    let seed = resolve_seed(config);

    tracing::debug!(
        "Simulating {} trials: {} competitors in {} teams, resolution={}, parallel={}, seed={}",
        config.trials,
        competitors.len(),
        team_count,
        config.resolution,
        config.parallel,
        seed
    );

    let tally = run_trials(competitors, schema, config, team_count, seed, &on_trial)?;
    let rounds = aggregate(&tally, team_count)?;

    Ok(SimulationReport {
        config: SimulationConfig {
            seed: Some(seed),
            ..config.clone()
        },
        seed,
        team_count,
        tally,
        rounds,
    })
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Run `config.trials` brackets and return the rank tally
pub fn simulate(
    competitors: &[Competitor],
    schema: &Schema,
    config: &SimulationConfig,
) -> Result<RankTally> {
    simulate_with_callback(competitors, schema, config, |_| {})
}

/// Like [`simulate`], reporting each completed trial to `on_trial`
pub fn simulate_with_callback<F>(
    competitors: &[Competitor],
    schema: &Schema,
    config: &SimulationConfig,
    on_trial: F,
) -> Result<RankTally>
where
    F: Fn(usize) + Sync,
{
    let team_count = validate_input(competitors, schema, config)?;
    let seed = resolve_seed(config);
    run_trials(competitors, schema, config, team_count, seed, &on_trial)
}

/// Reject the run before any trial if a precondition fails
fn validate_input(
    competitors: &[Competitor],
    schema: &Schema,
    config: &SimulationConfig,
) -> Result<usize> {
    let team_count = config.validate(competitors.len())?;

    if let Some(c) = competitors.iter().find(|c| c.values().len() != schema.len()) {
        return Err(SimError::SchemaMismatch {
            name: c.name().to_string(),
            got: c.values().len(),
            expected: schema.len(),
        });
    }

    Ok(team_count)
}

fn run_trials<F>(
    competitors: &[Competitor],
    schema: &Schema,
    config: &SimulationConfig,
    team_count: usize,
    seed: u64,
    on_trial: &F,
) -> Result<RankTally>
where
    F: Fn(usize) + Sync,
{
    let empty = RankTally::for_competitors(competitors, team_count);

    let accumulate = |mut tally: RankTally, trial: usize| -> Result<RankTally> {
        let mut rng = trial_rng(seed, trial);
        let order = play_trial(competitors, schema, config, &mut rng)?;
        tally.record(&order)?;
        on_trial(trial);
        Ok(tally)
    };

    if config.parallel {
        (0..config.trials)
            .into_par_iter()
            .try_fold(|| empty.clone(), accumulate)
            .try_reduce(|| empty.clone(), |a, b| Ok(a.merge(b)))
    } else {
        (0..config.trials).try_fold(empty.clone(), accumulate)
    }
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Fresh teams, one bracket, elimination order out
fn play_trial<'a>(
    competitors: &'a [Competitor],
    schema: &Schema,
    config: &SimulationConfig,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Team<'a>>> {
    let teams = make_teams(competitors, config.team_size, rng)?;
    run_trial(teams, schema, config.resolution, rng)
}

// ============================================================================
// Level 4 - Utilities
// ============================================================================

fn resolve_seed(config: &SimulationConfig) -> u64 {
    config.seed.unwrap_or_else(|| rand::thread_rng().gen())
}

/// Independent random stream for one trial
fn trial_rng(seed: u64, trial: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(trial as u64);
    rng
}
