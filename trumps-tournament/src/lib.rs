//! Trumps Tournament - Repeated single-elimination brackets
//!
//! This crate provides the simulation layers:
//! - Bracket execution with automatic byes for odd fields
//! - Rank tallies accumulated over many independent trials
//! - Round buckets (eliminated in round R / won) derived from a tally
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_simulation (orchestration)
//! - Level 2: simulate, aggregate (phases)
//! - Level 3: run_trial, play_round, RankTally::record (steps)
//! - Level 4: configuration, field-size schedule

mod bracket;
mod config;
mod rounds;
mod simulation;
mod tally;

pub use bracket::{play_round, run_trial, RoundResult};
pub use config::SimulationConfig;
pub use rounds::{aggregate, next_field_size, round_rank_ranges, rounds_needed, RoundBuckets, RoundLosses};
pub use simulation::{run_simulation, simulate, simulate_with_callback, SimulationReport};
pub use tally::{RankCounts, RankTally};
