//! Round buckets - which round a competitor went out in
//!
//! Level 2 - Phase-level implementation
//!
//! A field of `n` teams shrinks to `ceil(n / 2)` after each round, so the
//! teams knocked out in the first round hold ranks `ceil(n / 2) + 1 ..= n`.
//! Repeating the halving against the shrunken field yields the rank range
//! of every later round.

use std::ops::RangeInclusive;

use rustc_hash::FxHashMap;
use serde::Serialize;
use trumps_core::{Result, SimError};

use crate::tally::{RankCounts, RankTally};

/// Field size after one round: winners plus the bye, if any
pub fn next_field_size(n: usize) -> usize {
    n / 2 + n % 2
}

/// Number of rounds a field of `p` teams needs to produce a champion
pub fn rounds_needed(p: usize) -> usize {
    if p <= 1 {
        0
    } else {
        1 + rounds_needed(next_field_size(p))
    }
}

/// Rank range eliminated in each round, round 1 first
pub fn round_rank_ranges(field_size: usize) -> Vec<RangeInclusive<usize>> {
    let mut ranges = Vec::with_capacity(rounds_needed(field_size));
    let mut n = field_size;
    while n > 1 {
        let next = next_field_size(n);
        ranges.push(next + 1..=n);
        n = next;
    }
    ranges
}

/// Elimination counts for one competitor
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RoundLosses {
    /// Trials lost in each round, round 1 first
    pub lost: Vec<u64>,
    /// Trials won outright
    pub won: u64,
}

impl RoundLosses {
    fn from_counts(counts: &RankCounts, ranges: &[RangeInclusive<usize>]) -> Self {
        Self {
            lost: ranges.iter().map(|r| counts.sum_ranks(r.clone())).collect(),
            won: counts.get(1),
        }
    }

    /// Trials lost in `round` (1-based)
    pub fn lost_in(&self, round: usize) -> u64 {
        round
            .checked_sub(1)
            .and_then(|i| self.lost.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// All trials accounted for: every loss plus every win
    pub fn total(&self) -> u64 {
        self.lost.iter().sum::<u64>() + self.won
    }

    pub fn win_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.won as f64 / total as f64
        }
    }
}

/// Per-competitor round buckets derived from a rank tally
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundBuckets {
    field_size: usize,
    rounds: usize,
    losses: FxHashMap<String, RoundLosses>,
}

impl RoundBuckets {
    pub fn field_size(&self) -> usize {
        self.field_size
    }

    /// Number of elimination rounds (bucket columns before `won`)
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn get(&self, name: &str) -> Option<&RoundLosses> {
        self.losses.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RoundLosses)> + '_ {
        self.losses.iter().map(|(name, losses)| (name.as_str(), losses))
    }

    pub fn len(&self) -> usize {
        self.losses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }

    /// Entries sorted by wins (descending), then by name
    pub fn ranked(&self) -> Vec<(&str, &RoundLosses)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.won.cmp(&a.1.won).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Bucket a rank tally into "eliminated in round R" and "won" counts.
///
/// Pure function of the tally and the field size. `field_size` must be
/// the team count the tally was collected for.
pub fn aggregate(tally: &RankTally, field_size: usize) -> Result<RoundBuckets> {
    if field_size != tally.field_size() {
        return Err(SimError::FieldSizeMismatch {
            tally: tally.field_size(),
            requested: field_size,
        });
    }

    let ranges = round_rank_ranges(field_size);
    let losses = tally
        .iter()
        .map(|(name, counts)| (name.to_string(), RoundLosses::from_counts(counts, &ranges)))
        .collect();

    Ok(RoundBuckets {
        field_size,
        rounds: ranges.len(),
        losses,
    })
}
