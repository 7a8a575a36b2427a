//! Rank tally - finishing-position counts per competitor
//!
//! Level 3 - Steps

use rustc_hash::FxHashMap;
use serde::Serialize;
use trumps_core::{Competitor, Result, SimError, Team};

/// Occurrence count per finishing rank, rank 1 first
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankCounts {
    counts: Vec<u64>,
}

impl RankCounts {
    /// All-zero counts for ranks `1..=field_size`
    pub fn zeroed(field_size: usize) -> Self {
        Self {
            counts: vec![0; field_size],
        }
    }

    /// Count at `rank` (1 = best); 0 for ranks outside the field
    pub fn get(&self, rank: usize) -> u64 {
        rank.checked_sub(1)
            .and_then(|i| self.counts.get(i))
            .copied()
            .unwrap_or(0)
    }

    pub fn increment(&mut self, rank: usize) {
        self.counts[rank - 1] += 1;
    }

    /// Sum of counts over an inclusive rank range
    pub fn sum_ranks(&self, ranks: std::ops::RangeInclusive<usize>) -> u64 {
        ranks.map(|r| self.get(r)).sum()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(rank, count)` pairs, best rank first
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts.iter().enumerate().map(|(i, &c)| (i + 1, c))
    }

    fn merge(&mut self, other: &RankCounts) {
        if other.counts.len() > self.counts.len() {
            self.counts.resize(other.counts.len(), 0);
        }
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += theirs;
        }
    }
}

/// Finishing-rank counts for every competitor across all trials
///
/// Every competitor name is registered with zero counts up front.
/// Competitors sharing a name share one entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankTally {
    field_size: usize,
    trials: u64,
    ranks: FxHashMap<String, RankCounts>,
}

impl RankTally {
    /// Empty tally for brackets of `field_size` teams
    pub fn new<'n, I>(names: I, field_size: usize) -> Self
    where
        I: IntoIterator<Item = &'n str>,
    {
        let ranks = names
            .into_iter()
            .map(|name| (name.to_string(), RankCounts::zeroed(field_size)))
            .collect();
        Self {
            field_size,
            trials: 0,
            ranks,
        }
    }

    pub fn for_competitors(competitors: &[Competitor], field_size: usize) -> Self {
        Self::new(competitors.iter().map(|c| c.name()), field_size)
    }

    /// Record one trial's elimination order (first out first, champion last).
    ///
    /// The team at position `i` finishes at rank `len - i`; every member
    /// shares the team's rank. The order must hold exactly `field_size`
    /// teams made of registered names, otherwise the tally is left
    /// untouched and an error is returned.
    pub fn record(&mut self, elimination_order: &[Team<'_>]) -> Result<()> {
        let n = elimination_order.len();
        if n != self.field_size {
            return Err(SimError::FieldSizeMismatch {
                tally: self.field_size,
                requested: n,
            });
        }
        if let Some(name) = elimination_order
            .iter()
            .flat_map(|team| team.names())
            .find(|name| !self.ranks.contains_key(*name))
        {
            return Err(SimError::UnknownCompetitor(name.to_string()));
        }

        for (i, team) in elimination_order.iter().enumerate() {
            let rank = n - i;
            for name in team.names() {
                if let Some(counts) = self.ranks.get_mut(name) {
                    counts.increment(rank);
                }
            }
        }
        self.trials += 1;
        Ok(())
    }

    /// Combine two partial tallies. Addition per name and rank, so the
    /// order in which partial tallies are merged does not matter.
    pub fn merge(mut self, other: RankTally) -> RankTally {
        self.field_size = self.field_size.max(other.field_size);
        self.trials += other.trials;
        for (name, counts) in other.ranks {
            self.ranks
                .entry(name)
                .and_modify(|mine| mine.merge(&counts))
                .or_insert(counts);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&RankCounts> {
        self.ranks.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RankCounts)> + '_ {
        self.ranks.iter().map(|(name, counts)| (name.as_str(), counts))
    }

    /// Number of teams per bracket
    pub fn field_size(&self) -> usize {
        self.field_size
    }

    /// Number of trials recorded
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Number of distinct competitor names
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trumps_core::{Attribute, Schema};

    fn competitors(names: &[&str]) -> Vec<Competitor> {
        let schema = Schema::new(vec![Attribute::higher("x")]);
        names
            .iter()
            .map(|n| Competitor::new(*n, vec![0.0], &schema).unwrap())
            .collect()
    }

    #[test]
    fn test_new_tally_is_zeroed() {
        let tally = RankTally::new(["a", "b", "c"], 3);
        assert_eq!(tally.len(), 3);
        assert_eq!(tally.trials(), 0);
        for (_, counts) in tally.iter() {
            assert_eq!(counts.total(), 0);
            assert_eq!(counts.iter().count(), 3);
        }
    }

    #[test]
    fn test_record_solo_ranks() {
        let field = competitors(&["a", "b", "c"]);
        let mut tally = RankTally::for_competitors(&field, 3);

        // b out first, then c, a champion
        let order = vec![Team::solo(&field[1]), Team::solo(&field[2]), Team::solo(&field[0])];
        tally.record(&order).unwrap();

        assert_eq!(tally.trials(), 1);
        assert_eq!(tally.get("a").unwrap().get(1), 1);
        assert_eq!(tally.get("c").unwrap().get(2), 1);
        assert_eq!(tally.get("b").unwrap().get(3), 1);
        assert_eq!(tally.get("b").unwrap().get(1), 0);
    }

    #[test]
    fn test_record_team_members_share_rank() {
        let field = competitors(&["a", "b", "c", "d"]);
        let mut tally = RankTally::for_competitors(&field, 2);

        let order = vec![
            Team::new(vec![&field[0], &field[3]]).unwrap(),
            Team::new(vec![&field[1], &field[2]]).unwrap(),
        ];
        tally.record(&order).unwrap();

        assert_eq!(tally.get("a").unwrap().get(2), 1);
        assert_eq!(tally.get("d").unwrap().get(2), 1);
        assert_eq!(tally.get("b").unwrap().get(1), 1);
        assert_eq!(tally.get("c").unwrap().get(1), 1);
    }

    #[test]
    fn test_record_rejects_unregistered_name() {
        let field = competitors(&["a", "b", "stranger"]);
        let mut tally = RankTally::new(["a", "b"], 2);
        let before = tally.clone();

        let order = vec![Team::solo(&field[0]), Team::solo(&field[2])];
        assert_eq!(
            tally.record(&order).unwrap_err(),
            SimError::UnknownCompetitor("stranger".to_string())
        );
        assert_eq!(tally, before);
        assert_eq!(tally.get("a").unwrap().total(), 0);
    }

    #[test]
    fn test_record_rejects_wrong_field_size() {
        let field = competitors(&["a", "b", "c"]);
        let mut tally = RankTally::for_competitors(&field, 3);

        let short = vec![Team::solo(&field[0]), Team::solo(&field[1])];
        assert_eq!(
            tally.record(&short).unwrap_err(),
            SimError::FieldSizeMismatch {
                tally: 3,
                requested: 2,
            }
        );
        assert_eq!(tally.trials(), 0);

        let long: Vec<Team> = field.iter().chain(&field[..1]).map(Team::solo).collect();
        assert!(tally.record(&long).is_err());
        assert_eq!(tally.trials(), 0);
        assert!(tally.iter().all(|(_, counts)| counts.total() == 0));
    }

    #[test]
    fn test_merge_is_additive() {
        let field = competitors(&["a", "b"]);
        let first = vec![Team::solo(&field[0]), Team::solo(&field[1])];
        let second = vec![Team::solo(&field[1]), Team::solo(&field[0])];

        let mut left = RankTally::for_competitors(&field, 2);
        left.record(&first).unwrap();
        let mut right = RankTally::for_competitors(&field, 2);
        right.record(&second).unwrap();
        right.record(&second).unwrap();

        let merged = left.clone().merge(right.clone());
        assert_eq!(merged, right.merge(left));
        assert_eq!(merged.trials(), 3);
        assert_eq!(merged.get("a").unwrap().get(1), 2);
        assert_eq!(merged.get("a").unwrap().get(2), 1);
        assert_eq!(merged.get("b").unwrap().total(), 3);
    }

    #[test]
    fn test_rank_counts_accessors() {
        let mut counts = RankCounts::zeroed(4);
        counts.increment(1);
        counts.increment(3);
        counts.increment(3);
        assert_eq!(counts.get(0), 0);
        assert_eq!(counts.get(3), 2);
        assert_eq!(counts.get(9), 0);
        assert_eq!(counts.sum_ranks(2..=4), 2);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_serialize_tally() {
        let tally = RankTally::new(["solo"], 2);
        let json = serde_json::to_value(&tally).unwrap();
        assert_eq!(json["field_size"], 2);
        assert_eq!(json["ranks"]["solo"], serde_json::json!([0, 0]));
    }
}
