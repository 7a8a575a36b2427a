//! Match resolution - two teams, one winner
//!
//! Each attribute is worth exactly one point to whichever side is better at
//! it, regardless of the size of the gap. The side with the net positive
//! score wins. A net score of zero is settled by a fair coin.

use std::cmp::Ordering;

use rand::Rng;

use crate::error::{Result, SimError};
use crate::schema::{Direction, Schema};
use crate::team::{Resolution, Team};

/// Result of a single match
#[derive(Clone, Debug, PartialEq)]
pub struct MatchOutcome<'a> {
    pub winner: Team<'a>,
    pub loser: Team<'a>,
    /// Net attribute score from the first team's perspective
    pub score: i32,
    /// True when the score was zero and the coin decided
    pub coin_flip: bool,
}

impl<'a> MatchOutcome<'a> {
    pub fn into_pair(self) -> (Team<'a>, Team<'a>) {
        (self.winner, self.loser)
    }
}

/// Net attribute score of `a` against `b`.
///
/// Each attribute contributes the sign of the difference, flipped for
/// prefer-lower attributes. Incomparable values (NaN) contribute 0.
pub fn attribute_score(a: &[f64], b: &[f64], schema: &Schema) -> i32 {
    a.iter()
        .zip(b)
        .zip(schema.directions())
        .map(|((&av, &bv), direction)| {
            let (av, bv) = match direction {
                Direction::Higher => (av, bv),
                Direction::Lower => (bv, av),
            };
            match av.partial_cmp(&bv) {
                Some(Ordering::Greater) => 1,
                Some(Ordering::Less) => -1,
                _ => 0,
            }
        })
        .sum()
}

/// Play `a` against `b`.
///
/// Deterministic unless the net score is zero, in which case exactly one
/// random decision is drawn from `rng`. Both teams must carry exactly one
/// value per schema attribute.
pub fn resolve<'a, R: Rng + ?Sized>(
    a: Team<'a>,
    b: Team<'a>,
    schema: &Schema,
    resolution: Resolution,
    rng: &mut R,
) -> Result<MatchOutcome<'a>> {
    check_width(&a, schema)?;
    check_width(&b, schema)?;

    let score = attribute_score(&a.aggregate(resolution), &b.aggregate(resolution), schema);

    let (a_wins, coin_flip) = match score.cmp(&0) {
        Ordering::Greater => (true, false),
        Ordering::Less => (false, false),
        Ordering::Equal => (rng.gen_bool(0.5), true),
    };

    let (winner, loser) = if a_wins { (a, b) } else { (b, a) };
    Ok(MatchOutcome {
        winner,
        loser,
        score,
        coin_flip,
    })
}

fn check_width(team: &Team<'_>, schema: &Schema) -> Result<()> {
    if team.width() != schema.len() {
        return Err(SimError::SchemaMismatch {
            name: team.to_string(),
            got: team.width(),
            expected: schema.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competitor::Competitor;
    use crate::schema::Attribute;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn schema() -> Schema {
        Schema::new(vec![
            Attribute::higher("power"),
            Attribute::lower("weight"),
            Attribute::higher("speed"),
        ])
    }

    fn card(name: &str, values: [f64; 3]) -> Competitor {
        Competitor::new(name, values.to_vec(), &schema()).unwrap()
    }

    #[test]
    fn test_attribute_score_directions() {
        let s = schema();
        // power: a wins, weight (lower): a wins, speed: b wins
        assert_eq!(attribute_score(&[5.0, 1.0, 1.0], &[4.0, 2.0, 2.0], &s), 1);
        assert_eq!(attribute_score(&[4.0, 2.0, 2.0], &[5.0, 1.0, 1.0], &s), -1);
        assert_eq!(attribute_score(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0], &s), 0);
    }

    #[test]
    fn test_attribute_score_ignores_magnitude() {
        let s = schema();
        // a crushes power by 1000 but loses the other two narrowly
        assert_eq!(attribute_score(&[1000.0, 2.0, 0.9], &[0.0, 1.9, 1.0], &s), -1);
    }

    #[test]
    fn test_attribute_score_nan_is_neutral() {
        let s = schema();
        assert_eq!(attribute_score(&[f64::NAN, 1.0, 1.0], &[0.0, 1.0, 1.0], &s), 0);
    }

    #[test]
    fn test_resolve_deterministic_winner() {
        let s = schema();
        let strong = card("strong", [9.0, 1.0, 9.0]);
        let weak = card("weak", [1.0, 9.0, 1.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let outcome = resolve(Team::solo(&strong), Team::solo(&weak), &s, Resolution::Max, &mut rng).unwrap();
        assert_eq!(outcome.winner.to_string(), "strong");
        assert_eq!(outcome.score, 3);
        assert!(!outcome.coin_flip);

        let outcome = resolve(Team::solo(&weak), Team::solo(&strong), &s, Resolution::Max, &mut rng).unwrap();
        assert_eq!(outcome.winner.to_string(), "strong");
        assert_eq!(outcome.loser.to_string(), "weak");
        assert_eq!(outcome.score, -3);
    }

    #[test]
    fn test_resolve_is_antisymmetric() {
        let s = schema();
        let a = card("a", [3.0, 2.0, 1.0]);
        let b = card("b", [2.0, 2.5, 0.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let (w1, l1) = resolve(Team::solo(&a), Team::solo(&b), &s, Resolution::Max, &mut rng)
            .unwrap()
            .into_pair();
        let (w2, l2) = resolve(Team::solo(&b), Team::solo(&a), &s, Resolution::Max, &mut rng)
            .unwrap()
            .into_pair();
        assert_eq!(w1, w2);
        assert_eq!(l1, l2);
    }

    #[test]
    fn test_resolve_tie_is_fair_coin() {
        let s = schema();
        let a = card("a", [1.0, 1.0, 1.0]);
        let b = card("b", [1.0, 1.0, 1.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(12345);

        let trials = 20_000;
        let mut a_wins = 0;
        for _ in 0..trials {
            let outcome = resolve(Team::solo(&a), Team::solo(&b), &s, Resolution::Max, &mut rng).unwrap();
            assert!(outcome.coin_flip);
            if outcome.winner.to_string() == "a" {
                a_wins += 1;
            }
        }

        let rate = a_wins as f64 / trials as f64;
        assert!((rate - 0.5).abs() < 0.02, "tie-break win rate was {}", rate);
    }

    #[test]
    fn test_resolve_uses_team_resolution() {
        let s = Schema::new(vec![Attribute::higher("x")]);
        let c = |name: &str, v: f64| Competitor::new(name, vec![v], &s).unwrap();
        let (p, q, r, t) = (c("p", 10.0), c("q", 0.0), c("r", 6.0), c("t", 6.0));
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let pq = || Team::new(vec![&p, &q]).unwrap();
        let rt = || Team::new(vec![&r, &t]).unwrap();

        // max: 10 vs 6, sum: 10 vs 12, min: 0 vs 6
        let winner = |resolution, rng: &mut ChaCha8Rng| resolve(pq(), rt(), &s, resolution, rng).unwrap().winner;
        assert_eq!(winner(Resolution::Max, &mut rng), pq());
        assert_eq!(winner(Resolution::Sum, &mut rng), rt());
        assert_eq!(winner(Resolution::Min, &mut rng), rt());
    }

    #[test]
    fn test_resolve_rejects_schema_width_mismatch() {
        let x = card("x", [5.0, 0.0, 0.0]);
        let y = card("y", [1.0, 9.0, 9.0]);
        let narrow = Schema::new(vec![Attribute::higher("power")]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let err = resolve(Team::solo(&x), Team::solo(&y), &narrow, Resolution::Max, &mut rng).unwrap_err();
        assert_eq!(
            err,
            SimError::SchemaMismatch {
                name: "x".to_string(),
                got: 3,
                expected: 1,
            }
        );

        let wide = Schema::new(vec![Attribute::higher("a"); 4]);
        assert!(matches!(
            resolve(Team::solo(&x), Team::solo(&y), &wide, Resolution::Sum, &mut rng),
            Err(SimError::SchemaMismatch { got: 3, expected: 4, .. })
        ));
    }
}
