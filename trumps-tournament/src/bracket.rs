//! Bracket execution - one full single-elimination trial
//!
//! Level 3 - Steps

use rand::seq::SliceRandom;
use rand::Rng;
use trumps_core::{resolve, Resolution, Result, Schema, Team};

/// Outcome of one bracket round
#[derive(Clone, Debug)]
pub struct RoundResult<'a> {
    /// Bye team (if any) followed by match winners
    pub winners: Vec<Team<'a>>,
    /// Match losers in the order their matches were resolved
    pub losers: Vec<Team<'a>>,
}

/// Play one round over the active field.
///
/// The field is shuffled; an odd field sends one random team straight
/// through, the rest are paired off in shuffled order.
pub fn play_round<'a, R: Rng + ?Sized>(
    mut field: Vec<Team<'a>>,
    schema: &Schema,
    resolution: Resolution,
    rng: &mut R,
) -> Result<RoundResult<'a>> {
    field.shuffle(rng);

    let mut winners = Vec::with_capacity(field.len() / 2 + 1);
    let mut losers = Vec::with_capacity(field.len() / 2);

    if field.len() % 2 == 1 {
        // Shuffled, so the last team is a uniform pick
        if let Some(bye) = field.pop() {
            winners.push(bye);
        }
    }

    let mut pairs = field.into_iter();
    while let (Some(a), Some(b)) = (pairs.next(), pairs.next()) {
        let (winner, loser) = resolve(a, b, schema, resolution, rng)?.into_pair();
        winners.push(winner);
        losers.push(loser);
    }

    Ok(RoundResult { winners, losers })
}

/// Run a full bracket and return the elimination order.
///
/// The first entry was eliminated first, the last entry is the champion.
/// Teams knocked out in the same round keep their resolution order, which
/// is a product of the shuffle and carries no ranking meaning. A field of
/// one is its own champion without playing.
pub fn run_trial<'a, R: Rng + ?Sized>(
    teams: Vec<Team<'a>>,
    schema: &Schema,
    resolution: Resolution,
    rng: &mut R,
) -> Result<Vec<Team<'a>>> {
    let mut order = Vec::with_capacity(teams.len());
    let mut field = teams;

    loop {
        if field.len() <= 1 {
            order.append(&mut field);
            return Ok(order);
        }

        let round = play_round(field, schema, resolution, rng)?;
        order.extend(round.losers);
        field = round.winners;
    }
}
