//! Team assembly and attribute reduction

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::competitor::Competitor;
use crate::error::{Result, SimError};

/// How a team's member values collapse into one value per attribute
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Best member value counts
    #[default]
    Max,
    /// Member values add up
    Sum,
    /// Weakest member value counts
    Min,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::Max, Resolution::Sum, Resolution::Min];

    /// Reduce one attribute's member values into the team value.
    ///
    /// Callers pass at least one value; an empty input yields the
    /// reduction's identity (-inf, 0, +inf).
    pub fn reduce<I: IntoIterator<Item = f64>>(self, values: I) -> f64 {
        let values = values.into_iter();
        match self {
            Resolution::Max => values.fold(f64::NEG_INFINITY, f64::max),
            Resolution::Sum => values.sum(),
            Resolution::Min => values.fold(f64::INFINITY, f64::min),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::Max => "max",
            Resolution::Sum => "sum",
            Resolution::Min => "min",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" => Ok(Resolution::Max),
            "sum" => Ok(Resolution::Sum),
            "min" => Ok(Resolution::Min),
            _ => Err(SimError::UnknownResolution(s.to_string())),
        }
    }
}

/// A non-empty group of competitors playing as one side
#[derive(Clone, Debug, PartialEq)]
pub struct Team<'a> {
    members: Vec<&'a Competitor>,
}

impl<'a> Team<'a> {
    /// Build a team; every member must carry the same number of values
    pub fn new(members: Vec<&'a Competitor>) -> Result<Self> {
        let first = members.first().ok_or(SimError::EmptyTeam)?;
        check_widths(&members, first.values().len())?;
        Ok(Self { members })
    }

    /// A team of one
    pub fn solo(competitor: &'a Competitor) -> Self {
        Self {
            members: vec![competitor],
        }
    }

    pub fn members(&self) -> &[&'a Competitor] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Number of attribute values per member
    pub fn width(&self) -> usize {
        self.members[0].values().len()
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.members.iter().map(|c| c.name())
    }

    /// Per-attribute team values under the given reduction.
    ///
    /// Derived on demand, never stored. Members all have [`Team::width`]
    /// values.
    pub fn aggregate(&self, resolution: Resolution) -> Vec<f64> {
        (0..self.width())
            .map(|i| resolution.reduce(self.members.iter().map(|c| c.values()[i])))
            .collect()
    }
}

impl fmt::Display for Team<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

/// Reject the first competitor whose vector is not `expected` values wide
fn check_widths(competitors: &[&Competitor], expected: usize) -> Result<()> {
    match competitors.iter().find(|c| c.values().len() != expected) {
        Some(c) => Err(SimError::SchemaMismatch {
            name: c.name().to_string(),
            got: c.values().len(),
            expected,
        }),
        None => Ok(()),
    }
}

/// Shuffle the competitors and cut them into consecutive teams of `team_size`.
///
/// Every call produces a fresh random partition. Fails with
/// `InvalidConfiguration` for an empty field, a zero team size, or a team
/// size that doesn't divide the field evenly, and with `SchemaMismatch`
/// when the competitors' vectors differ in width.
pub fn make_teams<'a, R: Rng + ?Sized>(
    competitors: &'a [Competitor],
    team_size: usize,
    rng: &mut R,
) -> Result<Vec<Team<'a>>> {
    if competitors.is_empty() {
        return Err(SimError::InvalidConfiguration(
            "no competitors to build teams from".to_string(),
        ));
    }
    if team_size == 0 {
        return Err(SimError::InvalidConfiguration(
            "team size must be at least 1".to_string(),
        ));
    }
    if competitors.len() % team_size != 0 {
        return Err(SimError::InvalidConfiguration(format!(
            "{} competitors cannot be split into teams of {}",
            competitors.len(),
            team_size
        )));
    }

    let mut pool: Vec<&'a Competitor> = competitors.iter().collect();
    check_widths(&pool, competitors[0].values().len())?;
    pool.shuffle(rng);

    Ok(pool
        .chunks_exact(team_size)
        .map(|chunk| Team {
            members: chunk.to_vec(),
        })
        .collect())
}
