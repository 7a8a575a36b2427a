//! Attribute schema - the ordered list of compared attributes

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of an attribute comparison is better
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Larger values win the attribute
    #[default]
    Higher,
    /// Smaller values win the attribute
    Lower,
}

impl Direction {
    /// Marker character used in delimited-file headers
    pub fn marker(self) -> char {
        match self {
            Direction::Higher => '+',
            Direction::Lower => '-',
        }
    }
}

/// A named attribute and its comparison direction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub direction: Direction,
}

impl Attribute {
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }

    pub fn higher(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Higher)
    }

    pub fn lower(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Lower)
    }

    /// Parse a header cell.
    ///
    /// A trailing `-` marks the attribute as prefer-lower, a trailing `+`
    /// as prefer-higher. The marker is stripped from the name. Cells
    /// without a marker prefer higher values.
    pub fn from_header(cell: &str) -> Self {
        let cell = cell.trim();
        if let Some(name) = cell.strip_suffix('-') {
            Self::lower(name.trim_end())
        } else if let Some(name) = cell.strip_suffix('+') {
            Self::higher(name.trim_end())
        } else {
            Self::higher(cell)
        }
    }
}

/// Renders in header form, so `from_header` reads it back unchanged
impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.direction.marker())
    }
}

/// Ordered attribute schema, fixed for the whole run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    /// Build a schema from header cells (see [`Attribute::from_header`])
    pub fn from_headers<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            cells
                .into_iter()
                .map(|c| Attribute::from_header(c.as_ref()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.attributes.iter().map(|a| a.direction)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.attributes.iter().map(|a| a.name.as_str())
    }
}
