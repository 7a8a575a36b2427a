//! Competitor - a named attribute vector

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::schema::Schema;

/// A named entity with one value per schema attribute
///
/// Fields are private so a competitor can only be built through
/// [`Competitor::new`], which checks the vector against the schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    name: String,
    values: Vec<f64>,
}

impl Competitor {
    /// Create a competitor, rejecting value vectors that don't match the schema length
    pub fn new(name: impl Into<String>, values: Vec<f64>, schema: &Schema) -> Result<Self> {
        let name = name.into();
        if values.len() != schema.len() {
            return Err(SimError::SchemaMismatch {
                name,
                got: values.len(),
                expected: schema.len(),
            });
        }
        Ok(Self { name, values })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
