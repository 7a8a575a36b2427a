//! Error taxonomy shared by the simulation crates

/// Errors raised by the simulation core
///
/// Every variant is a precondition violation. Nothing is retried and no
/// partial tally is produced once one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    #[error("attributes for {name} don't align, got {got}, expected {expected}")]
    SchemaMismatch {
        name: String,
        got: usize,
        expected: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("a team needs at least one member")]
    EmptyTeam,

    #[error("unknown team resolution '{0}' (expected max, sum or min)")]
    UnknownResolution(String),

    #[error("tally is sized for {tally} teams, got {requested}")]
    FieldSizeMismatch { tally: usize, requested: usize },

    #[error("competitor {0} is not registered in the tally")]
    UnknownCompetitor(String),
}

/// Result alias for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;
