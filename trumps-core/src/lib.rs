//! Trumps Core - Competitors, teams and head-to-head matches
//!
//! This crate provides the building blocks of a trumps bracket:
//! - Attribute schema (named attributes with a preferred direction)
//! - Competitors (named attribute vectors aligned to the schema)
//! - Team assembly and per-attribute reduction (max / sum / min)
//! - Match resolution by counting attributes won
//!
//! Nothing here performs I/O. Randomness is always supplied by the caller.

pub mod competitor;
pub mod error;
pub mod resolver;
pub mod schema;
pub mod team;

// Re-exports for convenient access
pub use competitor::Competitor;
pub use error::{Result, SimError};
pub use resolver::{attribute_score, resolve, MatchOutcome};
pub use schema::{Attribute, Direction, Schema};
pub use team::{make_teams, Resolution, Team};
