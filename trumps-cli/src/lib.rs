//! Trumps CLI - load a roster, run the brackets, print the rounds
//!
//! - loader: delimited attribute file -> schema + competitors
//! - simulate_cmd: argument handling and run orchestration
//! - report: round table and JSON output

pub mod loader;
pub mod report;
pub mod simulate_cmd;
