//! Roster loading from delimited attribute files
//!
//! The first row is the header. Its first cell labels the name column;
//! every other cell names an attribute, with a trailing `-` for "lower is
//! better". Each following row is one competitor: a name, then one number
//! per attribute.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

use trumps_core::{Competitor, Schema};

/// Attribute schema and the competitors loaded against it
#[derive(Clone, Debug)]
pub struct Roster {
    pub schema: Schema,
    pub competitors: Vec<Competitor>,
}

/// Load a roster from a file on disk
pub fn load_roster(path: &Path, delimiter: u8) -> Result<Roster> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_roster(file, delimiter).with_context(|| format!("Failed to load {}", path.display()))
}

/// Parse a roster from any reader
pub fn parse_roster<R: Read>(reader: R, delimiter: u8) -> Result<Roster> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to read header row")?.clone();
    if headers.len() < 2 {
        bail!("header needs a name column and at least one attribute column");
    }
    let schema = Schema::from_headers(headers.iter().skip(1));

    let mut competitors = Vec::new();
    for record in reader.records() {
        let record = record.context("Malformed row")?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.iter().all(str::is_empty) {
            continue;
        }

        let name = record.get(0).unwrap_or_default();
        let values = record
            .iter()
            .skip(1)
            .zip(schema.names().chain(std::iter::repeat("<extra>")))
            .map(|(cell, attr)| {
                cell.parse::<f64>().with_context(|| {
                    format!("line {}: '{}' for attribute '{}' is not a number", line, cell, attr)
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        let competitor =
            Competitor::new(name, values, &schema).with_context(|| format!("line {}", line))?;
        competitors.push(competitor);
    }

    Ok(Roster {
        schema,
        competitors,
    })
}
