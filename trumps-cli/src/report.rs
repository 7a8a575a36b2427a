//! Presentation of simulation results
//!
//! Level 4 - formatting utilities

use anyhow::Result;

use trumps_tournament::SimulationReport;

/// Round table: one row per competitor, `lost_1 .. lost_R` then `won`,
/// best winners first
pub fn format_table(report: &SimulationReport) -> String {
    let rounds = report.rounds.rounds();
    let rows = report.rounds.ranked();

    let name_width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .chain(std::iter::once(4))
        .max()
        .unwrap_or(4);
    let count_width = report.config.trials.to_string().len().max(7);

    let mut out = String::new();
    out.push_str(&format!("{:<width$}", "name", width = name_width));
    for round in 1..=rounds {
        out.push_str(&format!(" {:>width$}", format!("lost_{}", round), width = count_width));
    }
    out.push_str(&format!(" {:>width$}\n", "won", width = count_width));

    for (name, losses) in rows {
        out.push_str(&format!("{:<width$}", name, width = name_width));
        for count in &losses.lost {
            out.push_str(&format!(" {:>width$}", count, width = count_width));
        }
        out.push_str(&format!(" {:>width$}\n", losses.won, width = count_width));
    }

    out
}

pub fn format_json(report: &SimulationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
