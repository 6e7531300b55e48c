//! Report writers: the persisted report and the console listing.

use std::io::{self, Write};

use clap::ValueEnum;
use concordance::{MaterializedContext, RankedConcordance, Side};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ReportFormat {
    /// `<Side, "raw text", count>` per line.
    Text,
    /// One JSON document with `left` and `right` arrays.
    Json,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    raw: &'a str,
    normalized: &'a str,
    count: u64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    left: Vec<JsonEntry<'a>>,
    right: Vec<JsonEntry<'a>>,
}

pub fn format_line(context: &MaterializedContext) -> String {
    format!(
        "<{}, \"{}\", {}>",
        context.side, context.raw_text, context.count
    )
}

/// Every entry, Left section then Right section, in ranked order.
pub fn write_report<W: Write>(
    out: &mut W,
    ranked: &RankedConcordance,
    format: ReportFormat,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => {
            for side in [Side::Left, Side::Right] {
                for context in ranked.side(side) {
                    writeln!(out, "{}", format_line(context))?;
                }
            }
        }
        ReportFormat::Json => {
            let report = JsonReport {
                left: json_entries(ranked.side(Side::Left)),
                right: json_entries(ranked.side(Side::Right)),
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn json_entries(contexts: &[MaterializedContext]) -> Vec<JsonEntry<'_>> {
    contexts
        .iter()
        .map(|c| JsonEntry {
            raw: &c.raw_text,
            normalized: &c.normalized_form,
            count: c.count,
        })
        .collect()
}

/// Entries with `count >= threshold`, each section preceded by a blank line.
pub fn write_console<W: Write>(
    out: &mut W,
    ranked: &RankedConcordance,
    threshold: u32,
) -> io::Result<()> {
    for side in [Side::Left, Side::Right] {
        writeln!(out)?;
        for context in ranked.visible(side, threshold) {
            writeln!(out, "{}", format_line(context))?;
        }
    }
    Ok(())
}
