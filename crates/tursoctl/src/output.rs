//! Output rendering: structured formats, tables, emphasis and spinners

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use comfy_table::presets::NOTHING;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;
use tursoctl_core::Database;

impl OutputFormat {
    /// True when the user asked for machine-readable output
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Json | Self::Yaml)
    }
}

/// Highlight an identifier in human-readable output
pub fn emph(text: &str) -> String {
    text.cyan().bold().to_string()
}

/// Print `data` as JSON or YAML
pub fn print_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
        _ => println!("{}", serde_json::to_string_pretty(data)?),
    }
    Ok(())
}

/// Build a borderless, left-aligned table with uppercase headers
pub fn build_table(header: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(header.iter().map(|h| h.to_uppercase()));

    for row in rows {
        table.add_row(row);
    }

    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Left);
    }

    table
}

pub fn print_table(header: &[&str], rows: Vec<Vec<String>>) {
    println!("{}", build_table(header, rows));
}

/// Comma-separated locations with the primary one emphasized and marked
pub fn format_regions(db: &Database) -> String {
    db.regions
        .iter()
        .map(|region| {
            if *region == db.primary_region {
                format!("{} (primary)", emph(region))
            } else {
                region.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Start a spinner on stderr; hidden automatically when stderr is not a terminal
pub fn start_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
