use clap::ValueEnum;
use colored::*;
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Renders rows as a table, or as a JSON/YAML list. `empty` is shown
    /// instead of an empty table.
    pub fn render_rows<T: Tabled + Serialize>(&self, rows: &[T], empty: &str) -> String {
        match self {
            OutputFormat::Table if rows.is_empty() => empty.to_string(),
            OutputFormat::Table => Table::new(rows).to_string(),
            OutputFormat::Json => {
                serde_json::to_string_pretty(rows).unwrap_or_else(|e| e.to_string())
            }
            OutputFormat::Yaml => serde_yaml::to_string(rows).unwrap_or_else(|e| e.to_string()),
        }
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

pub fn print_progress(message: &str) {
    println!("{} {}", "⟳".cyan(), message);
}
