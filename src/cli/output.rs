//! Output formatting utilities
//!
//! Provides table, JSON and compact output for the temperature report.

use crate::cli::args::OutputFormat;
use crate::domain::{TemperatureReport, Vendor};
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_output(&mut handle, data, format)
}

/// Format output into any writer
pub fn write_output<W: Write, T: Serialize + TableDisplay>(
    out: &mut W,
    data: &T,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(out, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(out, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

impl TableDisplay for TemperatureReport {
    fn to_table(&self) -> String {
        Vendor::ALL
            .iter()
            .map(|vendor| {
                format!(
                    "{} temperature: {} C",
                    vendor,
                    self.celsius_or_zero(*vendor)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_compact(&self) -> String {
        let (nvidia, amd) = self.as_pair();
        format!("nvidia={} amd={}", nvidia, amd)
    }
}
