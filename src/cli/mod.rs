//! Command-line interface for calib-match.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **identify**: Find the instrument that best matches a sample file
//! - **inspect**: Show the records parsed from a calibration report
//!
//! ## Usage
//!
//! ```text
//! # Best match under all three criteria, 30% deviation threshold
//! calib-match identify reference_data.txt sample_data.txt
//!
//! # Top 5 per criterion, 15% threshold, JSON output
//! calib-match identify reference_data.txt sample_data.txt -p 15 -n 5 --format json
//!
//! # Instruments reporting all ten samples
//! calib-match inspect reference_data.txt --complete
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::catalog::store::ReferenceTable;
use crate::parsing::report::{parse_report_file, ParseIssue, ParserConfig, ReagentLabeling};

pub mod identify;
pub mod inspect;

#[derive(Parser)]
#[command(name = "calib-match")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Match sample concentrations against inter-laboratory calibration reports")]
#[command(
    long_about = "calib-match parses an inter-laboratory calibration report (per-instrument statistics for samples IA-01 to IA-10) and finds the instrument whose reference data best matches your measured sample concentrations.\n\nThree independent criteria are reported:\n- Lowest Euclidean distance between reference means and measured values\n- Most measured values inside the reference range\n- Most measured values within a percentage of the reference mean"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify the best-matching instrument for a sample file
    Identify(identify::IdentifyArgs),

    /// Show records parsed from a calibration report
    Inspect(inspect::InspectArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Parser configuration from the `--alias-reagent-as-method` flag
#[must_use]
pub fn parser_config(alias_reagent_as_method: bool) -> ParserConfig {
    ParserConfig {
        reagent_labeling: if alias_reagent_as_method {
            ReagentLabeling::AliasMethod
        } else {
            ReagentLabeling::Distinct
        },
    }
}

/// Parse a report file into a table, returning line-level issues alongside
///
/// # Errors
///
/// Returns an error if the file cannot be read or exceeds the record limit.
pub fn load_report(
    path: &Path,
    config: ParserConfig,
) -> anyhow::Result<(ReferenceTable, Vec<ParseIssue>)> {
    let report = parse_report_file(path, config)
        .map_err(|e| anyhow::anyhow!("Failed to parse report {}: {e}", path.display()))?;
    Ok((ReferenceTable::from(report.records), report.issues))
}

/// Format an optional value for text/TSV output
pub(crate) fn fmt_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
