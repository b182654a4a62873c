//! Identify command - find the instrument whose reference data best matches
//! a sample file, under each of the three criteria.

use std::fmt::Display;
use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_report, parser_config, OutputFormat};
use crate::core::types::GroupKind;
use crate::matching::engine::{MatchConfig, MatchEngine, MatchError, MatchReport, DEFAULT_PERCENT};
use crate::matching::scoring::InstrumentScore;
use crate::parsing::samples::parse_sample_file;
use crate::utils::validation::parse_percent;

#[derive(Args)]
pub struct IdentifyArgs {
    /// Calibration report (section-delimited text)
    #[arg(required = true)]
    pub report: PathBuf,

    /// Sample file: one measured concentration per line, samples numbered from 1
    #[arg(required = true)]
    pub samples: PathBuf,

    /// Allowed deviation from the reference mean, in percent
    #[arg(short, long, default_value_t = DEFAULT_PERCENT, value_parser = parse_percent)]
    pub percent: f64,

    /// Number of ranked instruments to show per criterion
    #[arg(short = 'n', long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub top: u32,

    /// Only compare records reported under one group section
    #[arg(long, value_enum)]
    pub group: Option<GroupKind>,

    /// Label "Reagent Groups" records as method groups
    #[arg(long)]
    pub alias_reagent_as_method: bool,
}

/// Execute identify subcommand
///
/// Each criterion is reported on its own; a criterion with no match prints
/// its reason and does not stop the others.
///
/// # Errors
///
/// Returns an error if either input file cannot be read or parsed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: IdentifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (table, issues) = load_report(&args.report, parser_config(args.alias_reagent_as_method))?;
    let table = match args.group {
        Some(group) => table.filter_group(group),
        None => table,
    };

    if verbose {
        eprintln!(
            "Parsed {} records for {} instruments ({} issues)",
            table.len(),
            table.instruments().len(),
            issues.len()
        );
    }

    let samples = parse_sample_file(&args.samples).map_err(|e| {
        anyhow::anyhow!("Failed to parse sample file {}: {e}", args.samples.display())
    })?;

    if verbose {
        eprintln!("Loaded {} sample values", samples.len());
    }

    let config = MatchConfig {
        percent: args.percent,
        top: args.top as usize,
    };
    let report = MatchEngine::new(&table, &samples).run(&config);

    match format {
        OutputFormat::Text => print_text_report(&report),
        OutputFormat::Json => print_json_report(&report, issues.len())?,
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

fn print_text_report(report: &MatchReport) {
    print_text_criterion(
        "Instrument with lowest Euclidean distance",
        &report.euclidean,
        |d| format!("distance {d:.4}"),
    );
    print_text_criterion(
        "Instrument with most sample values within reference range",
        &report.within_bounds,
        |n| format!("{n} within range"),
    );
    print_text_criterion(
        &format!(
            "Instrument with most sample values within {}% of the mean",
            report.percent
        ),
        &report.within_percent,
        |n| format!("{n} within {}%", report.percent),
    );
}

fn print_text_criterion<T: Copy>(
    label: &str,
    ranked: &Result<Vec<InstrumentScore<T>>, MatchError>,
    describe: impl Fn(T) -> String,
) {
    match ranked {
        Ok(ranked) => {
            let Some((best, rest)) = ranked.split_first() else {
                println!("{label}: none");
                return;
            };
            println!("{label}: {} with {}", best.instrument, describe(best.score));
            for (i, entry) in rest.iter().enumerate() {
                println!("   {}. {} ({})", i + 2, entry.instrument, describe(entry.score));
            }
        }
        Err(e) => println!("{label}: none ({e})"),
    }
}

fn criterion_json<T: serde::Serialize>(
    ranked: &Result<Vec<InstrumentScore<T>>, MatchError>,
) -> serde_json::Value {
    match ranked {
        Ok(ranked) => serde_json::json!({
            "best": ranked.first(),
            "ranked": ranked,
        }),
        Err(e) => serde_json::json!({ "error": e.to_string() }),
    }
}

fn print_json_report(report: &MatchReport, issue_count: usize) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "euclidean": criterion_json(&report.euclidean),
        "within_bounds": criterion_json(&report.within_bounds),
        "within_percent": {
            "percent": report.percent,
            "result": criterion_json(&report.within_percent),
        },
        "parse_issues": issue_count,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_report(report: &MatchReport) {
    println!("criterion\trank\tinstrument\tscore\terror");
    print_tsv_rows("euclidean", &report.euclidean, |d| format!("{d:.4}"));
    print_tsv_rows("within_bounds", &report.within_bounds, |n| n.to_string());
    print_tsv_rows("within_percent", &report.within_percent, |n| n.to_string());
}

fn print_tsv_rows<T: Copy + Display>(
    criterion: &str,
    ranked: &Result<Vec<InstrumentScore<T>>, MatchError>,
    score: impl Fn(T) -> String,
) {
    match ranked {
        Ok(ranked) => {
            for (i, entry) in ranked.iter().enumerate() {
                println!(
                    "{criterion}\t{}\t{}\t{}\t",
                    i + 1,
                    entry.instrument,
                    score(entry.score)
                );
            }
        }
        Err(e) => println!("{criterion}\t\t\t\t{e}"),
    }
}
