use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::{PivotRow, ReferenceTable};
use crate::cli::{fmt_opt, load_report, parser_config, OutputFormat};
use crate::core::record::ReferenceRecord;
use crate::parsing::report::ParseIssue;

#[derive(Args)]
pub struct InspectArgs {
    /// Calibration report (section-delimited text)
    #[arg(required = true)]
    pub report: PathBuf,

    /// Only show records for this instrument (exact name)
    #[arg(long, conflicts_with = "complete")]
    pub instrument: Option<String>,

    /// Show per-sample means of instruments that report all ten samples
    #[arg(long)]
    pub complete: bool,

    /// Label "Reagent Groups" records as method groups
    #[arg(long)]
    pub alias_reagent_as_method: bool,
}

/// Execute inspect subcommand
///
/// # Errors
///
/// Returns an error if the report cannot be read, or if `--instrument` names
/// an instrument the report does not list.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: InspectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (table, issues) = load_report(&args.report, parser_config(args.alias_reagent_as_method))?;

    if verbose {
        eprintln!(
            "Parsed {} records for {} instruments ({} issues)",
            table.len(),
            table.instruments().len(),
            issues.len()
        );
    }

    if args.complete {
        let pivot = table.pivot_complete();
        match format {
            OutputFormat::Text | OutputFormat::Tsv => print_pivot_tsv(&pivot),
            OutputFormat::Json => print_json(&serde_json::json!({
                "complete_instruments": pivot,
                "issues": issues,
            }))?,
        }
        return Ok(());
    }

    let records = select_records(&table, args.instrument.as_deref())?;
    match format {
        OutputFormat::Text => print_records_text(&records, &issues),
        OutputFormat::Tsv => print_records_tsv(&records),
        OutputFormat::Json => print_json(&serde_json::json!({
            "records": records,
            "issues": issues,
        }))?,
    }

    Ok(())
}

fn select_records<'a>(
    table: &'a ReferenceTable,
    instrument: Option<&str>,
) -> anyhow::Result<Vec<&'a ReferenceRecord>> {
    match instrument {
        Some(name) => {
            let records: Vec<_> = table.records_for(name).collect();
            if records.is_empty() {
                anyhow::bail!("Instrument '{name}' not found in report");
            }
            Ok(records)
        }
        None => Ok(table.records().iter().collect()),
    }
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_records_text(records: &[&ReferenceRecord], issues: &[ParseIssue]) {
    println!(
        "{:<32} {:>6} {:<16} {:>5} {:>10} {:>8} {:>17} {:>8}",
        "Instrument", "Sample", "Group", "Labs", "Mean", "SD", "Range", "U"
    );
    println!("{}", "─".repeat(110));

    for r in records {
        let range = format!("{}-{}", fmt_opt(r.low_range), fmt_opt(r.high_range));
        println!(
            "{:<32} {:>6} {:<16} {:>5} {:>10} {:>8} {:>17} {:>8}",
            r.instrument,
            format!("IA-{:02}", r.sample_number),
            r.group.to_string(),
            fmt_opt(r.lab_count),
            fmt_opt(r.mean),
            fmt_opt(r.std_dev),
            range,
            fmt_opt(r.uncertainty),
        );
    }

    if !issues.is_empty() {
        println!("\n{} parse issues:", issues.len());
        for issue in issues {
            println!("  {issue}");
        }
    }
}

fn print_records_tsv(records: &[&ReferenceRecord]) {
    println!("instrument\tsample\tgroup\tlabs\tmean\tsd\tlow\thigh\tuncertainty");
    for r in records {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.instrument,
            r.sample_number,
            r.group,
            fmt_opt(r.lab_count),
            fmt_opt(r.mean),
            fmt_opt(r.std_dev),
            fmt_opt(r.low_range),
            fmt_opt(r.high_range),
            fmt_opt(r.uncertainty),
        );
    }
}

fn print_pivot_tsv(pivot: &[PivotRow]) {
    let header: Vec<String> = (1..=pivot.first().map_or(10, |r| r.means.len()))
        .map(|s| format!("IA-{s:02}"))
        .collect();
    println!("instrument\t{}", header.join("\t"));

    for row in pivot {
        let means: Vec<String> = row.means.iter().map(|m| format!("{m:.4}")).collect();
        println!("{}\t{}", row.instrument, means.join("\t"));
    }
}
