//! Parser for section-delimited calibration reports.
//!
//! A report interleaves section headers with whitespace-separated data lines:
//!
//! ```text
//! SAMPLE IA-01
//! All Participants
//! Peer Group
//! Analyzer X   12   10.0   0.5   8.0-12.0   0.14
//! Instrument Groups
//! ...
//! ```
//!
//! The parser is a single forward pass. Each data line is tagged with the
//! sample and group section most recently opened above it.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::record::ReferenceRecord;
use crate::core::types::{GroupKind, SampleNumber, SAMPLE_COUNT};
use crate::parsing::ParseError;
use crate::utils::validation::check_record_limit;

/// Prefix of a sample section header; followed by a two-digit sample number
const SAMPLE_MARKER: &str = "SAMPLE IA-";

/// Marker line for the all-participants summary, which carries no data
const ALL_PARTICIPANTS_MARKER: &str = "All Participants";

/// Number of numeric columns after the instrument name (range counted twice)
const NUMERIC_FIELD_COUNT: usize = 6;

/// How "Reagent Groups" sections are labelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReagentLabeling {
    /// Reagent sections produce `GroupKind::Reagent` records
    #[default]
    Distinct,
    /// Reagent sections are labelled `GroupKind::Method`, as older tooling did
    AliasMethod,
}

/// Parser configuration
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    pub reagent_labeling: ReagentLabeling,
}

/// Numeric column of a data line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    LabCount,
    Mean,
    StdDev,
    LowRange,
    HighRange,
    Uncertainty,
}

impl std::fmt::Display for NumericField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::LabCount => "lab count",
            Self::Mean => "mean",
            Self::StdDev => "standard deviation",
            Self::LowRange => "low range",
            Self::HighRange => "high range",
            Self::Uncertainty => "uncertainty",
        };
        write!(f, "{name}")
    }
}

/// A non-fatal problem found on one line. Line numbers are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseIssue {
    #[error("line {line}: data line appears before any SAMPLE IA-NN section")]
    MalformedDataLine { line: usize },

    #[error("line {line}: data line appears before any group section")]
    NoActiveGroup { line: usize },

    #[error("line {line}: expected instrument name and 6 numeric fields, found {found} tokens")]
    TooFewFields { line: usize, found: usize },

    #[error("line {line}: data line has no instrument name")]
    MissingInstrumentName { line: usize },

    #[error("line {line}: unparsable {field} value '{token}'")]
    UnparsableNumericField {
        line: usize,
        field: NumericField,
        token: String,
    },
}

/// Which section is currently open. `None` means no header has been seen yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseState {
    pub sample: Option<SampleNumber>,
    pub group: Option<GroupKind>,
}

/// Output of a parse pass
#[derive(Debug, Clone, Default)]
pub struct ParsedReport {
    /// One record per accepted data line, in file order
    pub records: Vec<ReferenceRecord>,

    /// Anomalies, in file order
    pub issues: Vec<ParseIssue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Sample(SampleNumber),
    Group(GroupKind),
    Ignored,
    Data,
}

/// Raw tokens of a data line, split into name and numeric columns
#[derive(Debug, PartialEq)]
struct DataFields<'a> {
    name: String,
    lab_count: &'a str,
    mean: &'a str,
    std_dev: &'a str,
    low_range: &'a str,
    high_range: &'a str,
    uncertainty: &'a str,
}

/// Single-pass report parser
#[derive(Debug, Clone, Default)]
pub struct ReportParser {
    config: ParserConfig,
}

impl ReportParser {
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse report lines in order.
    ///
    /// Line-level anomalies are collected in [`ParsedReport::issues`] and
    /// logged; parsing continues past them.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::TooManyRecords` if the report exceeds the record limit.
    pub fn parse<'a, I>(&self, lines: I) -> Result<ParsedReport, ParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = ParseState::default();
        let mut report = ParsedReport::default();

        for (i, line) in lines.into_iter().enumerate() {
            let line_num = i + 1;

            match self.classify(line) {
                LineKind::Sample(sample) => state.sample = Some(sample),
                LineKind::Group(group) => state.group = Some(group),
                LineKind::Ignored => {}
                LineKind::Data => {
                    let outcome = parse_data_line(line, line_num, state);
                    match outcome {
                        Ok((record, field_issues)) => {
                            if check_record_limit(report.records.len()).is_some() {
                                return Err(ParseError::TooManyRecords(report.records.len()));
                            }
                            report.records.push(record);
                            report.issues.extend(field_issues);
                        }
                        Err(issue) => report.issues.push(issue),
                    }
                }
            }
        }

        for issue in &report.issues {
            warn!("{issue}");
        }
        debug!(
            records = report.records.len(),
            issues = report.issues.len(),
            "Parsed calibration report"
        );

        Ok(report)
    }

    fn classify(&self, line: &str) -> LineKind {
        if let Some(sample) = sample_marker(line) {
            return LineKind::Sample(sample);
        }

        if let Some(group) = GroupKind::all()
            .into_iter()
            .find(|group| line.contains(group.header()))
        {
            return LineKind::Group(self.label(group));
        }

        if line.trim().is_empty() || line.contains(ALL_PARTICIPANTS_MARKER) {
            return LineKind::Ignored;
        }

        LineKind::Data
    }

    fn label(&self, group: GroupKind) -> GroupKind {
        match (group, self.config.reagent_labeling) {
            (GroupKind::Reagent, ReagentLabeling::AliasMethod) => GroupKind::Method,
            (group, _) => group,
        }
    }
}

/// Parse report text with the given configuration
///
/// # Errors
///
/// Returns `ParseError::TooManyRecords` if the report exceeds the record limit.
pub fn parse_report_text(text: &str, config: ParserConfig) -> Result<ParsedReport, ParseError> {
    ReportParser::new(config).parse(text.lines())
}

/// Read and parse a report file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::TooManyRecords` if the report exceeds the record limit.
pub fn parse_report_file(path: &Path, config: ParserConfig) -> Result<ParsedReport, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_report_text(&content, config)
}

/// Sample number from a `SAMPLE IA-NN` header, if the line is one
fn sample_marker(line: &str) -> Option<SampleNumber> {
    let start = line.find(SAMPLE_MARKER)? + SAMPLE_MARKER.len();
    let digits = line.get(start..start + 2)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let sample: SampleNumber = digits.parse().ok()?;
    (1..=SAMPLE_COUNT).contains(&sample).then_some(sample)
}

fn parse_data_line(
    line: &str,
    line_num: usize,
    state: ParseState,
) -> Result<(ReferenceRecord, Vec<ParseIssue>), ParseIssue> {
    let Some(sample) = state.sample else {
        return Err(ParseIssue::MalformedDataLine { line: line_num });
    };
    let Some(group) = state.group else {
        return Err(ParseIssue::NoActiveGroup { line: line_num });
    };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let fields = split_fields(&tokens).ok_or(ParseIssue::TooFewFields {
        line: line_num,
        found: tokens.len(),
    })?;
    if fields.name.is_empty() {
        return Err(ParseIssue::MissingInstrumentName { line: line_num });
    }

    let mut issues = Vec::new();
    let mut number = |token: &str, field: NumericField| -> Option<f64> {
        let value = token.parse::<f64>().ok().filter(|v| v.is_finite());
        if value.is_none() {
            issues.push(ParseIssue::UnparsableNumericField {
                line: line_num,
                field,
                token: token.to_string(),
            });
        }
        value
    };

    let mean = number(fields.mean, NumericField::Mean);
    let std_dev = number(fields.std_dev, NumericField::StdDev);
    let low_range = number(fields.low_range, NumericField::LowRange);
    let high_range = number(fields.high_range, NumericField::HighRange);
    let uncertainty = number(fields.uncertainty, NumericField::Uncertainty);

    let lab_count = fields.lab_count.parse::<u32>().ok();
    if lab_count.is_none() {
        issues.push(ParseIssue::UnparsableNumericField {
            line: line_num,
            field: NumericField::LabCount,
            token: fields.lab_count.to_string(),
        });
    }

    let record = ReferenceRecord {
        instrument: fields.name,
        sample_number: sample,
        group,
        lab_count,
        mean,
        std_dev,
        low_range,
        high_range,
        uncertainty,
    };
    if record.range().is_some() && !record.has_ordered_range() {
        debug!(line = line_num, instrument = %record.instrument, "Reference range low bound exceeds high bound");
    }

    Ok((record, issues))
}

/// Split tokens into the instrument name and the trailing numeric columns.
///
/// Only the range column is split on its hyphen, so negative values in the
/// other columns keep their sign.
fn split_fields<'a>(tokens: &[&'a str]) -> Option<DataFields<'a>> {
    let (uncertainty, rest) = tokens.split_last()?;
    let (low_range, high_range, rest) = split_range(rest)?;
    let [name @ .., lab_count, mean, std_dev] = rest else {
        return None;
    };

    Some(DataFields {
        name: name.join(" "),
        lab_count: *lab_count,
        mean: *mean,
        std_dev: *std_dev,
        low_range,
        high_range,
        uncertainty: *uncertainty,
    })
}

/// Take the range column off the end of `tokens`.
///
/// A joined `low-high` token in the range position always wins, so a lone `-`
/// placeholder in an earlier column is never mistaken for a range separator.
/// Otherwise the spaced spellings `low - high`, `low- high` and `low -high`
/// are accepted.
fn split_range<'t, 'a>(tokens: &'t [&'a str]) -> Option<(&'a str, &'a str, &'t [&'a str])> {
    let (last, head) = tokens.split_last()?;
    if let Some((low, high)) = split_hyphenated(*last) {
        return Some((low, high, head));
    }

    match tokens {
        [head @ .., low, "-", high] => Some((*low, *high, head)),
        [head @ .., low, high] => {
            let (low, high): (&'a str, &'a str) = (*low, *high);
            if let Some(low) = low.strip_suffix('-').filter(|s| !s.is_empty()) {
                return Some((low, high, head));
            }
            high.strip_prefix('-')
                .filter(|s| !s.is_empty())
                .map(|high| (low, high, head))
        }
        _ => None,
    }
}

/// Split `low-high` on its first interior hyphen.
///
/// A leading sign, a hyphen right after another hyphen (`-5--2`) and an
/// exponent sign (`1e-3`) are never separators. Either side may be
/// non-numeric; it is reported when parsed.
fn split_hyphenated(token: &str) -> Option<(&str, &str)> {
    let bytes = token.as_bytes();
    let is_numeric = |b: u8| b.is_ascii_digit() || b == b'.';
    let is_separator = |i: usize| {
        let prev = bytes[i - 1];
        let exponent = matches!(prev, b'e' | b'E') && i >= 2 && is_numeric(bytes[i - 2]);
        bytes[i] == b'-' && prev != b'-' && !exponent
    };

    // Both sides must be non-empty
    let idx = (1..bytes.len().saturating_sub(1)).find(|&i| is_separator(i))?;
    Some((&token[..idx], &token[idx + 1..]))
}
