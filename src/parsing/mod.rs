//! Parsers for calibration reports and sample files.
//!
//! - **Calibration reports** ([`report`]): section-delimited text listing, for
//!   each sample IA-01..IA-10 and each peer group, per-instrument statistics
//! - **Sample files** ([`samples`]): one measured concentration per line
//!
//! ## Example
//!
//! ```rust,no_run
//! use calib_match::parsing::report::{parse_report_file, ParserConfig};
//! use calib_match::parsing::samples::parse_sample_file;
//! use std::path::Path;
//!
//! let report = parse_report_file(Path::new("reference_data.txt"), ParserConfig::default()).unwrap();
//! for issue in &report.issues {
//!     eprintln!("{issue}");
//! }
//!
//! let samples = parse_sample_file(Path::new("sample_data.txt")).unwrap();
//! ```
//!
//! ## Data line columns
//!
//! | Column | Description |
//! |--------|-------------|
//! | name   | Instrument name, may span several tokens |
//! | labs   | Number of participating laboratories |
//! | mean   | Consensus mean |
//! | SD     | Standard deviation |
//! | range  | `low-high` acceptable range |
//! | U      | Standard uncertainty |

use thiserror::Error;

pub mod report;
pub mod samples;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("Too many records: {0} exceeds maximum allowed (100000)")]
    TooManyRecords(usize),

    #[error("Too many sample values: {0} exceeds maximum allowed (10000)")]
    TooManySamples(usize),
}
