//! # calib-match
//!
//! A library for identifying which reference instrument a set of measured
//! sample concentrations most closely matches.
//!
//! Inter-laboratory calibration surveys publish, for each of ten samples
//! (IA-01 .. IA-10), per-instrument statistics: number of labs, mean, standard
//! deviation, acceptable range and uncertainty. Given your own measurements of
//! the same ten samples, `calib-match` parses the survey report and ranks the
//! reported instruments by three independent criteria.
//!
//! ## Features
//!
//! - **Section-aware parsing**: rows are tagged with the sample and peer group
//!   section they appear under
//! - **Best-effort extraction**: malformed lines and unparsable fields are
//!   reported, not fatal
//! - **Euclidean distance**: closest instrument over all ten sample means
//! - **Range counting**: most samples inside the reported acceptable range
//! - **Percent counting**: most samples within a percentage of the mean
//!
//! ## Example
//!
//! ```rust,no_run
//! use calib_match::{MatchEngine, ReferenceTable};
//! use calib_match::parsing::report::{parse_report_file, ParserConfig};
//! use calib_match::parsing::samples::parse_sample_file;
//! use std::path::Path;
//!
//! let report = parse_report_file(Path::new("reference_data.txt"), ParserConfig::default()).unwrap();
//! let table = ReferenceTable::from(report.records);
//! let samples = parse_sample_file(Path::new("sample_data.txt")).unwrap();
//!
//! let engine = MatchEngine::new(&table, &samples);
//! if let Ok(best) = engine.closest_by_euclidean() {
//!     println!("{}: {:.4}", best.instrument, best.score);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Reference table storage, indexing and pivoting
//! - [`core`]: Core data types for records, samples and groups
//! - [`matching`]: Matching engine and per-record evaluation
//! - [`parsing`]: Parsers for calibration reports and sample files
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::ReferenceTable;
pub use crate::core::record::ReferenceRecord;
pub use crate::core::sample::SampleVector;
pub use crate::core::types::*;
pub use matching::engine::{MatchConfig, MatchEngine, MatchError, MatchReport};
