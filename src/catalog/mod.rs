//! In-memory table of parsed calibration report records.
//!
//! [`ReferenceTable`](store::ReferenceTable) keeps records in report order and
//! indexes them by instrument name. Its complete pivot (one mean per sample for
//! every instrument that reported all ten samples) feeds the distance criterion.
//!
//! ## Example
//!
//! ```rust,no_run
//! use calib_match::catalog::store::ReferenceTable;
//! use calib_match::parsing::report::{parse_report_file, ParserConfig};
//! use std::path::Path;
//!
//! let report = parse_report_file(Path::new("reference_data.txt"), ParserConfig::default()).unwrap();
//! let table = ReferenceTable::from(report.records);
//!
//! for row in table.pivot_complete() {
//!     println!("{}: {:?}", row.instrument, row.means);
//! }
//! ```

pub mod store;
