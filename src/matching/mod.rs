//! Matching measured samples against calibration report records.
//!
//! Three independent criteria pick a best-matching instrument:
//!
//! 1. **Euclidean distance**: between the instrument's per-sample means and the
//!    measured values, over instruments that report all ten samples
//! 2. **Within range**: number of samples inside the instrument's reported
//!    `low-high` range (inclusive)
//! 3. **Within percent**: number of samples whose relative deviation from the
//!    instrument's mean is at most a given percentage
//!
//! Pairs that cannot be evaluated (no measured value, unparsable bounds or
//! mean, zero mean) never count toward an instrument and never disqualify it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use calib_match::{MatchConfig, MatchEngine, ReferenceTable, SampleVector};
//!
//! let table = ReferenceTable::new();
//! let samples = SampleVector::from_values([9.8, 20.1, 30.4]);
//!
//! let engine = MatchEngine::new(&table, &samples);
//! let report = engine.run(&MatchConfig::default());
//!
//! match report.within_bounds {
//!     Ok(ranked) => println!("{}: {}", ranked[0].instrument, ranked[0].score),
//!     Err(e) => eprintln!("no match: {e}"),
//! }
//! ```

pub mod engine;
pub mod scoring;
