//! Core data types for calibration report matching.
//!
//! - [`ReferenceRecord`](record::ReferenceRecord): one (instrument, sample) row of report statistics
//! - [`SampleVector`](sample::SampleVector): measured concentrations keyed by sample number
//! - [`GroupKind`](types::GroupKind): the peer classification a row was reported under
//!
//! ## Report sections
//!
//! | Header             | Group        |
//! |--------------------|--------------|
//! | `Peer Group`       | `Peer`       |
//! | `Instrument Groups`| `Instrument` |
//! | `Method Groups`    | `Method`     |
//! | `Reagent Groups`   | `Reagent`    |

pub mod record;
pub mod sample;
pub mod types;
