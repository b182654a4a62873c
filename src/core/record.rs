use serde::{Deserialize, Serialize};

use crate::core::types::{GroupKind, SampleNumber};

/// One row of a calibration report: statistics for an (instrument, sample) pair
///
/// Numeric fields that failed to parse are `None` so that comparisons can
/// skip them without discarding the rest of the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Instrument (or peer/method/reagent) name; may contain spaces
    pub instrument: String,

    /// Sample section the row was listed under (1..=10)
    pub sample_number: SampleNumber,

    /// Group section the row was listed under
    pub group: GroupKind,

    /// Number of participating laboratories
    pub lab_count: Option<u32>,

    pub mean: Option<f64>,

    pub std_dev: Option<f64>,

    /// Lower bound of the acceptable range
    pub low_range: Option<f64>,

    /// Upper bound of the acceptable range
    pub high_range: Option<f64>,

    /// Standard uncertainty of the mean
    pub uncertainty: Option<f64>,
}

impl ReferenceRecord {
    pub fn new(instrument: impl Into<String>, sample_number: SampleNumber, group: GroupKind) -> Self {
        Self {
            instrument: instrument.into(),
            sample_number,
            group,
            lab_count: None,
            mean: None,
            std_dev: None,
            low_range: None,
            high_range: None,
            uncertainty: None,
        }
    }

    #[must_use]
    pub fn with_mean(mut self, mean: f64) -> Self {
        self.mean = Some(mean);
        self
    }

    #[must_use]
    pub fn with_range(mut self, low: f64, high: f64) -> Self {
        self.low_range = Some(low);
        self.high_range = Some(high);
        self
    }

    /// Both range bounds, if present
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        self.low_range.zip(self.high_range)
    }

    /// True if the range bounds are present and ordered.
    /// Malformed reports can produce inverted ranges; they are kept as-is.
    #[must_use]
    pub fn has_ordered_range(&self) -> bool {
        self.range().is_some_and(|(low, high)| low <= high)
    }
}
