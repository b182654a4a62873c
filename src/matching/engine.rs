use thiserror::Error;
use tracing::debug;

use crate::catalog::store::ReferenceTable;
use crate::core::sample::SampleVector;
use crate::core::types::SAMPLE_COUNT;
use crate::matching::scoring::{
    count_per_instrument, euclidean_distance, evaluate_bounds, evaluate_percent, InstrumentScore,
};
use crate::utils::validation::is_valid_percent;

/// Why a criterion produced no match. Each criterion fails independently.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("no instrument reports a mean for all 10 samples")]
    NoQualifyingInstrument,

    #[error("the reference table has no instruments")]
    NoInstrumentsFound,

    #[error("the sample vector has no value for any of samples 1-10")]
    NoComparableSamples,

    #[error("invalid percent threshold {0}: must be finite and >= 0")]
    InvalidPercent(f64),
}

/// Default percent deviation for the within-percent criterion
pub const DEFAULT_PERCENT: f64 = 30.0;

/// Configuration for the matching engine
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Allowed deviation from the reference mean, in percent
    pub percent: f64,
    /// Number of ranked instruments kept per criterion
    pub top: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            percent: DEFAULT_PERCENT,
            top: 1,
        }
    }
}

/// Ranked results of all three criteria. A failure in one leaves the others intact.
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// Ascending distance
    pub euclidean: Result<Vec<InstrumentScore<f64>>, MatchError>,
    /// Descending in-range count
    pub within_bounds: Result<Vec<InstrumentScore<usize>>, MatchError>,
    /// Descending within-percent count
    pub within_percent: Result<Vec<InstrumentScore<usize>>, MatchError>,
    /// Threshold used for `within_percent`
    pub percent: f64,
}

/// Compares a sample vector against every instrument in a reference table.
///
/// All queries are pure reads. Ties always go to the instrument that appears
/// first in the report.
pub struct MatchEngine<'a> {
    table: &'a ReferenceTable,
    samples: &'a SampleVector,
}

impl<'a> MatchEngine<'a> {
    pub fn new(table: &'a ReferenceTable, samples: &'a SampleVector) -> Self {
        Self { table, samples }
    }

    /// Instruments with a complete set of means, by ascending Euclidean
    /// distance between their means and the sample values.
    ///
    /// Samples missing from the sample vector are left out of every distance.
    ///
    /// # Errors
    ///
    /// `NoQualifyingInstrument` if no instrument has all sample means, or
    /// `NoComparableSamples` if the sample vector covers none of them.
    pub fn rank_by_euclidean(&self) -> Result<Vec<InstrumentScore<f64>>, MatchError> {
        let pivot = self.table.pivot_complete();
        if pivot.is_empty() {
            return Err(MatchError::NoQualifyingInstrument);
        }

        // Pivot columns (index into means) that have a sample value
        let columns: Vec<(usize, f64)> = (1..=SAMPLE_COUNT)
            .enumerate()
            .filter_map(|(col, sample)| self.samples.get(sample).map(|v| (col, v)))
            .collect();
        if columns.is_empty() {
            return Err(MatchError::NoComparableSamples);
        }
        let sample_vector: Vec<f64> = columns.iter().map(|&(_, v)| v).collect();

        let mut ranked: Vec<InstrumentScore<f64>> = pivot
            .into_iter()
            .map(|row| {
                let means: Vec<f64> = columns.iter().map(|&(col, _)| row.means[col]).collect();
                InstrumentScore {
                    instrument: row.instrument,
                    score: euclidean_distance(&means, &sample_vector),
                }
            })
            .collect();

        // Stable sort keeps report order among equal distances
        ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
        Ok(ranked)
    }

    /// Instrument whose means are closest to the sample values
    ///
    /// # Errors
    ///
    /// See [`MatchEngine::rank_by_euclidean`].
    pub fn closest_by_euclidean(&self) -> Result<InstrumentScore<f64>, MatchError> {
        let best = first(self.rank_by_euclidean()?, MatchError::NoQualifyingInstrument)?;
        debug!(instrument = %best.instrument, distance = best.score, "Closest by Euclidean distance");
        Ok(best)
    }

    /// Instruments by descending count of samples inside the reference range
    ///
    /// # Errors
    ///
    /// `NoInstrumentsFound` if the table is empty.
    pub fn rank_within_bounds(&self) -> Result<Vec<InstrumentScore<usize>>, MatchError> {
        if self.table.is_empty() {
            return Err(MatchError::NoInstrumentsFound);
        }
        let counts = count_per_instrument(self.table, |record| evaluate_bounds(record, self.samples));
        Ok(rank_descending(counts))
    }

    /// Instrument with the most samples inside the reference range
    ///
    /// # Errors
    ///
    /// `NoInstrumentsFound` if the table is empty.
    pub fn most_within_bounds(&self) -> Result<InstrumentScore<usize>, MatchError> {
        let best = first(self.rank_within_bounds()?, MatchError::NoInstrumentsFound)?;
        debug!(instrument = %best.instrument, count = best.score, "Most samples within range");
        Ok(best)
    }

    /// Instruments by descending count of samples within `percent` % of the mean
    ///
    /// # Errors
    ///
    /// `InvalidPercent` if `percent` is negative or not finite, or
    /// `NoInstrumentsFound` if the table is empty.
    pub fn rank_within_percent(&self, percent: f64) -> Result<Vec<InstrumentScore<usize>>, MatchError> {
        if !is_valid_percent(percent) {
            return Err(MatchError::InvalidPercent(percent));
        }
        if self.table.is_empty() {
            return Err(MatchError::NoInstrumentsFound);
        }
        let counts = count_per_instrument(self.table, |record| {
            evaluate_percent(record, self.samples, percent)
        });
        Ok(rank_descending(counts))
    }

    /// Instrument with the most samples within `percent` % of the mean
    ///
    /// # Errors
    ///
    /// See [`MatchEngine::rank_within_percent`].
    pub fn most_within_percent(&self, percent: f64) -> Result<InstrumentScore<usize>, MatchError> {
        let best = first(self.rank_within_percent(percent)?, MatchError::NoInstrumentsFound)?;
        debug!(instrument = %best.instrument, count = best.score, percent, "Most samples within percent");
        Ok(best)
    }

    /// Run all three criteria, keeping the `top` best instruments of each
    pub fn run(&self, config: &MatchConfig) -> MatchReport {
        let keep = config.top.max(1);

        MatchReport {
            euclidean: self.rank_by_euclidean().map(|r| keep_top(r, keep)),
            within_bounds: self.rank_within_bounds().map(|r| keep_top(r, keep)),
            within_percent: self
                .rank_within_percent(config.percent)
                .map(|r| keep_top(r, keep)),
            percent: config.percent,
        }
    }
}

/// Stable sort by descending score; equal counts keep report order
fn rank_descending(mut counts: Vec<InstrumentScore<usize>>) -> Vec<InstrumentScore<usize>> {
    counts.sort_by(|a, b| b.score.cmp(&a.score));
    counts
}

fn keep_top<T>(mut ranked: Vec<T>, keep: usize) -> Vec<T> {
    ranked.truncate(keep);
    ranked
}

/// Head of a ranking, or `empty` when nothing was ranked
fn first<T>(ranked: Vec<InstrumentScore<T>>, empty: MatchError) -> Result<InstrumentScore<T>, MatchError> {
    ranked.into_iter().next().ok_or(empty)
}
