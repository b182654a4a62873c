use serde::Serialize;

use crate::catalog::store::ReferenceTable;
use crate::core::record::ReferenceRecord;
use crate::core::sample::SampleVector;

/// Why a (record, sample) pair could not be evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The sample vector has no value for the record's sample number
    MissingSampleValue,
    /// One or both range bounds failed to parse
    MissingBounds,
    /// The mean failed to parse
    MissingMean,
    /// The mean is zero, so a relative deviation is undefined
    ZeroMean,
}

/// Outcome of comparing one sample value against one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Within,
    Outside,
    Skipped(SkipReason),
}

impl Evaluation {
    fn from_bool(within: bool) -> Self {
        if within {
            Self::Within
        } else {
            Self::Outside
        }
    }
}

/// Score of one instrument under one criterion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentScore<T> {
    pub instrument: String,
    pub score: T,
}

/// Is the measured value inside `[low_range, high_range]`? Both ends inclusive.
#[must_use]
pub fn evaluate_bounds(record: &ReferenceRecord, samples: &SampleVector) -> Evaluation {
    let Some(value) = samples.get(record.sample_number) else {
        return Evaluation::Skipped(SkipReason::MissingSampleValue);
    };
    let Some((low, high)) = record.range() else {
        return Evaluation::Skipped(SkipReason::MissingBounds);
    };

    Evaluation::from_bool(low <= value && value <= high)
}

/// Is the measured value within `percent` % of the record's mean?
#[must_use]
pub fn evaluate_percent(record: &ReferenceRecord, samples: &SampleVector, percent: f64) -> Evaluation {
    let Some(value) = samples.get(record.sample_number) else {
        return Evaluation::Skipped(SkipReason::MissingSampleValue);
    };
    let Some(mean) = record.mean else {
        return Evaluation::Skipped(SkipReason::MissingMean);
    };
    if mean == 0.0 {
        return Evaluation::Skipped(SkipReason::ZeroMean);
    }

    let deviation = ((value - mean) / mean).abs();
    Evaluation::from_bool(deviation <= percent / 100.0)
}

/// Count, per instrument, the records that evaluate to `Within`.
///
/// Instruments are returned in first-appearance order; skipped pairs never count.
pub fn count_per_instrument<F>(table: &ReferenceTable, evaluate: F) -> Vec<InstrumentScore<usize>>
where
    F: Fn(&ReferenceRecord) -> Evaluation,
{
    table
        .instruments()
        .iter()
        .map(|instrument| {
            let count = table
                .records_for(instrument)
                .filter(|&record| match evaluate(record) {
                    Evaluation::Within => true,
                    Evaluation::Outside => false,
                    Evaluation::Skipped(reason) => {
                        tracing::trace!(
                            instrument = %record.instrument,
                            sample = record.sample_number,
                            ?reason,
                            "Skipped record"
                        );
                        false
                    }
                })
                .count();
            InstrumentScore {
                instrument: instrument.clone(),
                score: count,
            }
        })
        .collect()
}

/// Euclidean distance between two equal-length vectors
#[must_use]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
