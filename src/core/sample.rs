use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::SampleNumber;

/// Measured concentrations keyed by sample number
///
/// Numbers are not bounded to the ten report samples: a sample file with more
/// lines produces more entries, which simply find no matching records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleVector {
    values: BTreeMap<SampleNumber, f64>,
}

impl SampleVector {
    /// Number values sequentially from 1, in the given order
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        (1..).zip(values).collect()
    }

    #[must_use]
    pub fn get(&self, sample: SampleNumber) -> Option<f64> {
        self.values.get(&sample).copied()
    }

    /// Entries in ascending sample number order
    pub fn iter(&self) -> impl Iterator<Item = (SampleNumber, f64)> + '_ {
        self.values.iter().map(|(&n, &v)| (n, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(SampleNumber, f64)> for SampleVector {
    fn from_iter<I: IntoIterator<Item = (SampleNumber, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_numbers_from_one() {
        let samples = SampleVector::from_values([9.0, 25.0, 3.5]);
        assert_eq!(samples.len(), 3);
        assert_eq!(samples.get(1), Some(9.0));
        assert_eq!(samples.get(3), Some(3.5));
        assert_eq!(samples.get(0), None);
        assert_eq!(samples.get(4), None);
    }

    #[test]
    fn test_iter_is_ascending() {
        let samples: SampleVector = [(3, 30.0), (1, 10.0), (2, 20.0)].into_iter().collect();
        let numbers: Vec<SampleNumber> = samples.iter().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_more_than_ten_values() {
        let samples = SampleVector::from_values((1..=12).map(f64::from));
        assert_eq!(samples.len(), 12);
        assert_eq!(samples.get(12), Some(12.0));
    }
}
