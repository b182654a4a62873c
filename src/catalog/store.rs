use serde::Serialize;
use std::collections::HashMap;

use crate::core::record::ReferenceRecord;
use crate::core::types::{GroupKind, SampleNumber, SAMPLE_COUNT};

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Mean values of one instrument across all samples, in ascending sample order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub instrument: String,

    /// `means[i]` is the mean for sample `i + 1`
    pub means: Vec<f64>,
}

/// Parsed report records with an instrument index
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    /// All records, in insertion order
    records: Vec<ReferenceRecord>,

    /// Index: instrument name -> indices in records vec
    instrument_to_records: HashMap<String, Vec<usize>>,

    /// Instrument names in order of first appearance
    instruments: Vec<String>,
}

impl ReferenceTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record to the table
    pub fn add_record(&mut self, record: ReferenceRecord) {
        let index = self.records.len();

        let indices = self
            .instrument_to_records
            .entry(record.instrument.clone())
            .or_default();
        if indices.is_empty() {
            self.instruments.push(record.instrument.clone());
        }
        indices.push(index);

        self.records.push(record);
    }

    /// All records, in insertion order
    #[must_use]
    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    /// Records for one instrument (exact name match), in insertion order
    pub fn records_for<'a>(
        &'a self,
        instrument: &str,
    ) -> impl Iterator<Item = &'a ReferenceRecord> + 'a {
        self.instrument_to_records
            .get(instrument)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&idx| &self.records[idx])
    }

    /// Distinct instrument names, in order of first appearance
    #[must_use]
    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    /// A new table holding only the records of one group section
    #[must_use]
    pub fn filter_group(&self, group: GroupKind) -> Self {
        self.records
            .iter()
            .filter(|r| r.group == group)
            .cloned()
            .collect()
    }

    /// Mean per sample for every instrument that has a mean for all samples
    /// 1..=`SAMPLE_COUNT`.
    ///
    /// Instruments with any gap are left out. Several means for the same
    /// (instrument, sample) pair are averaged. Rows keep first-appearance order.
    #[must_use]
    pub fn pivot_complete(&self) -> Vec<PivotRow> {
        self.instruments
            .iter()
            .filter_map(|instrument| {
                let means = (1..=SAMPLE_COUNT)
                    .map(|sample| self.mean_for(instrument, sample))
                    .collect::<Option<Vec<f64>>>()?;
                Some(PivotRow {
                    instrument: instrument.clone(),
                    means,
                })
            })
            .collect()
    }

    /// Average of the present means for an (instrument, sample) pair
    fn mean_for(&self, instrument: &str, sample: SampleNumber) -> Option<f64> {
        let means: Vec<f64> = self
            .records_for(instrument)
            .filter(|r| r.sample_number == sample)
            .filter_map(|r| r.mean)
            .collect();

        if means.is_empty() {
            None
        } else {
            Some(means.iter().sum::<f64>() / count_to_f64(means.len()))
        }
    }

    /// Number of records in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<ReferenceRecord> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = ReferenceRecord>>(iter: I) -> Self {
        let mut table = Self::new();
        for record in iter {
            table.add_record(record);
        }
        table
    }
}

impl From<Vec<ReferenceRecord>> for ReferenceTable {
    fn from(records: Vec<ReferenceRecord>) -> Self {
        records.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(instrument: &str, offset: f64) -> Vec<ReferenceRecord> {
        (1..=SAMPLE_COUNT)
            .map(|s| {
                ReferenceRecord::new(instrument, s, GroupKind::Instrument)
                    .with_mean(f64::from(s) + offset)
            })
            .collect()
    }

    #[test]
    fn test_records_keep_insertion_order() {
        let table: ReferenceTable = vec![
            ReferenceRecord::new("B", 1, GroupKind::Peer),
            ReferenceRecord::new("A", 1, GroupKind::Peer),
            ReferenceRecord::new("B", 2, GroupKind::Peer),
        ]
        .into();

        assert_eq!(table.len(), 3);
        assert_eq!(table.instruments(), ["B".to_string(), "A".to_string()]);
        assert_eq!(table.records()[1].instrument, "A");

        let samples: Vec<SampleNumber> = table.records_for("B").map(|r| r.sample_number).collect();
        assert_eq!(samples, vec![1, 2]);
    }

    #[test]
    fn test_records_for_exact_match() {
        let table: ReferenceTable = vec![
            ReferenceRecord::new("Analyzer X", 1, GroupKind::Peer),
            ReferenceRecord::new("Analyzer X2", 1, GroupKind::Peer),
        ]
        .into();

        assert_eq!(table.records_for("Analyzer X").count(), 1);
        assert_eq!(table.records_for("analyzer x").count(), 0);
        assert_eq!(table.records_for("Nope").count(), 0);
    }

    #[test]
    fn test_pivot_complete_excludes_gaps() {
        let mut records = complete("Full", 0.0);
        let mut gappy = complete("Gappy", 0.5);
        gappy.remove(4);
        records.extend(gappy);

        let table = ReferenceTable::from(records);
        let pivot = table.pivot_complete();

        assert_eq!(pivot.len(), 1);
        assert_eq!(pivot[0].instrument, "Full");
        assert_eq!(pivot[0].means.len(), 10);
        assert_eq!(pivot[0].means[0], 1.0);
        assert_eq!(pivot[0].means[9], 10.0);
    }

    #[test]
    fn test_pivot_complete_missing_mean_is_a_gap() {
        let mut records = complete("A", 0.0);
        records[3].mean = None;
        let table = ReferenceTable::from(records);
        assert!(table.pivot_complete().is_empty());
    }

    #[test]
    fn test_pivot_complete_averages_duplicates() {
        let mut records = complete("A", 0.0);
        records.push(ReferenceRecord::new("A", 1, GroupKind::Method).with_mean(3.0));
        let table = ReferenceTable::from(records);

        let pivot = table.pivot_complete();
        assert_eq!(pivot[0].means[0], 2.0);
    }

    #[test]
    fn test_pivot_ordered_by_sample_number() {
        let mut records = complete("A", 0.0);
        records.reverse();
        let table = ReferenceTable::from(records);

        let pivot = table.pivot_complete();
        let expected: Vec<f64> = (1..=SAMPLE_COUNT).map(f64::from).collect();
        assert_eq!(pivot[0].means, expected);
    }

    #[test]
    fn test_filter_group() {
        let table: ReferenceTable = vec![
            ReferenceRecord::new("A", 1, GroupKind::Peer),
            ReferenceRecord::new("M", 1, GroupKind::Method),
            ReferenceRecord::new("R", 1, GroupKind::Reagent),
        ]
        .into();

        let methods = table.filter_group(GroupKind::Method);
        assert_eq!(methods.len(), 1);
        assert_eq!(methods.instruments(), ["M".to_string()]);
    }
}
