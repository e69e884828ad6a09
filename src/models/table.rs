use crate::models::MeasurementRecord;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// In-memory measurement table.
///
/// Tables are never mutated once built. Every filter or aggregation derives a
/// new value, so a table shared out of the load cache stays intact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementTable {
    records: Vec<MeasurementRecord>,
}

impl MeasurementTable {
    pub fn new(records: Vec<MeasurementRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MeasurementRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Derive a new table holding only the rows matching `predicate`
    pub fn retain_where<F>(&self, predicate: F) -> Self
    where
        F: Fn(&MeasurementRecord) -> bool,
    {
        self.records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Rows for a single parameter, borrowed
    pub fn parameter_rows<'a>(
        &'a self,
        parameter: &'a str,
    ) -> impl Iterator<Item = &'a MeasurementRecord> + 'a {
        self.records.iter().filter(move |r| r.is_parameter(parameter))
    }

    /// Sorted distinct location names
    pub fn unique_locations(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.location.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Sorted distinct parameter identifiers
    pub fn unique_parameters(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.parameter.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Earliest and latest calendar day present, or `None` for an empty table
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut days = self.records.iter().map(|r| r.day());
        let first = days.next()?;
        Some(days.fold((first, first), |(min, max), day| {
            (min.min(day), max.max(day))
        }))
    }
}

impl FromIterator<MeasurementRecord> for MeasurementTable {
    fn from_iter<I: IntoIterator<Item = MeasurementRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MeasurementTable {
    type Item = &'a MeasurementRecord;
    type IntoIter = std::slice::Iter<'a, MeasurementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
