use crate::error::{ProcessingError, Result};
use crate::models::{MeasurementRecord, MeasurementTable};
use crate::utils::start_of_day;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use tracing::debug;

/// A bound that can be coerced to the canonical date-time
pub trait DateBound: Copy {
    fn to_datetime(self) -> NaiveDateTime;
}

impl DateBound for NaiveDateTime {
    fn to_datetime(self) -> NaiveDateTime {
        self
    }
}

impl DateBound for NaiveDate {
    fn to_datetime(self) -> NaiveDateTime {
        start_of_day(self)
    }
}

/// Validated date range covering `start` through the whole of the `end` day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
    /// `None` when `end + 1 day` is past the last representable date-time
    end_exclusive: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(start: impl DateBound, end: impl DateBound) -> Result<Self> {
        let (start, end) = (start.to_datetime(), end.to_datetime());
        if start > end {
            return Err(ProcessingError::InvalidRange { start, end });
        }
        Ok(Self {
            start,
            end,
            end_exclusive: end.checked_add_signed(Duration::days(1)),
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Exclusive upper bound one day past `end`, or `None` if unbounded
    pub fn end_exclusive(&self) -> Option<NaiveDateTime> {
        self.end_exclusive
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.start && self.end_exclusive.map_or(true, |bound| timestamp < bound)
    }
}

/// Keep rows from `start` (inclusive) up to one day after `end` (exclusive).
///
/// An inverted range is rejected with [`ProcessingError::InvalidRange`].
pub fn filter_by_date_range(
    table: &MeasurementTable,
    start: impl DateBound,
    end: impl DateBound,
) -> Result<MeasurementTable> {
    let range = DateRange::new(start, end)?;
    let filtered = table.retain_where(|r| range.contains(r.date));
    debug!(rows = filtered.len(), "Filtered by date range");
    Ok(filtered)
}

/// Keep rows at any of `locations`. An empty selection means no filter.
pub fn filter_by_location<S: AsRef<str>>(
    table: &MeasurementTable,
    locations: &[S],
) -> MeasurementTable {
    if locations.is_empty() {
        return table.clone();
    }

    let wanted: HashSet<&str> = locations.iter().map(|l| l.as_ref()).collect();
    let filtered = table.retain_where(|r| wanted.contains(r.location.as_str()));
    debug!(rows = filtered.len(), "Filtered by location");
    filtered
}

/// Keep rows whose parameter is selected. Pass a one-element array for a
/// single parameter; an empty selection matches nothing.
pub fn filter_by_parameter<I, S>(table: &MeasurementTable, parameters: I) -> MeasurementTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let wanted: HashSet<String> = parameters
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .collect();
    let filtered = table.retain_where(|r| wanted.contains(&r.parameter));
    debug!(rows = filtered.len(), "Filtered by parameter");
    filtered
}

/// Conjunction of the three row predicates
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub date_range: Option<DateRange>,
    pub locations: Vec<String>,
    pub parameters: Option<Vec<String>>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_locations(mut self, locations: Vec<String>) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<String>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn matches(&self, record: &MeasurementRecord) -> bool {
        self.date_range.map_or(true, |range| range.contains(record.date))
            && (self.locations.is_empty() || self.locations.contains(&record.location))
            && self
                .parameters
                .as_ref()
                .map_or(true, |params| params.contains(&record.parameter))
    }

    /// Derive the filtered view in a single pass
    pub fn apply(&self, table: &MeasurementTable) -> MeasurementTable {
        table.retain_where(|r| self.matches(r))
    }
}
