use crate::classifier::parameter_info;
use crate::models::{
    CorrelationPair, GeoPoint, LocationSummary, MeasurementTable, ParameterStats,
    TimeSeriesPoint,
};
use crate::utils::start_of_day;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Time bucketing applied before grouping a trend series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeBucket {
    /// Group on the exact timestamp
    #[default]
    Timestamp,
    Day,
    Month,
}

impl TimeBucket {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "timestamp" | "exact" => Some(TimeBucket::Timestamp),
            "day" | "d" => Some(TimeBucket::Day),
            "month" | "m" => Some(TimeBucket::Month),
            _ => None,
        }
    }

    pub fn bucket(self, timestamp: NaiveDateTime) -> NaiveDateTime {
        match self {
            TimeBucket::Timestamp => timestamp,
            TimeBucket::Day => start_of_day(timestamp.date()),
            TimeBucket::Month => {
                let date = timestamp.date();
                NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                    .map_or(timestamp, start_of_day)
            }
        }
    }
}

/// Running count/sum/min/max over one group
#[derive(Debug, Clone, Copy)]
struct ValueSummary {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl ValueSummary {
    fn new(value: f64) -> Self {
        Self {
            count: 1,
            sum: value,
            min: value,
            max: value,
        }
    }

    fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

fn accumulate<K: Ord>(groups: &mut BTreeMap<K, ValueSummary>, key: K, value: f64) {
    groups
        .entry(key)
        .and_modify(|s| s.push(value))
        .or_insert_with(|| ValueSummary::new(value));
}

/// Least-squares line through the correlation points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Group-by computations over a filtered table. Groups only exist for keys
/// with at least one row, so no NaN means are produced.
pub struct Aggregator {
    bucket: TimeBucket,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            bucket: TimeBucket::default(),
        }
    }

    pub fn with_time_bucket(bucket: TimeBucket) -> Self {
        Self { bucket }
    }

    /// Mean value per (time bucket, location) for one parameter, ordered by
    /// date then location
    pub fn aggregate_time_series(
        &self,
        table: &MeasurementTable,
        parameter: &str,
    ) -> Vec<TimeSeriesPoint> {
        let mut groups = BTreeMap::new();
        for record in table.parameter_rows(parameter) {
            let key = (self.bucket.bucket(record.date), record.location.as_str());
            accumulate(&mut groups, key, record.value);
        }

        groups
            .into_iter()
            .map(|((date, location), summary)| TimeSeriesPoint {
                date,
                location: location.to_string(),
                mean_value: summary.mean(),
                count: summary.count,
            })
            .collect()
    }

    /// Mean/min/max per location for one parameter, ordered by location
    pub fn aggregate_comparison(
        &self,
        table: &MeasurementTable,
        parameter: &str,
    ) -> Vec<LocationSummary> {
        let mut groups = BTreeMap::new();
        for record in table.parameter_rows(parameter) {
            accumulate(&mut groups, record.location.as_str(), record.value);
        }

        groups
            .into_iter()
            .map(|(location, summary)| LocationSummary {
                location: location.to_string(),
                mean: summary.mean(),
                min: summary.min,
                max: summary.max,
                count: summary.count,
            })
            .collect()
    }

    /// Inner join of two parameter subsets on (timestamp, location).
    ///
    /// Rows without a counterpart are dropped. Output follows the order of
    /// the `param_a` rows; a key repeated on both sides yields every pairing.
    pub fn correlate(
        &self,
        table: &MeasurementTable,
        param_a: &str,
        param_b: &str,
    ) -> Vec<CorrelationPair> {
        let mut right: HashMap<(NaiveDateTime, &str), Vec<f64>> = HashMap::new();
        for record in table.parameter_rows(param_b) {
            right
                .entry((record.date, record.location.as_str()))
                .or_default()
                .push(record.value);
        }

        let mut pairs = Vec::new();
        for record in table.parameter_rows(param_a) {
            if let Some(matches) = right.get(&(record.date, record.location.as_str())) {
                pairs.extend(matches.iter().map(|&value_b| CorrelationPair {
                    date: record.date,
                    location: record.location.clone(),
                    value_a: record.value,
                    value_b,
                }));
            }
        }

        pairs
    }

    /// Mean value per located site, for the map layer
    pub fn aggregate_geographic(&self, table: &MeasurementTable, parameter: &str) -> Vec<GeoPoint> {
        let mut groups: HashMap<(&str, u64, u64), (f64, f64, ValueSummary)> = HashMap::new();
        for record in table.parameter_rows(parameter) {
            let key = (
                record.location.as_str(),
                record.latitude.to_bits(),
                record.longitude.to_bits(),
            );
            groups
                .entry(key)
                .and_modify(|(_, _, s)| s.push(record.value))
                .or_insert_with(|| {
                    (record.latitude, record.longitude, ValueSummary::new(record.value))
                });
        }

        let mut points: Vec<GeoPoint> = groups
            .into_iter()
            .map(|((location, _, _), (latitude, longitude, summary))| GeoPoint {
                location: location.to_string(),
                latitude,
                longitude,
                mean_value: summary.mean(),
            })
            .collect();

        points.sort_by(|a, b| {
            a.location
                .cmp(&b.location)
                .then_with(|| a.latitude.total_cmp(&b.latitude))
                .then_with(|| a.longitude.total_cmp(&b.longitude))
        });
        points
    }

    /// Headline statistics for one parameter; `None` when it has no rows
    pub fn parameter_stats(
        &self,
        table: &MeasurementTable,
        parameter: &str,
    ) -> Option<ParameterStats> {
        let mut rows = table.parameter_rows(parameter);
        let first = rows.next()?;

        let mut summary = ValueSummary::new(first.value);
        let mut locations: HashSet<&str> = HashSet::from([first.location.as_str()]);
        for record in rows {
            summary.push(record.value);
            locations.insert(record.location.as_str());
        }

        Some(ParameterStats {
            mean_value: summary.mean(),
            max_value: summary.max,
            min_value: summary.min,
            unit: parameter_info(parameter, Some(table)).unit,
            location_count: locations.len(),
        })
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Fit `value_b = slope * value_a + intercept`. Needs two or more points
/// with distinct `value_a`.
pub fn linear_fit(pairs: &[CorrelationPair]) -> Option<LinearFit> {
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.value_a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.value_b).sum::<f64>() / n;

    let (covariance, variance) = pairs.iter().fold((0.0, 0.0), |(cov, var), p| {
        let dx = p.value_a - mean_x;
        (cov + dx * (p.value_b - mean_y), var + dx * dx)
    });

    if variance == 0.0 || !variance.is_finite() {
        return None;
    }

    let slope = covariance / variance;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}
