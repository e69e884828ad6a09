use crate::classifier::{classify, parameter_info, Classification};
use crate::error::Result;
use crate::models::{MeasurementTable, ParameterStats};
use crate::processors::aggregator::{Aggregator, TimeBucket};
use crate::processors::filter::{filter_by_date_range, filter_by_location, filter_by_parameter};
use crate::render::{bar_chart, map_layer, scatter_chart, trend_chart};
use crate::render::{BarChart, MapLayer, ScatterChart, TrendChart};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

/// User selections driving one dashboard computation
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub locations: Vec<String>,
    pub parameter: String,
    pub compare_with: Option<String>,
    pub bucket: TimeBucket,
}

impl DashboardQuery {
    /// Selections a fresh session starts from: the full date span, the first
    /// `location_count` locations, the preferred parameter if the table has
    /// it, and the first other parameter for correlation.
    pub fn defaults_for(
        table: &MeasurementTable,
        preferred_parameter: &str,
        location_count: usize,
    ) -> Option<Self> {
        let (start, end) = table.date_bounds()?;
        let parameters = table.unique_parameters();

        let parameter = if parameters.iter().any(|p| p == preferred_parameter) {
            preferred_parameter.to_string()
        } else {
            parameters.first()?.clone()
        };
        let compare_with = parameters.into_iter().find(|p| *p != parameter);

        let locations = table
            .unique_locations()
            .into_iter()
            .take(location_count)
            .collect();

        Some(Self {
            start,
            end,
            locations,
            parameter,
            compare_with,
            bucket: TimeBucket::default(),
        })
    }
}

/// Everything the UI shell renders for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub parameter: String,
    pub compare_with: Option<String>,
    pub description: String,
    pub row_count: usize,
    pub stats: Option<ParameterStats>,
    pub severity: Option<Classification>,
    pub trend: TrendChart,
    pub comparison: BarChart,
    pub correlation: Option<ScatterChart>,
    pub map: MapLayer,
}

impl DashboardReport {
    /// No rows survived the filters
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

/// Run the full pipeline: validate the range, filter, aggregate and render.
///
/// An empty filtered view is a valid outcome and produces a report with no
/// statistics and empty views.
pub fn build_report(table: &MeasurementTable, query: &DashboardQuery) -> Result<DashboardReport> {
    let in_range = filter_by_date_range(table, query.start, query.end)?;
    let filtered = filter_by_location(&in_range, &query.locations);
    let parameter_rows = filter_by_parameter(&filtered, [query.parameter.as_str()]);

    if parameter_rows.is_empty() {
        warn!(parameter = %query.parameter, "No data available for the selected filters");
    }

    let aggregator = Aggregator::with_time_bucket(query.bucket);
    let info = parameter_info(&query.parameter, Some(&parameter_rows));

    let stats = aggregator.parameter_stats(&parameter_rows, &query.parameter);
    let severity = stats
        .as_ref()
        .map(|s| classify(s.mean_value, &query.parameter));

    let trend = trend_chart(
        &aggregator.aggregate_time_series(&parameter_rows, &query.parameter),
        &info,
    );
    let comparison = bar_chart(
        &aggregator.aggregate_comparison(&parameter_rows, &query.parameter),
        &info,
    );
    let map = map_layer(
        &aggregator.aggregate_geographic(&parameter_rows, &query.parameter),
        &info,
    );

    let correlation = query.compare_with.as_deref().and_then(|other| {
        let both = filter_by_parameter(&filtered, [query.parameter.as_str(), other]);
        let pairs = aggregator.correlate(&both, &query.parameter, other);
        if pairs.is_empty() {
            warn!(
                parameter = %query.parameter,
                other,
                "Insufficient data for correlation analysis"
            );
            return None;
        }
        let other_info = parameter_info(other, Some(&both));
        Some(scatter_chart(&pairs, &parameter_info(&query.parameter, Some(&both)), &other_info))
    });

    info!(
        parameter = %query.parameter,
        rows = parameter_rows.len(),
        "Built dashboard report"
    );

    Ok(DashboardReport {
        parameter: query.parameter.clone(),
        compare_with: query.compare_with.clone(),
        description: info.description.clone(),
        row_count: parameter_rows.len(),
        stats,
        severity,
        trend,
        comparison,
        correlation,
        map,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use crate::models::MeasurementRecord;

    fn record(day: u32, location: &str, parameter: &str, value: f64) -> MeasurementRecord {
        MeasurementRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap(),
            location.to_string(),
            10.0,
            20.0,
            parameter.to_string(),
            value,
            None,
        )
    }

    fn sample_table() -> MeasurementTable {
        MeasurementTable::new(vec![
            record(1, "Delhi", "pm25", 100.0),
            record(1, "Delhi", "o3", 40.0),
            record(2, "Delhi", "pm25", 80.0),
            record(2, "Delhi", "o3", 35.0),
            record(1, "Paris", "pm25", 8.0),
            record(3, "Paris", "o3", 60.0),
        ])
    }

    #[test]
    fn test_defaults_prefer_pm25() {
        let query = DashboardQuery::defaults_for(&sample_table(), "pm25", 1).unwrap();

        assert_eq!(query.parameter, "pm25");
        assert_eq!(query.compare_with.as_deref(), Some("o3"));
        assert_eq!(query.locations, vec!["Delhi".to_string()]);
        assert_eq!(query.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(query.end, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn test_defaults_fall_back_to_first_parameter() {
        let query = DashboardQuery::defaults_for(&sample_table(), "so2", 5).unwrap();

        assert_eq!(query.parameter, "o3");
        assert_eq!(query.compare_with.as_deref(), Some("pm25"));
        assert!(DashboardQuery::defaults_for(&MeasurementTable::default(), "pm25", 5).is_none());
    }

    #[test]
    fn test_report_for_selection() {
        let table = sample_table();
        let query = DashboardQuery::defaults_for(&table, "pm25", 5).unwrap();

        let report = build_report(&table, &query).unwrap();

        let stats = report.stats.unwrap();
        assert_eq!(stats.location_count, 2);
        assert_eq!(stats.max_value, 100.0);
        assert_eq!(report.severity.unwrap().level, "Unhealthy");
        assert_eq!(report.comparison.bars[0].location, "Delhi");
        assert_eq!(report.correlation.unwrap().points.len(), 2);
        assert_eq!(report.map.points.len(), 2);
    }

    #[test]
    fn test_report_with_no_matching_rows_is_empty_not_error() {
        let table = sample_table();
        let mut query = DashboardQuery::defaults_for(&table, "pm25", 5).unwrap();
        query.locations = vec!["Tokyo".to_string()];

        let report = build_report(&table, &query).unwrap();

        assert!(report.is_empty());
        assert_eq!(report.stats, None);
        assert!(report.trend.series.is_empty());
        assert!(report.correlation.is_none());
        assert!(report.map.view.is_none());
    }

    #[test]
    fn test_report_rejects_inverted_range() {
        let table = sample_table();
        let mut query = DashboardQuery::defaults_for(&table, "pm25", 5).unwrap();
        std::mem::swap(&mut query.start, &mut query.end);

        assert!(matches!(
            build_report(&table, &query),
            Err(ProcessingError::InvalidRange { .. })
        ));
    }
}
