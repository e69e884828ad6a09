use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Mean value for one (time bucket, location) group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDateTime,
    pub location: String,
    pub mean_value: f64,
    pub count: usize,
}

/// Summary statistics for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub location: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Two parameters observed at the same timestamp and location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub date: NaiveDateTime,
    pub location: String,
    pub value_a: f64,
    pub value_b: f64,
}

/// Mean value at one located site, used for the map layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub mean_value: f64,
}

/// Headline statistics for the selected parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterStats {
    pub mean_value: f64,
    pub max_value: f64,
    pub min_value: f64,
    pub unit: String,
    pub location_count: usize,
}

impl ParameterStats {
    pub fn summary(&self) -> String {
        format!(
            "Average Value: {:.2} {unit}\n\
            Max Value: {:.2} {unit}\n\
            Min Value: {:.2} {unit}\n\
            Locations: {}",
            self.mean_value,
            self.max_value,
            self.min_value,
            self.location_count,
            unit = self.unit
        )
    }
}
