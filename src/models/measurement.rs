use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single observation of one parameter at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub date: NaiveDateTime,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub parameter: String,
    pub value: f64,
    pub unit: Option<String>,

    /// Source columns outside the measurement schema, carried through untouched
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl MeasurementRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDateTime,
        location: String,
        latitude: f64,
        longitude: f64,
        parameter: String,
        value: f64,
        unit: Option<String>,
    ) -> Self {
        Self {
            date,
            location,
            latitude,
            longitude,
            parameter,
            value,
            unit,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_extra(mut self, extra: BTreeMap<String, String>) -> Self {
        self.extra = extra;
        self
    }

    /// Calendar day of the observation
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn is_parameter(&self, parameter: &str) -> bool {
        self.parameter == parameter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_day_truncates_time() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let record = MeasurementRecord::new(
            date,
            "Delhi".to_string(),
            28.61,
            77.21,
            "pm25".to_string(),
            88.0,
            Some("µg/m³".to_string()),
        );

        assert_eq!(record.day(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(record.is_parameter("pm25"));
        assert!(!record.is_parameter("pm10"));
        assert!(record.extra.is_empty());
    }
}
