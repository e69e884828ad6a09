//! Static parameter metadata.
//!
//! The catalog is a process-wide constant. Misses never fail: a fallback
//! record is synthesised from the identifier and, when available, the unit
//! observed in the dataset.

use crate::models::{MeasurementTable, ParameterInfo, Threshold};

#[derive(Debug, Clone, Copy)]
pub struct ParameterSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub unit: &'static str,
    pub description: &'static str,
    /// Named breakpoints in ascending order
    pub thresholds: &'static [(&'static str, f64)],
}

impl ParameterSpec {
    pub fn to_info(&self) -> ParameterInfo {
        ParameterInfo {
            id: self.id.to_string(),
            title: self.title.to_string(),
            unit: self.unit.to_string(),
            description: self.description.to_string(),
            thresholds: self
                .thresholds
                .iter()
                .map(|&(name, limit)| Threshold {
                    name: name.to_string(),
                    limit,
                })
                .collect(),
        }
    }
}

// Pollutant breakpoints share one set of band names
macro_rules! aqi {
    ($good:expr, $moderate:expr, $unhealthy:expr, $very:expr) => {
        &[
            ("good", $good),
            ("moderate", $moderate),
            ("unhealthy", $unhealthy),
            ("very_unhealthy", $very),
        ]
    };
}

pub static PARAMETER_CATALOG: [ParameterSpec; 14] = [
    ParameterSpec {
        id: "pm25",
        title: "PM2.5",
        unit: "µg/m³",
        description: "Fine particulate matter with diameter less than 2.5 micrometers",
        thresholds: aqi!(12.0, 35.4, 55.4, 150.4),
    },
    ParameterSpec {
        id: "pm1",
        title: "PM1",
        unit: "µg/m³",
        description: "Particulate matter with diameter less than 1 micrometer",
        thresholds: aqi!(10.0, 25.0, 50.0, 100.0),
    },
    ParameterSpec {
        id: "pm10",
        title: "PM10",
        unit: "µg/m³",
        description: "Particulate matter with diameter less than 10 micrometers",
        thresholds: aqi!(54.0, 154.0, 254.0, 354.0),
    },
    ParameterSpec {
        id: "co",
        title: "Carbon Monoxide",
        unit: "ppb",
        description: "Carbon monoxide concentration",
        thresholds: aqi!(4.4, 9.4, 12.4, 15.4),
    },
    ParameterSpec {
        id: "no",
        title: "Nitric Oxide",
        unit: "ppb",
        description: "Nitric oxide concentration",
        thresholds: aqi!(40.0, 80.0, 180.0, 280.0),
    },
    ParameterSpec {
        id: "no2",
        title: "Nitrogen Dioxide",
        unit: "ppb",
        description: "Nitrogen dioxide concentration",
        thresholds: aqi!(53.0, 100.0, 360.0, 649.0),
    },
    ParameterSpec {
        id: "o3",
        title: "Ozone",
        unit: "µg/m³",
        description: "Ozone concentration",
        thresholds: aqi!(54.0, 70.0, 85.0, 105.0),
    },
    ParameterSpec {
        id: "so2",
        title: "Sulfur Dioxide",
        unit: "ppb",
        description: "Sulfur dioxide concentration",
        thresholds: aqi!(35.0, 75.0, 185.0, 304.0),
    },
    ParameterSpec {
        id: "temperature",
        title: "Temperature",
        unit: "°C",
        description: "Ambient temperature",
        thresholds: &[("cold", 0.0), ("cool", 15.0), ("moderate", 25.0), ("hot", 30.0)],
    },
    ParameterSpec {
        id: "pressure",
        title: "Atmospheric Pressure",
        unit: "hPa",
        description: "Atmospheric pressure",
        thresholds: &[("low", 980.0), ("normal", 1013.0), ("high", 1030.0)],
    },
    ParameterSpec {
        id: "relativehumidity",
        title: "Relative Humidity",
        unit: "%",
        description: "Relative humidity",
        thresholds: &[("dry", 30.0), ("comfortable", 50.0), ("humid", 70.0)],
    },
    ParameterSpec {
        id: "wind_speed",
        title: "Wind Speed",
        unit: "m/s",
        description: "Wind speed",
        thresholds: &[("calm", 1.0), ("light", 3.0), ("moderate", 7.0), ("strong", 10.0)],
    },
    ParameterSpec {
        id: "wind_direction",
        title: "Wind Direction",
        unit: "deg",
        description: "Wind direction in degrees",
        thresholds: &[],
    },
    ParameterSpec {
        id: "um003",
        title: "Ultrafine Particles",
        unit: "count/cm³",
        description: "Ultrafine particles concentration",
        thresholds: &[("low", 1000.0), ("moderate", 10000.0), ("high", 50000.0)],
    },
];

/// Exact-id lookup in the static catalog
pub fn lookup(parameter: &str) -> Option<&'static ParameterSpec> {
    PARAMETER_CATALOG.iter().find(|spec| spec.id == parameter)
}

/// Metadata for `parameter`, synthesising a fallback for unknown ids.
///
/// For fallbacks the unit is the first non-empty unit recorded against the
/// parameter in `table`, or empty when there is none.
pub fn parameter_info(parameter: &str, table: Option<&MeasurementTable>) -> ParameterInfo {
    if let Some(spec) = lookup(parameter) {
        return spec.to_info();
    }

    let title = humanize(parameter);
    let unit = table
        .and_then(|t| {
            t.parameter_rows(parameter)
                .find_map(|r| r.unit.as_deref().filter(|u| !u.is_empty()))
                .map(str::to_string)
        })
        .unwrap_or_default();

    ParameterInfo {
        id: parameter.to_string(),
        description: format!("{} measurement", title),
        title,
        unit,
        thresholds: Vec::new(),
    }
}

/// Turn an identifier into a display title: separators become spaces and
/// each alphabetic run starts with a capital (`wind_gust` -> `Wind Gust`).
pub fn humanize(identifier: &str) -> String {
    let mut title = String::with_capacity(identifier.len());
    let mut previous_alphabetic = false;

    for ch in identifier.chars() {
        let ch = if ch == '_' || ch == '-' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if previous_alphabetic {
                title.extend(ch.to_lowercase());
            } else {
                title.extend(ch.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            title.push(ch);
            previous_alphabetic = false;
        }
    }

    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MeasurementRecord;
    use chrono::NaiveDate;

    fn record(parameter: &str, unit: Option<&str>) -> MeasurementRecord {
        MeasurementRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            "Delhi".to_string(),
            28.6,
            77.2,
            parameter.to_string(),
            1.0,
            unit.map(str::to_string),
        )
    }

    #[test]
    fn test_known_parameter() {
        let info = parameter_info("pm25", None);

        assert_eq!(info.title, "PM2.5");
        assert_eq!(info.unit, "µg/m³");
        assert_eq!(info.threshold("good"), Some(12.0));
        assert_eq!(info.threshold("very_unhealthy"), Some(150.4));
        assert_eq!(info.axis_label(), "PM2.5 (µg/m³)");
    }

    #[test]
    fn test_unknown_parameter_without_table() {
        let info = parameter_info("unknown_param", None);

        assert_eq!(info.title, "Unknown Param");
        assert_eq!(info.unit, "");
        assert_eq!(info.description, "Unknown Param measurement");
        assert!(info.thresholds.is_empty());
    }

    #[test]
    fn test_unknown_parameter_takes_first_observed_unit() {
        let table = MeasurementTable::new(vec![
            record("pm25", Some("µg/m³")),
            record("bc", None),
            record("bc", Some("ng/m³")),
            record("bc", Some("µg/m³")),
        ]);

        assert_eq!(parameter_info("bc", Some(&table)).unit, "ng/m³");
        assert_eq!(parameter_info("nox", Some(&table)).unit, "");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("unknown_param"), "Unknown Param");
        assert_eq!(humanize("WIND_gust"), "Wind Gust");
        assert_eq!(humanize("pm2_5"), "Pm2 5");
        assert_eq!(humanize("black-carbon"), "Black Carbon");
    }

    #[test]
    fn test_catalog_thresholds_are_ascending() {
        for spec in PARAMETER_CATALOG.iter() {
            assert!(
                spec.thresholds.windows(2).all(|w| w[0].1 < w[1].1),
                "thresholds for {} out of order",
                spec.id
            );
        }
    }
}
