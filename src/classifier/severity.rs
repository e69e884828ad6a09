use crate::classifier::catalog::lookup;
use crate::utils::constants::{COLOR_NORMAL, LEVEL_NORMAL};
use serde::Serialize;

/// Named severity level and its display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub level: &'static str,
    pub color: &'static str,
}

impl Classification {
    const fn new(level: &'static str, color: &'static str) -> Self {
        Self { level, color }
    }

    pub const NORMAL: Classification = Classification::new(LEVEL_NORMAL, COLOR_NORMAL);
}

/// One band of a scale: values at or below the named threshold
struct Band {
    threshold: &'static str,
    level: Classification,
}

const fn band(threshold: &'static str, level: &'static str, color: &'static str) -> Band {
    Band {
        threshold,
        level: Classification::new(level, color),
    }
}

static POLLUTANT_BANDS: [Band; 4] = [
    band("good", "Good", "#00E400"),
    band("moderate", "Moderate", "#FFFF00"),
    band("unhealthy", "Unhealthy for Sensitive Groups", "#FF7E00"),
    band("very_unhealthy", "Unhealthy", "#FF0000"),
];

static TEMPERATURE_BANDS: [Band; 4] = [
    band("cold", "Cold", "#0000FF"),
    band("cool", "Cool", "#00FFFF"),
    band("moderate", "Moderate", "#00FF00"),
    band("hot", "Warm", "#FFFF00"),
];

static HUMIDITY_BANDS: [Band; 2] = [
    band("dry", "Dry", "#FFA500"),
    band("comfortable", "Comfortable", "#00FF00"),
];

/// Severity scales available for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeverityScale {
    /// Good / Moderate / Unhealthy for Sensitive Groups / Unhealthy / Hazardous
    Pollutant,
    /// Cold / Cool / Moderate / Warm / Hot
    Temperature,
    /// Dry / Comfortable / Humid
    Humidity,
}

impl SeverityScale {
    pub fn for_parameter(parameter: &str) -> Option<Self> {
        match parameter {
            "pm25" | "pm10" | "co" | "no2" | "o3" | "so2" => Some(Self::Pollutant),
            "temperature" => Some(Self::Temperature),
            "relativehumidity" => Some(Self::Humidity),
            _ => None,
        }
    }

    fn bands(self) -> &'static [Band] {
        match self {
            Self::Pollutant => &POLLUTANT_BANDS,
            Self::Temperature => &TEMPERATURE_BANDS,
            Self::Humidity => &HUMIDITY_BANDS,
        }
    }

    /// Level for values above every breakpoint
    pub fn ceiling(self) -> Classification {
        match self {
            Self::Pollutant => Classification::new("Hazardous", "#99004C"),
            Self::Temperature => Classification::new("Hot", "#FF0000"),
            Self::Humidity => Classification::new("Humid", "#0000FF"),
        }
    }

    /// Level names from lowest to highest
    pub fn levels(self) -> Vec<&'static str> {
        self.bands()
            .iter()
            .map(|b| b.level.level)
            .chain(std::iter::once(self.ceiling().level))
            .collect()
    }
}

/// Classify `value` against the breakpoints of `parameter`.
///
/// Breakpoints are inclusive (`value <= limit`). Parameters without a scale
/// classify as "Normal".
pub fn classify(value: f64, parameter: &str) -> Classification {
    let (Some(scale), Some(spec)) = (SeverityScale::for_parameter(parameter), lookup(parameter))
    else {
        return Classification::NORMAL;
    };

    let limit_of = |name: &str| {
        spec.thresholds
            .iter()
            .find(|(threshold, _)| *threshold == name)
            .map_or(0.0, |&(_, limit)| limit)
    };

    scale
        .bands()
        .iter()
        .find(|b| value <= limit_of(b.threshold))
        .map_or_else(|| scale.ceiling(), |b| b.level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pollutant_boundaries_are_inclusive() {
        assert_eq!(classify(12.0, "pm25").level, "Good");
        assert_eq!(classify(12.0, "pm25").color, "#00E400");
        assert_eq!(classify(12.1, "pm25").level, "Moderate");
        assert_eq!(classify(55.4, "pm25").level, "Unhealthy for Sensitive Groups");
        assert_eq!(classify(150.4, "pm25").level, "Unhealthy");
        assert_eq!(classify(1000.0, "pm25").level, "Hazardous");
        assert_eq!(classify(1000.0, "pm25").color, "#99004C");
    }

    #[test]
    fn test_temperature_scale() {
        assert_eq!(classify(-5.0, "temperature").level, "Cold");
        assert_eq!(classify(10.0, "temperature").level, "Cool");
        assert_eq!(classify(20.0, "temperature").level, "Moderate");
        assert_eq!(classify(28.0, "temperature").level, "Warm");
        assert_eq!(classify(35.0, "temperature").level, "Hot");
    }

    #[test]
    fn test_humidity_scale() {
        assert_eq!(classify(20.0, "relativehumidity").level, "Dry");
        assert_eq!(classify(45.0, "relativehumidity").level, "Comfortable");
        assert_eq!(classify(95.0, "relativehumidity").level, "Humid");
    }

    #[test]
    fn test_parameters_without_scale_are_normal() {
        assert_eq!(classify(1.0, "pressure"), Classification::NORMAL);
        assert_eq!(classify(1.0, "pm1"), Classification::NORMAL);
        assert_eq!(classify(1.0, "unknown_param"), Classification::NORMAL);
    }

    #[test]
    fn test_scale_levels() {
        assert_eq!(
            SeverityScale::Pollutant.levels(),
            vec![
                "Good",
                "Moderate",
                "Unhealthy for Sensitive Groups",
                "Unhealthy",
                "Hazardous"
            ]
        );
        assert_eq!(SeverityScale::Humidity.levels().len(), 3);
    }
}
