use serde::{Deserialize, Serialize};

/// A named breakpoint; values at or below `limit` fall in this band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub name: String,
    pub limit: f64,
}

/// Descriptive metadata for a measured parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub description: String,
    pub thresholds: Vec<Threshold>,
}

impl ParameterInfo {
    pub fn threshold(&self, name: &str) -> Option<f64> {
        self.thresholds
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.limit)
    }

    /// Axis label such as `PM2.5 (µg/m³)`
    pub fn axis_label(&self) -> String {
        format!("{} ({})", self.title, self.unit)
    }
}
