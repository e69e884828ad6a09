pub mod aggregate;
pub mod measurement;
pub mod parameter;
pub mod table;

pub use aggregate::{CorrelationPair, GeoPoint, LocationSummary, ParameterStats, TimeSeriesPoint};
pub use measurement::MeasurementRecord;
pub use parameter::{ParameterInfo, Threshold};
pub use table::MeasurementTable;
