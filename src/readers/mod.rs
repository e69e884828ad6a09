pub mod load_cache;
pub mod measurement_reader;

pub use load_cache::LoadCache;
pub use measurement_reader::MeasurementReader;
