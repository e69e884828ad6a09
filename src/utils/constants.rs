/// Source column names
pub const COL_DATE: &str = "date";
pub const COL_LOCATION: &str = "location";
pub const COL_LAT: &str = "lat";
pub const COL_LON: &str = "lon";
pub const COL_PARAMETER: &str = "parameter";
pub const COL_VALUE: &str = "value";
pub const COL_UNIT: &str = "unit";

/// Columns a source must provide for the load to succeed
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_DATE,
    COL_LOCATION,
    COL_LAT,
    COL_LON,
    COL_PARAMETER,
    COL_VALUE,
];

/// Cell contents read as a missing value
pub const NULL_MARKERS: [&str; 8] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Load cache freshness
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Dashboard defaults
pub const DEFAULT_PARAMETER: &str = "pm25";
pub const DEFAULT_LOCATION_COUNT: usize = 5;
pub const DEFAULT_DATA_PATH: &str = "data/measurements.csv";
pub const SETTINGS_FILE: &str = "aq-processor.toml";
pub const ENV_PREFIX: &str = "AQ";

/// Correlation trendline needs more than this many points
pub const MIN_TRENDLINE_POINTS: usize = 5;

/// Map rendering
pub const MAP_BASE_RADIUS: f64 = 5000.0;
pub const MAP_ZOOM: f64 = 4.0;
pub const MAP_FILL_ALPHA: u8 = 180;
pub const MAP_STYLE: &str = "light";

/// Fallback severity level for parameters without a scale
pub const LEVEL_NORMAL: &str = "Normal";
pub const COLOR_NORMAL: &str = "#00FF00";
