pub mod constants;
pub mod filename;
pub mod progress;
pub mod timestamps;

pub use constants::*;
pub use filename::generate_default_report_filename;
pub use progress::ProgressReporter;
pub use timestamps::{parse_timestamp, start_of_day};
