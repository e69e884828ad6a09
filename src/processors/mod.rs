pub mod aggregator;
pub mod dashboard;
pub mod filter;

pub use aggregator::{linear_fit, Aggregator, LinearFit, TimeBucket};
pub use dashboard::{build_report, DashboardQuery, DashboardReport};
pub use filter::{
    filter_by_date_range, filter_by_location, filter_by_parameter, DateBound, DateRange,
    FilterCriteria,
};
