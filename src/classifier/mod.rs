pub mod catalog;
pub mod color;
pub mod severity;

pub use catalog::{humanize, lookup, parameter_info, ParameterSpec, PARAMETER_CATALOG};
pub use color::{color_scale, ColorScale, ParameterCategory, Rgb};
pub use severity::{classify, Classification, SeverityScale};
