//! Render adapters.
//!
//! Each adapter turns aggregator output plus parameter metadata into a
//! serialisable chart or map description. Nothing here feeds back into the
//! data pipeline.

pub mod charts;
pub mod map;

pub use charts::{
    bar_chart, scatter_chart, trend_chart, Bar, BarChart, ScatterChart, ScatterPoint, Trendline,
    TrendChart, TrendSeries,
};
pub use map::{map_layer, MapLayer, MapPoint, ViewState};
