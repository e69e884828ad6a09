use crate::classifier::{color_scale, ColorScale};
use crate::models::{CorrelationPair, LocationSummary, ParameterInfo, TimeSeriesPoint};
use crate::processors::aggregator::linear_fit;
use crate::utils::constants::MIN_TRENDLINE_POINTS;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

const RANGE_SELECTOR: [&str; 4] = ["1w", "1m", "3m", "all"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub location: String,
    pub points: Vec<(NaiveDateTime, f64)>,
}

/// Line chart of the parameter over time, one series per location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub range_selector: Vec<&'static str>,
    pub series: Vec<TrendSeries>,
}

pub fn trend_chart(points: &[TimeSeriesPoint], info: &ParameterInfo) -> TrendChart {
    let mut by_location: BTreeMap<&str, Vec<(NaiveDateTime, f64)>> = BTreeMap::new();
    for point in points {
        by_location
            .entry(point.location.as_str())
            .or_default()
            .push((point.date, point.mean_value));
    }

    let series = by_location
        .into_iter()
        .map(|(location, mut points)| {
            points.sort_by_key(|(date, _)| *date);
            TrendSeries {
                location: location.to_string(),
                points,
            }
        })
        .collect();

    TrendChart {
        title: format!("{} Over Time", info.title),
        x_label: "Date".to_string(),
        y_label: info.axis_label(),
        range_selector: RANGE_SELECTOR.to_vec(),
        series,
    }
}

/// One bar with asymmetric error whiskers reaching min and max
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub location: String,
    pub mean: f64,
    pub error_plus: f64,
    pub error_minus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_scale: ColorScale,
    pub bars: Vec<Bar>,
}

/// Location comparison, highest mean first
pub fn bar_chart(summaries: &[LocationSummary], info: &ParameterInfo) -> BarChart {
    let mut bars: Vec<Bar> = summaries
        .iter()
        .map(|s| Bar {
            location: s.location.clone(),
            mean: s.mean,
            error_plus: s.max - s.mean,
            error_minus: s.mean - s.min,
        })
        .collect();
    bars.sort_by(|a, b| b.mean.total_cmp(&a.mean));

    BarChart {
        title: format!("Average {} by Location", info.title),
        x_label: "Location".to_string(),
        y_label: format!("Average {}", info.axis_label()),
        color_scale: color_scale(&info.id, false),
        bars,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub date: NaiveDateTime,
    pub location: String,
    pub x: f64,
    pub y: f64,
}

/// Dashed fit line spanning the observed x range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trendline {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
    pub trendline: Option<Trendline>,
}

pub fn scatter_chart(
    pairs: &[CorrelationPair],
    info_a: &ParameterInfo,
    info_b: &ParameterInfo,
) -> ScatterChart {
    let points = pairs
        .iter()
        .map(|p| ScatterPoint {
            date: p.date,
            location: p.location.clone(),
            x: p.value_a,
            y: p.value_b,
        })
        .collect();

    let trendline = if pairs.len() > MIN_TRENDLINE_POINTS {
        linear_fit(pairs).map(|fit| {
            let x0 = pairs.iter().map(|p| p.value_a).fold(f64::INFINITY, f64::min);
            let x1 = pairs
                .iter()
                .map(|p| p.value_a)
                .fold(f64::NEG_INFINITY, f64::max);
            Trendline {
                x0,
                y0: fit.predict(x0),
                x1,
                y1: fit.predict(x1),
            }
        })
    } else {
        None
    };

    ScatterChart {
        title: format!(
            "Correlation between {} and {}",
            info_a.title, info_b.title
        ),
        x_label: info_a.axis_label(),
        y_label: info_b.axis_label(),
        points,
        trendline,
    }
}
