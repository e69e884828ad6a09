use crate::classifier::ParameterCategory;
use crate::models::{GeoPoint, ParameterInfo};
use crate::utils::constants::{MAP_BASE_RADIUS, MAP_FILL_ALPHA, MAP_STYLE, MAP_ZOOM};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub value: f64,
    pub radius: f64,
    pub fill: [u8; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

/// Scatter layer of site means with size and color scaled to the value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayer {
    pub map_style: &'static str,
    pub tooltip: String,
    pub view: Option<ViewState>,
    pub points: Vec<MapPoint>,
}

pub fn map_layer(sites: &[GeoPoint], info: &ParameterInfo) -> MapLayer {
    let category = ParameterCategory::of(&info.id);

    let min = sites.iter().map(|s| s.mean_value).fold(f64::INFINITY, f64::min);
    let max = sites
        .iter()
        .map(|s| s.mean_value)
        .fold(f64::NEG_INFINITY, f64::max);
    let normalize = |value: f64| {
        if max > min {
            (value - min) / (max - min)
        } else {
            0.5
        }
    };

    let points = sites
        .iter()
        .map(|site| {
            let n = normalize(site.mean_value);
            let rgb = category.ramp(n);
            MapPoint {
                location: site.location.clone(),
                latitude: site.latitude,
                longitude: site.longitude,
                value: site.mean_value,
                radius: MAP_BASE_RADIUS * (n + 0.5),
                fill: [rgb.0, rgb.1, rgb.2, MAP_FILL_ALPHA],
            }
        })
        .collect();

    let view = (!sites.is_empty()).then(|| {
        let count = sites.len() as f64;
        ViewState {
            latitude: sites.iter().map(|s| s.latitude).sum::<f64>() / count,
            longitude: sites.iter().map(|s| s.longitude).sum::<f64>() / count,
            zoom: MAP_ZOOM,
            pitch: 0.0,
        }
    });

    MapLayer {
        map_style: MAP_STYLE,
        tooltip: format!(
            "<b>{{location}}</b><br>{}: {{value}} {}",
            info.title, info.unit
        ),
        view,
        points,
    }
}
