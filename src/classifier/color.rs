use serde::Serialize;

/// RGB triple, serialised as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Either a named continuous scale or an ordered list of discrete colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColorScale {
    Continuous(&'static str),
    Discrete(Vec<Rgb>),
}

/// Display category of a parameter. Membership is a fixed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParameterCategory {
    Pollutant,
    Temperature,
    Humidity,
    Pressure,
    Wind,
    Other,
}

impl ParameterCategory {
    pub fn of(parameter: &str) -> Self {
        match parameter {
            "pm25" | "pm1" | "pm10" | "co" | "no" | "no2" | "o3" | "so2" | "um003" => {
                Self::Pollutant
            }
            "temperature" => Self::Temperature,
            "relativehumidity" => Self::Humidity,
            "pressure" => Self::Pressure,
            "wind_speed" | "wind_direction" => Self::Wind,
            _ => Self::Other,
        }
    }

    pub fn continuous_scale(self) -> &'static str {
        match self {
            Self::Pollutant => "Reds",
            Self::Temperature => "RdYlBu_r",
            Self::Humidity => "Blues",
            Self::Pressure => "RdBu",
            Self::Wind => "YlOrRd",
            Self::Other => "Viridis",
        }
    }

    /// Discrete colors from low to high
    pub fn discrete_colors(self) -> &'static [Rgb] {
        match self {
            Self::Pollutant => &[
                Rgb(0, 150, 0),
                Rgb(255, 255, 0),
                Rgb(255, 150, 0),
                Rgb(255, 0, 0),
                Rgb(150, 0, 150),
            ],
            Self::Temperature => &[
                Rgb(0, 0, 255),
                Rgb(0, 255, 255),
                Rgb(0, 255, 0),
                Rgb(255, 255, 0),
                Rgb(255, 0, 0),
            ],
            Self::Humidity => &[Rgb(255, 170, 0), Rgb(0, 255, 0), Rgb(0, 0, 255)],
            Self::Pressure => &[Rgb(255, 0, 0), Rgb(255, 255, 255), Rgb(0, 0, 255)],
            Self::Wind => &[
                Rgb(0, 255, 0),
                Rgb(255, 255, 0),
                Rgb(255, 150, 0),
                Rgb(255, 0, 0),
            ],
            Self::Other => &[
                Rgb(0, 0, 255),
                Rgb(0, 255, 0),
                Rgb(255, 255, 0),
                Rgb(255, 0, 0),
            ],
        }
    }

    pub fn color_scale(self, discrete: bool) -> ColorScale {
        if discrete {
            ColorScale::Discrete(self.discrete_colors().to_vec())
        } else {
            ColorScale::Continuous(self.continuous_scale())
        }
    }

    /// Fill color for a value normalised to `0.0..=1.0`.
    ///
    /// Pollutants run green to red, everything else blue to yellow.
    pub fn ramp(self, normalized: f64) -> Rgb {
        let n = normalized.clamp(0.0, 1.0);
        let high = (n * 255.0) as u8;
        let low = ((1.0 - n) * 255.0) as u8;

        match self {
            Self::Pollutant => Rgb(high, low, 50),
            _ => Rgb(high, high, low),
        }
    }
}

/// Color scale for `parameter`, continuous by name or as discrete RGB triples
pub fn color_scale(parameter: &str, discrete: bool) -> ColorScale {
    ParameterCategory::of(parameter).color_scale(discrete)
}
