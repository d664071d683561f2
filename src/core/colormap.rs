use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Named colormaps available to images, contour sets and colorbars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    #[default]
    Viridis,
    Jet,
    Gray,
    Hot,
    Coolwarm,
}

const VIRIDIS_STOPS: [(f64, [f64; 3]); 5] = [
    (0.00, [0.267_004, 0.004_874, 0.329_415]),
    (0.25, [0.229_739, 0.322_361, 0.545_706]),
    (0.50, [0.127_568, 0.566_949, 0.550_556]),
    (0.75, [0.369_214, 0.788_888, 0.382_914]),
    (1.00, [0.993_248, 0.906_157, 0.143_936]),
];

const COOLWARM_STOPS: [(f64, [f64; 3]); 3] = [
    (0.0, [0.229_806, 0.298_718, 0.753_683]),
    (0.5, [0.865_003, 0.865_003, 0.865_003]),
    (1.0, [0.705_673, 0.015_556, 0.150_233]),
];

impl Colormap {
    pub const ALL: [Self; 5] = [
        Self::Viridis,
        Self::Jet,
        Self::Gray,
        Self::Hot,
        Self::Coolwarm,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Viridis => "viridis",
            Self::Jet => "jet",
            Self::Gray => "gray",
            Self::Hot => "hot",
            Self::Coolwarm => "coolwarm",
        }
    }

    /// Maps a normalized value to an opaque color.
    ///
    /// Values are clamped to `[0, 1]`; NaN maps to the low end.
    #[must_use]
    pub fn map(self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let [red, green, blue] = match self {
            Self::Viridis => interpolate_stops(&VIRIDIS_STOPS, t),
            Self::Coolwarm => interpolate_stops(&COOLWARM_STOPS, t),
            Self::Jet => [
                (1.5 - 4.0 * (t - 0.75).abs()).clamp(0.0, 1.0),
                (1.5 - 4.0 * (t - 0.5).abs()).clamp(0.0, 1.0),
                (1.5 - 4.0 * (t - 0.25).abs()).clamp(0.0, 1.0),
            ],
            Self::Gray => [t, t, t],
            Self::Hot => [
                (t / 0.365_079).clamp(0.0, 1.0),
                ((t - 0.365_079) / (0.746_032 - 0.365_079)).clamp(0.0, 1.0),
                ((t - 0.746_032) / (1.0 - 0.746_032)).clamp(0.0, 1.0),
            ],
        };
        Color::rgb(red, green, blue)
    }

    /// Samples `count` evenly spaced colors from low to high.
    #[must_use]
    pub fn lut(self, count: usize) -> Vec<Color> {
        match count {
            0 => Vec::new(),
            1 => vec![self.map(0.5)],
            _ => {
                let denominator = (count - 1) as f64;
                (0..count)
                    .map(|index| self.map(index as f64 / denominator))
                    .collect()
            }
        }
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormap {
    type Err = ChartError;

    fn from_str(name: &str) -> ChartResult<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|colormap| colormap.name() == lowered)
            .or(match lowered.as_str() {
                "grey" | "greys" => Some(Self::Gray),
                _ => None,
            })
            .ok_or_else(|| ChartError::InvalidData(format!("unknown colormap `{name}`")))
    }
}

fn interpolate_stops(stops: &[(f64, [f64; 3])], t: f64) -> [f64; 3] {
    let Some(upper_index) = stops.iter().position(|(position, _)| *position >= t) else {
        return stops.last().map_or([0.0; 3], |(_, rgb)| *rgb);
    };
    if upper_index == 0 {
        return stops[0].1;
    }
    let (low_pos, low) = stops[upper_index - 1];
    let (high_pos, high) = stops[upper_index];
    let local = (t - low_pos) / (high_pos - low_pos);
    [
        low[0] + (high[0] - low[0]) * local,
        low[1] + (high[1] - low[1]) * local,
        low[2] + (high[2] - low[2]) * local,
    ]
}

#[cfg(test)]
mod tests {
    use super::Colormap;
    use crate::render::Color;

    #[test]
    fn jet_runs_from_dark_blue_to_dark_red() {
        assert_eq!(Colormap::Jet.map(0.0), Color::rgb(0.0, 0.0, 0.5));
        assert_eq!(Colormap::Jet.map(1.0), Color::rgb(0.5, 0.0, 0.0));
        assert_eq!(Colormap::Jet.map(0.5), Color::rgb(0.5, 1.0, 0.5));
    }

    #[test]
    fn out_of_range_values_clamp_to_endpoints() {
        for colormap in Colormap::ALL {
            assert_eq!(colormap.map(-3.0), colormap.map(0.0));
            assert_eq!(colormap.map(7.0), colormap.map(1.0));
            assert_eq!(colormap.map(f64::NAN), colormap.map(0.0));
        }
    }

    #[test]
    fn every_mapped_color_is_valid() {
        for colormap in Colormap::ALL {
            for color in colormap.lut(33) {
                color.validate().expect("valid color");
            }
        }
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("JET".parse::<Colormap>().expect("jet"), Colormap::Jet);
        assert_eq!("greys".parse::<Colormap>().expect("gray"), Colormap::Gray);
        assert!("rainbow-ish".parse::<Colormap>().is_err());
    }

    #[test]
    fn viridis_hits_its_midpoint_stop() {
        let mid = Colormap::Viridis.map(0.5);
        assert!((mid.green - 0.566_949).abs() < 1e-12);
    }
}
