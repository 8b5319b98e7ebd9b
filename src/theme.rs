// 🎨 Themes - fixed palette names and donut colors
// Every name maps to a palette; unknown names are rejected at parse time

use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// COLOR THEME
// ============================================================================

/// Continuous color scheme used by the heatmap and choropleth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Blues,
    Cividis,
    Greens,
    Inferno,
    Magma,
    Plasma,
    Reds,
    Rainbow,
    Turbo,
    Viridis,
}

impl ColorTheme {
    /// Selector order
    pub const ALL: [ColorTheme; 10] = [
        ColorTheme::Blues,
        ColorTheme::Cividis,
        ColorTheme::Greens,
        ColorTheme::Inferno,
        ColorTheme::Magma,
        ColorTheme::Plasma,
        ColorTheme::Reds,
        ColorTheme::Rainbow,
        ColorTheme::Turbo,
        ColorTheme::Viridis,
    ];

    /// Scheme name understood by Vega-Lite and Plotly
    pub fn name(&self) -> &'static str {
        match self {
            ColorTheme::Blues => "blues",
            ColorTheme::Cividis => "cividis",
            ColorTheme::Greens => "greens",
            ColorTheme::Inferno => "inferno",
            ColorTheme::Magma => "magma",
            ColorTheme::Plasma => "plasma",
            ColorTheme::Reds => "reds",
            ColorTheme::Rainbow => "rainbow",
            ColorTheme::Turbo => "turbo",
            ColorTheme::Viridis => "viridis",
        }
    }

    pub fn next(&self) -> Self {
        let i = self.position();
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let i = self.position();
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    /// Five evenly spaced stops, low to high
    fn stops(&self) -> [u32; 5] {
        match self {
            ColorTheme::Blues => [0xf7fbff, 0xc6dbef, 0x6baed6, 0x2171b5, 0x08306b],
            ColorTheme::Cividis => [0x00224e, 0x414d6b, 0x7c7b78, 0xbcaf6f, 0xfee838],
            ColorTheme::Greens => [0xf7fcf5, 0xc7e9c0, 0x74c476, 0x238b45, 0x00441b],
            ColorTheme::Inferno => [0x000004, 0x56106e, 0xbb3754, 0xf98e09, 0xfcffa4],
            ColorTheme::Magma => [0x000004, 0x51127c, 0xb73779, 0xfc8961, 0xfcfdbf],
            ColorTheme::Plasma => [0x0d0887, 0x7e03a8, 0xcc4778, 0xf89540, 0xf0f921],
            ColorTheme::Reds => [0xfff5f0, 0xfcbba1, 0xfb6a4a, 0xcb181d, 0x67000d],
            ColorTheme::Rainbow => [0x6e40aa, 0xff5e63, 0xaff05b, 0x1ac7c2, 0x6e40aa],
            ColorTheme::Turbo => [0x30123b, 0x4686fb, 0xa2fc3c, 0xfb8022, 0x7a0403],
            ColorTheme::Viridis => [0x440154, 0x3b528b, 0x21918c, 0x5ec962, 0xfde725],
        }
    }

    /// `(position, "#rrggbb")` pairs for Plotly's `colorscale`
    pub fn colorscale(&self) -> Vec<(f64, String)> {
        let stops = self.stops();
        let last = (stops.len() - 1) as f64;
        stops
            .iter()
            .enumerate()
            .map(|(i, hex)| (i as f64 / last, format!("#{:06x}", hex)))
            .collect()
    }

    /// Interpolated RGB at `t` in [0, 1] (clamped; NaN maps to the low end)
    pub fn rgb_at(&self, t: f64) -> (u8, u8, u8) {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let stops = self.stops();
        let scaled = t * (stops.len() - 1) as f64;
        let lo = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - lo as f64;

        let (a, b) = (split_rgb(stops[lo]), split_rgb(stops[lo + 1]));
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;

        (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }
}

fn split_rgb(hex: u32) -> (u8, u8, u8) {
    (((hex >> 16) & 0xff) as u8, ((hex >> 8) & 0xff) as u8, (hex & 0xff) as u8)
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorTheme {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ColorTheme::ALL
            .iter()
            .copied()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| DashboardError::UnknownTheme {
                name: s.to_string(),
            })
    }
}

// ============================================================================
// DONUT COLOR
// ============================================================================

/// Accent for the donut gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonutColor {
    Blue,
    Green,
    Orange,
    Red,
}

impl DonutColor {
    /// (value arc, background ring)
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self {
            DonutColor::Blue => ("#29b5e8", "#155F7A"),
            DonutColor::Green => ("#27AE60", "#12783D"),
            DonutColor::Orange => ("#F39C12", "#875A12"),
            DonutColor::Red => ("#E74C3C", "#781F16"),
        }
    }
}
