use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};

use crate::utils::linlin;

/// Straight-alpha RGBA color, components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Blend towards white by `amount` in `[0, 1]`.
    pub fn lighter(self, amount: f32) -> Self {
        let t = amount.clamp(0.0, 1.0);
        Self {
            r: self.r + (1.0 - self.r) * t,
            g: self.g + (1.0 - self.g) * t,
            b: self.b + (1.0 - self.b) * t,
            a: self.a,
        }
    }

    /// Blend towards black by `amount` in `[0, 1]`.
    pub fn darker(self, amount: f32) -> Self {
        let t = 1.0 - amount.clamp(0.0, 1.0);
        Self {
            r: self.r * t,
            g: self.g * t,
            b: self.b * t,
            a: self.a,
        }
    }

    pub fn parse_hex(hex: &str) -> Result<Self> {
        let s = hex.trim_start_matches('#');
        if s.len() != 6 && s.len() != 8 {
            return Err(eyre!("expected #rrggbb or #rrggbbaa, got {hex:?}"));
        }
        let byte = |i: usize| -> Result<f32> {
            let v = u8::from_str_radix(&s[i..i + 2], 16)
                .map_err(|e| eyre!("bad hex component in {hex:?}: {e}"))?;
            Ok(v as f32 / 255.0)
        };
        let a = if s.len() == 8 { byte(6)? } else { 1.0 };
        Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, a))
    }

    pub fn to_hex(self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            c(self.r),
            c(self.g),
            c(self.b),
            c(self.a)
        )
    }
}

impl Serialize for Rgba {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

pub const GREYISH_BLUE: Rgba = Rgba::new(89.0 / 255.0, 135.0 / 255.0, 164.0 / 255.0, 1.0);
pub const DARK_GREY_BLUE: Rgba = Rgba::new(50.0 / 255.0, 81.0 / 255.0, 108.0 / 255.0, 1.0);
pub const PALE_GREY: Rgba = Rgba::new(247.0 / 255.0, 247.0 / 255.0, 250.0 / 255.0, 1.0);

/// Number of steps in the segment-band color ramp.
pub const COLOR_RAMP_LEN: usize = 10;

/// Visual constants for the default primitive kinds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartTheme {
    pub curve_color: Rgba,
    pub curve_line_width: f32,
    pub point_color: Rgba,
    pub point_size: f32,
    pub selected_point_color: Rgba,
    pub selected_point_size: f32,
    pub current_point_color: Rgba,
    pub current_point_size: f32,
    pub segment_color: Rgba,
    pub segment_line_width: f32,
    pub bar_color: Rgba,
    pub unselected_color: Rgba,
    pub selected_opacity: f32,
    pub unselected_opacity: f32,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            curve_color: GREYISH_BLUE,
            curve_line_width: 4.0,
            point_color: GREYISH_BLUE,
            point_size: 8.0,
            selected_point_color: DARK_GREY_BLUE,
            selected_point_size: 13.0,
            current_point_color: PALE_GREY,
            current_point_size: 11.0,
            segment_color: GREYISH_BLUE,
            segment_line_width: 8.0,
            bar_color: Rgba::new(0.0, 0.0, 0.0, 1.0),
            unselected_color: Rgba::new(0.0, 0.0, 0.0, 0.0),
            selected_opacity: 1.0,
            unselected_opacity: 0.0,
        }
    }
}

impl ChartTheme {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| eyre!("invalid theme json: {e}"))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| eyre!("theme serialization failed: {e}"))
    }

    /// Ramp of `COLOR_RAMP_LEN` shades of `base`, light to dark.
    pub fn color_ramp(base: Rgba) -> Vec<Rgba> {
        (0..COLOR_RAMP_LEN)
            .map(|i| {
                let t = i as f32 / (COLOR_RAMP_LEN - 1) as f32;
                if t < 0.5 {
                    base.lighter(0.5 - t)
                } else {
                    base.darker(t - 0.5)
                }
            })
            .collect()
    }

    /// Maps a data value into the ramp, with alpha proportional to the
    /// ramp position.
    pub fn ramp_color(base: Rgba, value: f32, min: f32, max: f32) -> Rgba {
        let ramp = Self::color_ramp(base);
        let pos = linlin(
            value as f64,
            min as f64,
            max as f64,
            0.0,
            (COLOR_RAMP_LEN - 1) as f64,
        )
        .clamp(0.0, (COLOR_RAMP_LEN - 1) as f64);
        let idx = pos.round() as usize;
        ramp[idx].with_alpha((pos / (COLOR_RAMP_LEN - 1) as f64) as f32)
    }
}
