// 🎨 Linear Color Scale
// Maps a price onto green → yellow → red

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const GREEN: Rgb = Rgb(0x00, 0x80, 0x00);
    pub const YELLOW: Rgb = Rgb(0xff, 0xff, 0x00);
    pub const RED: Rgb = Rgb(0xff, 0x00, 0x00);
    /// Used for regions without price data
    pub const GRAY: Rgb = Rgb(0x80, 0x80, 0x80);

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// Three stops spread evenly over `[vmin, vmax]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearColormap {
    pub stops: [Rgb; 3],
    pub vmin: f64,
    pub vmax: f64,
}

impl LinearColormap {
    pub fn new(stops: [Rgb; 3], vmin: f64, vmax: f64) -> Self {
        LinearColormap { stops, vmin, vmax }
    }

    /// Low = green, mid = yellow, high = red
    pub fn price_scale(vmin: f64, vmax: f64) -> Self {
        Self::new([Rgb::GREEN, Rgb::YELLOW, Rgb::RED], vmin, vmax)
    }

    /// Position of `value` in `[0, 1]`, clamped
    pub fn position(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span <= 0.0 || !span.is_finite() {
            return 0.0;
        }
        ((value - self.vmin) / span).clamp(0.0, 1.0)
    }

    pub fn color_at(&self, value: f64) -> Rgb {
        let t = self.position(value);
        if t <= 0.5 {
            self.stops[0].lerp(self.stops[1], t * 2.0)
        } else {
            self.stops[1].lerp(self.stops[2], (t - 0.5) * 2.0)
        }
    }

    pub fn color_for(&self, value: Option<f64>) -> Rgb {
        value.map_or(Rgb::GRAY, |v| self.color_at(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_at_ends_and_middle() {
        let scale = LinearColormap::price_scale(100.0, 300.0);

        assert_eq!(scale.color_at(100.0), Rgb::GREEN);
        assert_eq!(scale.color_at(200.0), Rgb::YELLOW);
        assert_eq!(scale.color_at(300.0), Rgb::RED);
    }

    #[test]
    fn test_values_are_clamped() {
        let scale = LinearColormap::price_scale(100.0, 300.0);

        assert_eq!(scale.color_at(-5.0), Rgb::GREEN);
        assert_eq!(scale.color_at(1e9), Rgb::RED);
    }

    #[test]
    fn test_interpolates_between_stops() {
        let scale = LinearColormap::price_scale(0.0, 100.0);
        assert_eq!(scale.color_at(75.0), Rgb(0xff, 0x80, 0x00));
    }

    #[test]
    fn test_missing_value_is_gray() {
        let scale = LinearColormap::price_scale(0.0, 1.0);
        assert_eq!(scale.color_for(None), Rgb::GRAY);
    }

    #[test]
    fn test_degenerate_range_maps_to_low_stop() {
        let scale = LinearColormap::price_scale(50.0, 50.0);
        assert_eq!(scale.color_at(50.0), Rgb::GREEN);
    }

    #[test]
    fn test_serializes_as_hex() {
        assert_eq!(serde_json::to_string(&Rgb::YELLOW).unwrap(), "\"#ffff00\"");
    }
}
