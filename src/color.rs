use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// False-colour map
// ---------------------------------------------------------------------------

const LUT_SIZE: usize = 256;

/// Jet-like colour for `t` in `[0, 1]`: dark blue → cyan → yellow → dark red.
pub fn jet(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let hue = (1.0 - t) * 240.0;
    // Darken the last eighth at both ends.
    let edge = (t.min(1.0 - t) / 0.125).min(1.0);
    let lightness = 0.25 + 0.25 * edge;
    let hsl = Hsl::new(hue, 1.0, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Intensity → Color32 with a fixed range
// ---------------------------------------------------------------------------

/// Maps intensities to colours over the fixed range `[vmin, vmax]`.
/// Values outside the range saturate; NaN maps to the cold end.
#[derive(Debug, Clone)]
pub struct HeatmapScale {
    pub vmin: f64,
    pub vmax: f64,
    lut: Vec<Color32>,
}

impl HeatmapScale {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        let lut = (0..LUT_SIZE)
            .map(|i| jet(i as f32 / (LUT_SIZE - 1) as f32))
            .collect();
        HeatmapScale { vmin, vmax, lut }
    }

    /// Position of `value` within the range, in `[0, 1]`.
    pub fn normalize(&self, value: f64) -> f64 {
        let range = self.vmax - self.vmin;
        if value.is_nan() || range.abs() < f64::EPSILON {
            return 0.0;
        }
        ((value - self.vmin) / range).clamp(0.0, 1.0)
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let idx = (self.normalize(value) * (LUT_SIZE - 1) as f64).round() as usize;
        self.lut[idx]
    }
}
