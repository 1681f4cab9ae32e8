use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.40);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Line colour for the unprocessed curve drawn under the processed one.
pub const ORIGINAL_COLOR: Color32 = Color32::from_rgb(160, 160, 160);

// ---------------------------------------------------------------------------
// Curve name → Color32
// ---------------------------------------------------------------------------

/// One colour per curve of the loaded log, stable across reprocessing.
#[derive(Debug, Clone, Default)]
pub struct CurveColors {
    mapping: BTreeMap<String, Color32>,
}

impl CurveColors {
    pub fn new<'a>(names: impl ExactSizeIterator<Item = &'a str>) -> Self {
        let palette = generate_palette(names.len());
        CurveColors {
            mapping: names
                .zip(palette)
                .map(|(name, color)| (name.to_string(), color))
                .collect(),
        }
    }

    pub fn color_for(&self, curve: &str) -> Color32 {
        self.mapping.get(curve).copied().unwrap_or(Color32::GRAY)
    }
}
