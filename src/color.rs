use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::LineSelection;

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: product line → Color32
// ---------------------------------------------------------------------------

/// Maps each product line to a distinct accent colour, used for the
/// selector entries and the chart line.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    all_lines_color: Color32,
}

impl ColorMap {
    /// Hues are assigned in the order the lines are given.
    pub fn new(product_lines: &[String]) -> Self {
        let mapping = product_lines
            .iter()
            .cloned()
            .zip(generate_palette(product_lines.len()))
            .collect();

        ColorMap {
            mapping,
            all_lines_color: Color32::LIGHT_BLUE,
        }
    }

    /// Colour for a selection; unknown lines and "all" get the neutral accent.
    pub fn color_for(&self, selection: &LineSelection) -> Color32 {
        selection
            .as_line()
            .and_then(|line| self.mapping.get(line))
            .copied()
            .unwrap_or(self.all_lines_color)
    }
}
