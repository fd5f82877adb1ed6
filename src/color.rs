use std::collections::{BTreeMap, BTreeSet};

use palette::{Hsl, IntoColor, Srgb};

/// 8-bit sRGB colour. Front ends convert it to their own colour type.
pub type Rgb = Srgb<u8>;

/// Fallback for categories outside the map.
pub const GRAY: Rgb = Srgb::new(160, 160, 160);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

/// `#rrggbb` for SVG / CSS output.
pub fn to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: category label → colour
// ---------------------------------------------------------------------------

/// Maps category labels (booster versions) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Rgb>,
    default_color: Rgb,
}

impl ColorMap {
    /// Build a colour map from the sorted set of categories.
    pub fn new(categories: &BTreeSet<String>) -> Self {
        let palette = generate_palette(categories.len());
        let mapping: BTreeMap<String, Rgb> = categories
            .iter()
            .cloned()
            .zip(palette)
            .collect();

        ColorMap {
            mapping,
            default_color: GRAY,
        }
    }

    /// Look up the colour for a category; unknown ones are grey.
    pub fn color_for(&self, category: &str) -> Rgb {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Rgb)> {
        self.mapping
            .iter()
            .map(|(label, c)| (label.clone(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn unknown_category_is_grey() {
        let cats: BTreeSet<String> = ["FT", "B5"].iter().map(|s| s.to_string()).collect();
        let map = ColorMap::new(&cats);
        assert_eq!(map.color_for("v1.0"), GRAY);
        assert_ne!(map.color_for("FT"), GRAY);
        let legend: Vec<String> = map.legend_entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(legend, vec!["B5", "FT"]);
    }

    #[test]
    fn hex_is_lowercase_rgb() {
        assert_eq!(to_hex(Rgb::new(255, 16, 0)), "#ff1000");
    }
}
