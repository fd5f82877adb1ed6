use eframe::egui::Color32;
use launch_dash::color::Rgb;

pub mod panels;
pub mod plot;

/// Library colours are plain sRGB; egui wants `Color32`.
pub fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.red, color.green, color.blue)
}
