use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Availability;

// ---------------------------------------------------------------------------
// Availability colours
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Marker colour for an availability category: red, amber, green.
pub fn availability_color(availability: Availability) -> Color32 {
    let hue = match availability {
        Availability::None => 0.0,
        Availability::Partial => 40.0,
        Availability::Ample => 130.0,
    };
    hsl_to_color32(hue, 0.75, 0.5)
}

/// Outline colour for favorite markers.
pub fn favorite_color() -> Color32 {
    hsl_to_color32(50.0, 1.0, 0.55)
}

/// Legend entries (label → colour) for the UI.
pub fn legend_entries() -> Vec<(String, Color32)> {
    Availability::ALL
        .iter()
        .map(|&a| (a.to_string(), availability_color(a)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_have_distinct_colors() {
        let none = availability_color(Availability::None);
        let partial = availability_color(Availability::Partial);
        let ample = availability_color(Availability::Ample);
        assert_ne!(none, partial);
        assert_ne!(partial, ample);
        // Red dominates for "none", green for "ample".
        assert!(none.r() > none.g());
        assert!(ample.g() > ample.r());
        assert_eq!(legend_entries().len(), 3);
    }
}
