use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

// ---------------------------------------------------------------------------
// Drug-likeness ramp: score in [0, 1] → red … green
// ---------------------------------------------------------------------------

/// Colour for a drug-likeness score; out-of-range scores are clamped and
/// NaN renders grey.
pub fn drug_likeness_color(score: f64) -> Color32 {
    if score.is_nan() {
        return Color32::GRAY;
    }
    let t = score.clamp(0.0, 1.0) as f32;
    hsl_to_color32(t * 120.0, 0.75, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(3).len(), 3);
    }

    #[test]
    fn ramp_runs_from_red_to_green() {
        let low = drug_likeness_color(0.0);
        let high = drug_likeness_color(1.0);
        assert!(low.r() > low.g());
        assert!(high.g() > high.r());
        assert_eq!(drug_likeness_color(f64::NAN), Color32::GRAY);
        assert_eq!(drug_likeness_color(2.0), high);
    }
}
