use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart colors
// ---------------------------------------------------------------------------

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues, one
/// per metric bar.
pub fn distinct_colors(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n.max(1) as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.70, 0.55))
        })
        .collect()
}

/// Green→red gradient for predicted mortality probability: hue slides from
/// 120° (green) at 0.0 down to 0° (red) at 1.0.
pub fn risk_color(probability: f64) -> Color32 {
    let p = probability.clamp(0.0, 1.0) as f32;
    hsl_to_color32(Hsl::new(120.0 * (1.0 - p), 0.85, 0.45))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_colors_are_distinct() {
        let colors = distinct_colors(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn risk_gradient_endpoints() {
        let low = risk_color(0.0);
        let high = risk_color(1.0);
        // green end has no red component to speak of, red end no green
        assert!(low.g() > low.r());
        assert!(high.r() > high.g());
    }
}
