//! Teal gradient backdrop and the green palette used by the card widgets.

use eframe::egui::{self, Color32, Painter, Rect, Visuals};

pub const GRADIENT_TOP: Color32 = Color32::from_rgb(0xe0, 0xf7, 0xfa);
pub const GRADIENT_BOTTOM: Color32 = Color32::from_rgb(0x00, 0x69, 0x5c);
/// Number of horizontal bands the backdrop is split into.
pub const GRADIENT_STEPS: usize = 256;

pub const THEME_COLOR: Color32 = Color32::from_rgb(0x2d, 0x6a, 0x4f);
pub const BUTTON_COLOR: Color32 = Color32::from_rgb(0x52, 0xb7, 0x88);
pub const HOVER_COLOR: Color32 = Color32::from_rgb(0xd9, 0xed, 0x92);
pub const CARD_FILL: Color32 = Color32::WHITE;
pub const CARD_STROKE: Color32 = Color32::from_rgb(0xc8, 0xc8, 0xc8);

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::light();
    visuals.panel_fill = Color32::TRANSPARENT;
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(15.0, 5.0);
    ctx.set_style(style);
}

/// Colour of band `step` out of `steps`, interpolated linearly and truncated
/// per channel.
pub fn band_color(step: usize, steps: usize, top: Color32, bottom: Color32) -> Color32 {
    let t = step as f32 / steps.max(1) as f32;
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
    Color32::from_rgb(
        lerp(top.r(), bottom.r()),
        lerp(top.g(), bottom.g()),
        lerp(top.b(), bottom.b()),
    )
}

/// Splits `rect` into `GRADIENT_STEPS` stacked bands, top to bottom.
pub fn gradient_bands(rect: Rect, top: Color32, bottom: Color32) -> Vec<(Rect, Color32)> {
    let band_height = rect.height() / GRADIENT_STEPS as f32;
    (0..GRADIENT_STEPS)
        .map(|i| {
            let y0 = rect.top() + band_height * i as f32;
            let y1 = if i + 1 == GRADIENT_STEPS {
                rect.bottom()
            } else {
                rect.top() + band_height * (i + 1) as f32
            };
            let band = Rect::from_min_max(egui::pos2(rect.left(), y0), egui::pos2(rect.right(), y1));
            (band, band_color(i, GRADIENT_STEPS, top, bottom))
        })
        .collect()
}

/// Repaints the backdrop for the current window size.
pub fn paint_gradient(painter: &Painter, rect: Rect) {
    for (band, color) in gradient_bands(rect, GRADIENT_TOP, GRADIENT_BOTTOM) {
        painter.rect_filled(band, 0.0, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn first_band_is_top_color() {
        assert_eq!(band_color(0, GRADIENT_STEPS, GRADIENT_TOP, GRADIENT_BOTTOM), GRADIENT_TOP);
    }

    #[test]
    fn last_band_is_close_to_bottom_color() {
        let last = band_color(GRADIENT_STEPS - 1, GRADIENT_STEPS, GRADIENT_TOP, GRADIENT_BOTTOM);
        assert!(last.r().abs_diff(GRADIENT_BOTTOM.r()) <= 1);
        assert!(last.g().abs_diff(GRADIENT_BOTTOM.g()) <= 1);
        assert!(last.b().abs_diff(GRADIENT_BOTTOM.b()) <= 1);
    }

    #[test]
    fn midpoint_is_halfway() {
        let mid = band_color(128, 256, Color32::from_rgb(0, 100, 200), Color32::from_rgb(200, 0, 0));
        assert_eq!(mid, Color32::from_rgb(100, 50, 100));
    }

    #[rstest]
    #[case(600.0, 750.0)]
    #[case(320.0, 201.5)]
    #[case(1920.0, 1080.0)]
    fn bands_tile_the_window(#[case] w: f32, #[case] h: f32) {
        let rect = Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(w, h));
        let bands = gradient_bands(rect, GRADIENT_TOP, GRADIENT_BOTTOM);
        assert_eq!(bands.len(), GRADIENT_STEPS);
        assert_eq!(bands[0].0.top(), 0.0);
        assert_eq!(bands[GRADIENT_STEPS - 1].0.bottom(), h);
        for pair in bands.windows(2) {
            assert_eq!(pair[0].0.bottom(), pair[1].0.top());
            assert_eq!(pair[0].0.width(), w);
        }
    }
}
