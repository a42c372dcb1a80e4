use deck_pilot_core::Scene;

use image::{DynamicImage, Rgb, RgbImage};

/// Share of the key height used by the bottom accent bar.
const ACCENT_BAR_DIVISOR: u32 = 8;

/// Key face for `scene`: its background colour with a bottom bar in its
/// text colour.
pub(crate) fn key_image(scene: &Scene, (width, height): (usize, usize)) -> DynamicImage {
    let (width, height) = (width as u32, height as u32);
    let mut image = RgbImage::from_pixel(width, height, Rgb(scene.color));

    let bar_height = (height / ACCENT_BAR_DIVISOR).max(1).min(height);
    for y in height - bar_height..height {
        for x in 0..width {
            image.put_pixel(x, y, Rgb(scene.text_color));
        }
    }

    DynamicImage::ImageRgb8(image)
}
