use crate::deck::key_image;

use deck_pilot_core::Scene;
use image::GenericImageView;

/// WHAT: Key faces use the scene colours at the device's key size
/// WHY: Users find buttons by colour
#[test]
fn given_scene_colours_when_rendering_key_then_background_and_bar_match() {
    // Given: A scene with custom colours
    let mut scene = Scene::new("Live", Vec::new());
    scene.color = [10, 120, 200];
    scene.text_color = [250, 250, 0];

    // When: Rendering a 72x72 key
    let image = key_image(&scene, (72, 72));

    // Then: Correct size, background on top, bar at the bottom
    assert_eq!(image.dimensions(), (72, 72));
    assert_eq!(image.get_pixel(36, 10).0, [10, 120, 200, 255]);
    assert_eq!(image.get_pixel(36, 71).0, [250, 250, 0, 255]);
    assert_eq!(image.get_pixel(0, 72 - 72 / 8).0, [250, 250, 0, 255]);
    assert_eq!(image.get_pixel(0, 72 - 72 / 8 - 1).0, [10, 120, 200, 255]);
}

/// WHAT: Tiny keys still get a one-pixel bar
/// WHY: Avoids an empty range on small devices
#[test]
fn given_tiny_key_when_rendering_then_single_row_bar() {
    // Given: A default scene
    let scene = Scene::new("Tiny", Vec::new());

    // When: Rendering a 4x4 key
    let image = key_image(&scene, (4, 4));

    // Then: Only the last row is the text colour
    assert_eq!(image.get_pixel(0, 3).0, [255, 255, 255, 255]);
    assert_eq!(image.get_pixel(0, 2).0, [50, 50, 50, 255]);
}
