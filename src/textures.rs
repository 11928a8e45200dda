//! Rocket sprite loading.
//!
//! The demo looks for `textures/starship.png` next to the executable's
//! working directory; when the file is missing (or fails to decode) it
//! falls back to a procedural silhouette so the scene still runs from a
//! bare checkout.

use std::path::Path;

use crate::error::TextureError;

/// Default sprite location, relative to the working directory.
pub const DEFAULT_SPRITE_PATH: &str = "textures/starship.png";

/// Width/height ratio of the stock sprite, preserved by the fallback.
pub const SPRITE_ASPECT: f32 = 138.0 / 443.0;

/// Decoded RGBA8 sprite data ready for GPU upload.
#[derive(Clone, Debug)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

/// Load a sprite from disk and decode it to RGBA8.
pub fn load_sprite(path: &Path) -> Result<SpriteImage, TextureError> {
    let image = image::open(path)?.to_rgba8();
    let (width, height) = image.dimensions();
    Ok(SpriteImage {
        width,
        height,
        pixels: image.into_raw(),
    })
}

/// The rocket sprite: the file if present, the fallback otherwise.
pub fn rocket_sprite() -> SpriteImage {
    match load_sprite(Path::new(DEFAULT_SPRITE_PATH)) {
        Ok(sprite) => sprite,
        Err(e) => {
            log::warn!(
                "{} unavailable ({}), using the procedural rocket",
                DEFAULT_SPRITE_PATH,
                e
            );
            fallback_rocket()
        }
    }
}

/// Procedural rocket silhouette with the stock sprite's aspect ratio.
///
/// A light-gray body capsule with a nose cone and two fins, alpha
/// elsewhere zero. Deliberately simple; it only needs to read as "rocket"
/// at demo scale.
pub fn fallback_rocket() -> SpriteImage {
    let height: u32 = 256;
    let width: u32 = (height as f32 * SPRITE_ASPECT).round() as u32;
    let mut pixels = vec![0u8; (width * height * 4) as usize];

    let w = width as f32;
    let h = height as f32;
    for y in 0..height {
        for x in 0..width {
            // Normalized coordinates: cx in [-1, 1], v in [0, 1] top to bottom.
            let cx = (x as f32 + 0.5) / w * 2.0 - 1.0;
            let v = (y as f32 + 0.5) / h;

            let body = cx.abs() < 0.55 && v > 0.12 && v < 0.92;
            // Nose cone narrows linearly to a point at the top.
            let nose = v <= 0.12 && cx.abs() < 0.55 * (v / 0.12).max(0.02);
            // Fins flare out near the tail.
            let fins = v > 0.78 && v < 0.95 && cx.abs() < 0.55 + 0.45 * ((v - 0.78) / 0.17);

            if body || nose || fins {
                let shade = if fins && cx.abs() >= 0.55 { 160 } else { 210 };
                let i = ((y * width + x) * 4) as usize;
                pixels[i] = shade;
                pixels[i + 1] = shade;
                pixels[i + 2] = shade + 10;
                pixels[i + 3] = 255;
            }
        }
    }

    SpriteImage {
        width,
        height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_matches_declared_dimensions() {
        let sprite = fallback_rocket();
        assert_eq!(
            sprite.pixels.len(),
            (sprite.width * sprite.height * 4) as usize
        );
        let aspect = sprite.width as f32 / sprite.height as f32;
        assert!((aspect - SPRITE_ASPECT).abs() < 0.02);
    }

    #[test]
    fn fallback_has_opaque_body_and_transparent_corners() {
        let sprite = fallback_rocket();
        let at = |x: u32, y: u32| sprite.pixels[((y * sprite.width + x) * 4 + 3) as usize];

        // Center of the body is opaque.
        assert_eq!(at(sprite.width / 2, sprite.height / 2), 255);
        // Corners are empty sky.
        assert_eq!(at(0, 0), 0);
        assert_eq!(at(sprite.width - 1, 0), 0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_sprite(Path::new("does/not/exist.png")).unwrap_err();
        assert!(matches!(err, TextureError::ImageLoad(_) | TextureError::Io(_)));
    }
}
