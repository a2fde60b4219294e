//! Texture assets and tiled sampling.
//!
//! Textures are decoded once during setup into a [`TextureStore`] keyed by
//! name and are read-only afterwards. The tracer only sees the
//! [`TextureProvider`] capability, so tests can hand it in-memory fakes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use log::debug;
use serde::Deserialize;

use crate::error::{RenderError, Result};
use crate::material::{rgb8, Color};

/// Read-only texture lookup by key.
pub trait TextureProvider: Sync {
    /// Pixel dimensions of the texture, or None for an unknown key.
    fn size(&self, key: &str) -> Option<(u32, u32)>;

    /// Color of one texel, or None for an unknown key or out-of-range texel.
    fn texel(&self, key: &str, x: u32, y: u32) -> Option<Color>;

    fn contains(&self, key: &str) -> bool {
        self.size(key).is_some()
    }
}

/// A decoded RGB pixel grid.
#[derive(Debug, Clone)]
pub struct Texture {
    image: RgbImage,
}

impl Texture {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Two-color checkerboard of `cell`-pixel squares.
    pub fn checker(width: u32, height: u32, cell: u32, a: [u8; 3], b: [u8; 3]) -> Self {
        let cell = cell.max(1);
        let image = RgbImage::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                Rgb(a)
            } else {
                Rgb(b)
            }
        });
        Self::new(image)
    }

    /// Single-texel texture of one color.
    pub fn solid(color: [u8; 3]) -> Self {
        Self::new(RgbImage::from_pixel(1, 1, Rgb(color)))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn texel(&self, x: u32, y: u32) -> Option<Color> {
        self.image
            .get_pixel_checked(x, y)
            .map(|&Rgb([r, g, b])| rgb8(r, g, b))
    }
}

/// Where a texture's pixels come from.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TextureSource {
    /// Image file decoded with the `image` crate.
    File { path: PathBuf },
    /// Procedural checkerboard.
    Checker { checker: CheckerSpec },
    /// One flat color.
    Solid { solid: [u8; 3] },
}

/// Parameters of a procedural checkerboard texture.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CheckerSpec {
    #[serde(default = "default_checker_size")]
    pub width: u32,
    #[serde(default = "default_checker_size")]
    pub height: u32,
    #[serde(default = "default_checker_cell")]
    pub cell: u32,
    pub a: [u8; 3],
    pub b: [u8; 3],
}

const fn default_checker_size() -> u32 {
    64
}

const fn default_checker_cell() -> u32 {
    8
}

/// Texture table keyed by name, filled once before rendering.
#[derive(Debug, Clone, Default)]
pub struct TextureStore {
    textures: HashMap<String, Texture>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture, replacing any previous one under the same key.
    pub fn insert(&mut self, key: impl Into<String>, texture: Texture) {
        self.textures.insert(key.into(), texture);
    }

    /// Decode an image file and register it under `key`.
    pub fn load(&mut self, key: &str, path: &Path) -> Result<()> {
        let image = image::open(path)
            .map_err(|source| RenderError::TextureLoad {
                key: key.to_string(),
                source,
            })?
            .to_rgb8();
        if image.width() == 0 || image.height() == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "texture '{key}' at {} is empty",
                path.display()
            )));
        }
        debug!(
            "Loaded texture '{}' ({}x{}) from {}",
            key,
            image.width(),
            image.height(),
            path.display()
        );
        self.insert(key, Texture::new(image));
        Ok(())
    }

    /// Build a store from configured sources. Relative file paths resolve
    /// against `base_dir`.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (&'a String, &'a TextureSource)>,
        base_dir: &Path,
    ) -> Result<Self> {
        let mut store = Self::new();
        for (key, source) in sources {
            match source {
                TextureSource::File { path } => store.load(key, &base_dir.join(path))?,
                TextureSource::Checker { checker } => store.insert(
                    key.as_str(),
                    Texture::checker(checker.width, checker.height, checker.cell, checker.a, checker.b),
                ),
                TextureSource::Solid { solid } => store.insert(key.as_str(), Texture::solid(*solid)),
            }
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureProvider for TextureStore {
    fn size(&self, key: &str) -> Option<(u32, u32)> {
        self.textures.get(key).map(|t| (t.width(), t.height()))
    }

    fn texel(&self, key: &str, x: u32, y: u32) -> Option<Color> {
        self.textures.get(key).and_then(|t| t.texel(x, y))
    }
}

/// Wrap a surface coordinate onto `[0, size)` texel indices.
fn texel_index(coord: f32, size: u32) -> u32 {
    let wrapped = coord.rem_euclid(size as f32).floor();
    // `as` saturates, and maps NaN to 0.
    (wrapped as u32).min(size.saturating_sub(1))
}

/// Sample `key` at surface coordinates `(x, y)`, tiling the texture across
/// the surface: the texel is `(floor(x mod w), floor(y mod h))`.
pub fn sample_tiled(textures: &dyn TextureProvider, key: &str, x: f32, y: f32) -> Result<Color> {
    let (w, h) = textures
        .size(key)
        .ok_or_else(|| RenderError::MissingAsset(key.to_string()))?;
    textures
        .texel(key, texel_index(x, w), texel_index(y, h))
        .ok_or_else(|| RenderError::MissingAsset(key.to_string()))
}

/// Sample `key` with coordinates first normalized by the surface extent, so
/// the texture spans the whole surface once.
pub fn sample_normalized(
    textures: &dyn TextureProvider,
    key: &str,
    x: f32,
    y: f32,
    surface_width: f32,
    surface_height: f32,
) -> Result<Color> {
    let (w, h) = textures
        .size(key)
        .ok_or_else(|| RenderError::MissingAsset(key.to_string()))?;
    sample_tiled(
        textures,
        key,
        x / surface_width * w as f32,
        y / surface_height * h as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TextureStore {
        let mut store = TextureStore::new();
        // 2x2: (0,0) red, (1,0) green, (0,1) blue, (1,1) white
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(1, 0, Rgb([0, 255, 0]));
        image.put_pixel(0, 1, Rgb([0, 0, 255]));
        image.put_pixel(1, 1, Rgb([255, 255, 255]));
        store.insert("quad", Texture::new(image));
        store
    }

    #[test]
    fn test_sample_tiled_wraps() {
        let store = store();
        assert_eq!(sample_tiled(&store, "quad", 0.5, 0.5).unwrap(), rgb8(255, 0, 0));
        assert_eq!(sample_tiled(&store, "quad", 1.2, 0.0).unwrap(), rgb8(0, 255, 0));
        // 3.5 mod 2 = 1.5 -> column 1; 2.0 mod 2 = 0 -> row 0
        assert_eq!(sample_tiled(&store, "quad", 3.5, 2.0).unwrap(), rgb8(0, 255, 0));
        assert_eq!(sample_tiled(&store, "quad", 0.0, 5.9).unwrap(), rgb8(0, 0, 255));
    }

    #[test]
    fn test_sample_tiled_negative_coordinate_wraps_forward() {
        let store = store();
        // -0.5 mod 2 = 1.5 -> column 1
        assert_eq!(sample_tiled(&store, "quad", -0.5, 1.0).unwrap(), rgb8(255, 255, 255));
    }

    #[test]
    fn test_sample_missing_key() {
        let err = sample_tiled(&store(), "nope", 0.0, 0.0).unwrap_err();
        assert!(matches!(err, RenderError::MissingAsset(ref k) if k == "nope"));
    }

    #[test]
    fn test_sample_normalized_spans_surface() {
        let store = store();
        // Halfway across a 200-unit face lands on texel column 1.
        let c = sample_normalized(&store, "quad", 150.0, 10.0, 200.0, 100.0).unwrap();
        assert_eq!(c, rgb8(0, 255, 0));
    }

    #[test]
    fn test_checker_and_solid() {
        let checker = Texture::checker(4, 4, 2, [10, 10, 10], [200, 200, 200]);
        assert_eq!(checker.texel(0, 0), Some(rgb8(10, 10, 10)));
        assert_eq!(checker.texel(2, 0), Some(rgb8(200, 200, 200)));
        assert_eq!(checker.texel(2, 2), Some(rgb8(10, 10, 10)));
        assert_eq!(checker.texel(4, 0), None);

        let solid = Texture::solid([1, 2, 3]);
        assert_eq!((solid.width(), solid.height()), (1, 1));
    }

    #[test]
    fn test_texel_index_nan_is_zero() {
        assert_eq!(texel_index(f32::NAN, 16), 0);
        assert_eq!(texel_index(f32::INFINITY, 16), 0);
    }
}
