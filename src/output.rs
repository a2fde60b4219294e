//! # Output Module
//!
//! Writes rendered frames to disk:
//! - PNG export, clamping each channel to [0, 1] and scaling to 8 bits
//! - EXR export keeping the unclamped linear f32 values
//!
//! Shaded colors are already display values, so PNG export applies no gamma
//! curve.

use std::path::Path;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb, RgbImage};
use log::info;

use crate::error::{RenderError, Result};

/// Output formats selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Exr,
}

impl OutputFormat {
    /// Pick the format from the extension of `path`, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "png" => Ok(OutputFormat::Png),
            "exr" => Ok(OutputFormat::Exr),
            _ => Err(RenderError::UnsupportedOutput(path.display().to_string())),
        }
    }
}

/// Clamp a channel to [0, 1] and scale it to 8 bits.
pub fn to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert an f32 frame to 8-bit RGB.
pub fn to_rgb8(image: &ImageBuffer<Rgb<f32>, Vec<f32>>) -> RgbImage {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([to_u8(pixel[0]), to_u8(pixel[1]), to_u8(pixel[2])])
    })
}

/// Save an f32 RGB image as an 8-bit PNG.
pub fn save_image_as_png(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &Path) -> Result<()> {
    to_rgb8(image).save(output_path)?;
    info!("Image saved as {}", output_path.display());
    Ok(())
}

/// Save an f32 RGB image as EXR with full precision.
pub fn save_image_as_exr(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &Path) -> Result<()> {
    let width = image.width() as usize;
    let pixels = image
        .pixels()
        .map(|rgb| (rgb[0], rgb[1], rgb[2]))
        .collect::<Vec<(f32, f32, f32)>>();

    write_rgb_file(output_path, width, image.height() as usize, |x, y| pixels[y * width + x])
        .map_err(|e| RenderError::Exr(e.to_string()))?;

    info!("HDR image saved as EXR: {}", output_path.display());
    Ok(())
}

/// Save in the format named by the extension of `output_path`.
pub fn save_image(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &Path) -> Result<()> {
    match OutputFormat::from_path(output_path)? {
        OutputFormat::Png => save_image_as_png(image, output_path),
        OutputFormat::Exr => save_image_as_exr(image, output_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a.png")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("dir/b.EXR")).unwrap(), OutputFormat::Exr);
        assert!(matches!(
            OutputFormat::from_path(Path::new("c.jpg")),
            Err(RenderError::UnsupportedOutput(_))
        ));
        assert!(OutputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_channels_clamp_at_output() {
        assert_eq!(to_u8(-0.5), 0);
        assert_eq!(to_u8(0.0), 0);
        assert_eq!(to_u8(1.0), 255);
        assert_eq!(to_u8(7.0), 255);
        assert_eq!(to_u8(128.0 / 255.0), 128);
    }

    #[test]
    fn test_to_rgb8_keeps_layout() {
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(2, 1);
        image.put_pixel(1, 0, Rgb([1.5, 0.5, -1.0]));
        let out = to_rgb8(&image);
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(out.get_pixel(1, 0).0, [255, 128, 0]);
    }
}
