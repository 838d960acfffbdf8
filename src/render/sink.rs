use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use log::info;

use crate::error::{KumoError, Result};

/// Destination for a rendered image.
pub trait ImageSink {
    /// Encode and store `image` at `path`.
    fn write(&self, image: &RgbaImage, path: &Path) -> Result<()>;
}

/// Writes PNG files.
///
/// The image is fully encoded in memory before the file is created, so an
/// encoding failure never leaves a truncated file behind.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngFileSink;

impl PngFileSink {
    pub fn new() -> Self {
        PngFileSink
    }

    /// Encode `image` as PNG bytes.
    pub fn encode(image: &RgbaImage) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        PngEncoder::new(&mut cursor)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| KumoError::encode(format!("Failed to encode PNG: {}", e)))?;
        Ok(cursor.into_inner())
    }
}

impl ImageSink for PngFileSink {
    fn write(&self, image: &RgbaImage, path: &Path) -> Result<()> {
        let bytes = Self::encode(image)?;
        fs::write(path, &bytes).map_err(|e| {
            KumoError::encode(format!("Failed to write {}: {}", path.display(), e))
        })?;
        info!("wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}
