//! Word cloud layout configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KumoError, Result};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    0xff
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 0xff }
    }
}

impl From<Rgba> for image::Rgba<u8> {
    fn from(c: Rgba) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

/// Default palette: green, blue, red, yellow.
pub const DEFAULT_COLORS: [Rgba; 4] = [
    Rgba::opaque(0x0f, 0x9d, 0x58),
    Rgba::opaque(0x42, 0x85, 0xf4),
    Rgba::opaque(0xdb, 0x44, 0x37),
    Rgba::opaque(0xf4, 0xb4, 0x00),
];

/// Layout settings for one rendering run.
///
/// Built once per run and passed to the renderer; fields missing from a
/// JSON file take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCloudConfig {
    /// Font size in pixels of the most frequent word.
    pub font_max_size: u32,
    /// Font size in pixels of the least frequent word.
    pub font_min_size: u32,
    /// Start each word's spiral at a random point instead of the centre.
    pub random_placement: bool,
    /// Seed for random placement. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// TrueType/OpenType font with Japanese glyphs.
    pub font_file: PathBuf,
    /// Palette cycled through in rank order.
    pub colors: Vec<Rgba>,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Canvas background.
    pub background: Rgba,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            font_max_size: 700,
            font_min_size: 10,
            random_placement: false,
            seed: None,
            font_file: PathBuf::from("font_1_honokamarugo_1.1.ttf"),
            colors: DEFAULT_COLORS.to_vec(),
            width: 2048,
            height: 2048,
            background: Rgba::opaque(0xff, 0xff, 0xff),
        }
    }
}

impl WordCloudConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            KumoError::invalid_config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: WordCloudConfig = serde_json::from_str(&content).map_err(|e| {
            KumoError::invalid_config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can produce an image.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(KumoError::invalid_config(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.colors.is_empty() {
            return Err(KumoError::invalid_config("color palette is empty"));
        }
        if self.font_min_size == 0 || self.font_min_size > self.font_max_size {
            return Err(KumoError::invalid_config(format!(
                "font sizes must satisfy 0 < min <= max, got min={} max={}",
                self.font_min_size, self.font_max_size
            )));
        }
        Ok(())
    }

    /// Color for the word at `index` in rank order.
    ///
    /// An empty palette falls back to [`DEFAULT_COLORS`].
    pub fn color_for(&self, index: usize) -> Rgba {
        let palette = if self.colors.is_empty() {
            &DEFAULT_COLORS[..]
        } else {
            &self.colors[..]
        };
        palette[index % palette.len()]
    }
}
