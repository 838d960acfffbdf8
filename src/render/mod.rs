//! Word cloud rendering and image output.

use image::RgbaImage;

use crate::error::Result;
use crate::frequency::RankedList;

pub mod config;
pub mod sink;
pub mod spiral;

pub use config::{Rgba, WordCloudConfig};
pub use sink::{ImageSink, PngFileSink};
pub use spiral::SpiralRenderer;

/// Turns ranked words into a raster image.
pub trait Renderer {
    /// Lay out and draw `words` according to `config`.
    fn render(&self, words: &RankedList, config: &WordCloudConfig) -> Result<RgbaImage>;

    /// Get the name of this renderer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
