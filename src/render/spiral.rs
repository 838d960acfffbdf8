//! Word-cloud layout and rasterization.
//!
//! Words are placed in rank order. Each word goes to the free position
//! closest to its start point (the canvas centre, or a random point when
//! `random_placement` is set), which is where a spiral walked outward from
//! that point first finds room. Free space is tracked on a coarse occupancy
//! grid backed by a summed-area table, so each candidate position is checked
//! in constant time. A word that fits nowhere at its size is shrunk toward
//! `font_min_size` and skipped if even that does not fit.

use std::fs;
use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use image::{Pixel, RgbaImage};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{KumoError, Result};
use crate::frequency::RankedList;
use crate::render::Renderer;
use crate::render::config::{Rgba, WordCloudConfig};

/// Side of one occupancy cell, in pixels.
const CELL: usize = 8;
/// Factor applied to a word's size when it fits nowhere.
const SHRINK_FACTOR: f32 = 0.8;
/// Upper bound on the shrink steps considered for one word.
const MAX_SHRINK_STEPS: usize = 24;

/// Measures the pixel extent of a word set at a given size.
pub trait TextMeasure {
    /// Width and height in pixels of `text` at `size` px.
    fn measure(&self, text: &str, size: f32) -> (u32, u32);
}

/// A word with its final position on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub size: f32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub color: Rgba,
}

/// Cell-aligned occupancy of the canvas.
///
/// `sums` is the summed-area table of `cells` with one row and column of
/// padding, so the number of used cells in any box is four lookups.
/// Cells are only ever filled, so a box size that found no room once never
/// will; those sizes are kept in `full` and rejected without a scan.
struct OccupancyGrid {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
    sums: Vec<u32>,
    full: Vec<(usize, usize)>,
}

impl OccupancyGrid {
    fn new(width: u32, height: u32) -> Self {
        let cols = width as usize / CELL;
        let rows = height as usize / CELL;
        OccupancyGrid {
            cols,
            rows,
            cells: vec![false; cols * rows],
            sums: vec![0; (cols + 1) * (rows + 1)],
            full: Vec::new(),
        }
    }

    fn cells_for(px: u32) -> usize {
        (px as usize).div_ceil(CELL)
    }

    fn sum(&self, col: usize, row: usize) -> u32 {
        self.sums[row * (self.cols + 1) + col]
    }

    /// Number of used cells in the `w` x `h` box at (`col`, `row`).
    fn used(&self, col: usize, row: usize, w: usize, h: usize) -> u32 {
        (self.sum(col + w, row + h) + self.sum(col, row))
            - self.sum(col + w, row)
            - self.sum(col, row + h)
    }

    fn mark(&mut self, col: usize, row: usize, w: usize, h: usize) {
        for r in row..row + h {
            for c in col..col + w {
                self.cells[r * self.cols + c] = true;
            }
        }
        // rows above `row` keep their prefix sums
        let stride = self.cols + 1;
        for r in row..self.rows {
            let mut row_sum = 0;
            for c in 0..self.cols {
                row_sum += self.cells[r * self.cols + c] as u32;
                self.sums[(r + 1) * stride + c + 1] = self.sums[r * stride + c + 1] + row_sum;
            }
        }
    }

    /// Free `w` x `h` box whose centre is closest to `origin` (pixels).
    /// Ties go to the first box in row-major order.
    fn nearest_free(&mut self, w: usize, h: usize, origin: (f64, f64)) -> Option<(usize, usize)> {
        if w == 0 || h == 0 || w > self.cols || h > self.rows {
            return None;
        }
        if self.full.iter().any(|&(fw, fh)| w >= fw && h >= fh) {
            return None;
        }
        let cell = CELL as f64;
        let (half_w, half_h) = (w as f64 * cell / 2.0, h as f64 * cell / 2.0);

        let mut best: Option<(f64, usize, usize)> = None;
        for row in 0..=self.rows - h {
            let dy = row as f64 * cell + half_h - origin.1;
            let dy2 = dy * dy;
            if best.is_some_and(|(d, _, _)| dy2 >= d) {
                continue;
            }
            for col in 0..=self.cols - w {
                let dx = col as f64 * cell + half_w - origin.0;
                let distance = dx * dx + dy2;
                if best.is_some_and(|(d, _, _)| distance >= d) {
                    continue;
                }
                if self.used(col, row, w, h) == 0 {
                    best = Some((distance, col, row));
                }
            }
        }
        if best.is_none() {
            self.full.push((w, h));
        }
        best.map(|(_, col, row)| (col, row))
    }
}

/// A free box found for a word at a given size.
struct Spot {
    size: f32,
    col: usize,
    row: usize,
    cols: usize,
    rows: usize,
    width: u32,
    height: u32,
}

fn try_size<M: TextMeasure + ?Sized>(
    grid: &mut OccupancyGrid,
    word: &str,
    size: f32,
    origin: (f64, f64),
    measure: &M,
) -> Option<Spot> {
    let (width, height) = measure.measure(word, size);
    let (cols, rows) = (
        OccupancyGrid::cells_for(width),
        OccupancyGrid::cells_for(height),
    );
    grid.nearest_free(cols, rows, origin).map(|(col, row)| Spot {
        size,
        col,
        row,
        cols,
        rows,
        width,
        height,
    })
}

/// Largest size on the shrink ladder at which `word` fits.
///
/// A smaller box fits wherever a larger one does, so the ladder is bisected
/// instead of walked.
fn fit<M: TextMeasure + ?Sized>(
    grid: &mut OccupancyGrid,
    word: &str,
    size: f32,
    min_size: f32,
    origin: (f64, f64),
    measure: &M,
) -> Option<Spot> {
    if let Some(spot) = try_size(grid, word, size, origin, measure) {
        return Some(spot);
    }

    let mut ladder = Vec::new();
    let mut next = size;
    while next > min_size && ladder.len() < MAX_SHRINK_STEPS {
        next = (next * SHRINK_FACTOR).max(min_size);
        ladder.push(next);
    }
    if ladder.last().is_some_and(|&last| last > min_size) {
        ladder.push(min_size);
    }

    let mut hi = ladder.len().checked_sub(1)?;
    let mut best = try_size(grid, word, ladder[hi], origin, measure)?;
    let mut lo = 0;
    while lo < hi {
        let mid = (lo + hi) / 2;
        match try_size(grid, word, ladder[mid], origin, measure) {
            Some(spot) => {
                best = spot;
                hi = mid;
            }
            None => lo = mid + 1,
        }
    }
    Some(best)
}

/// Font size for `count`, linear between the configured minimum and maximum.
pub fn font_size(count: usize, min_count: usize, max_count: usize, config: &WordCloudConfig) -> f32 {
    let (min_size, max_size) = (config.font_min_size as f32, config.font_max_size as f32);
    if max_count <= min_count {
        return max_size;
    }
    let ratio = (count.saturating_sub(min_count)) as f32 / (max_count - min_count) as f32;
    min_size + (max_size - min_size) * ratio.clamp(0.0, 1.0)
}

/// Compute positions for `words` on the configured canvas.
///
/// Fails with [`KumoError::Config`] when `config` does not validate.
pub fn layout<M: TextMeasure + ?Sized>(
    words: &RankedList,
    config: &WordCloudConfig,
    measure: &M,
) -> Result<Vec<PlacedWord>> {
    config.validate()?;
    let (Some(max_count), Some(min_count)) = (words.max_count(), words.min_count()) else {
        return Ok(Vec::new());
    };
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random::<u64>));

    let mut grid = OccupancyGrid::new(config.width, config.height);
    let mut placed = Vec::with_capacity(words.len());

    for (index, entry) in words.iter().enumerate() {
        let size = font_size(entry.count, min_count, max_count, config);
        let origin = if config.random_placement {
            (
                rng.random_range(0..config.width) as f64,
                rng.random_range(0..config.height) as f64,
            )
        } else {
            (config.width as f64 / 2.0, config.height as f64 / 2.0)
        };

        let min_size = config.font_min_size as f32;
        match fit(&mut grid, &entry.word, size, min_size, origin, measure) {
            Some(spot) => {
                grid.mark(spot.col, spot.row, spot.cols, spot.rows);
                placed.push(PlacedWord {
                    word: entry.word.clone(),
                    count: entry.count,
                    size: spot.size,
                    x: (spot.col * CELL) as u32,
                    y: (spot.row * CELL) as u32,
                    width: spot.width,
                    height: spot.height,
                    color: config.color_for(index),
                });
            }
            None => debug!("no room for '{}' ({})", entry.word, entry.count),
        }
    }

    Ok(placed)
}

/// [`TextMeasure`] backed by an outline font.
pub struct FontMeasure {
    font: FontVec,
}

impl FontMeasure {
    /// Load a TrueType/OpenType font file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|e| {
            KumoError::render(format!("Failed to read font {}: {}", path.display(), e))
        })?;
        Self::from_bytes(data).map_err(|e| {
            KumoError::render(format!("Failed to load font {}: {}", path.display(), e))
        })
    }

    /// Parse a font from memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(data)
            .map_err(|e| KumoError::render(format!("Invalid font: {}", e)))?;
        Ok(Self { font })
    }

    fn draw(&self, image: &mut RgbaImage, placed: &PlacedWord) {
        let scale = PxScale::from(placed.size);
        let scaled = self.font.as_scaled(scale);
        let color: image::Rgba<u8> = placed.color.into();
        let alpha = placed.color.a as f32 / 255.0;

        let mut caret = placed.x as f32;
        let baseline = placed.y as f32 + scaled.ascent();
        let mut previous = None;
        for c in placed.word.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + gx as i64;
                let y = bounds.min.y as i64 + gy as i64;
                if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
                    return;
                }
                let pixel = image.get_pixel_mut(x as u32, y as u32);
                let a = coverage.clamp(0.0, 1.0) * alpha;
                pixel.apply2(&color, |dst, src| {
                    (dst as f32 * (1.0 - a) + src as f32 * a).round() as u8
                });
            });
        }
    }
}

impl TextMeasure for FontMeasure {
    fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        let scaled = self.font.as_scaled(PxScale::from(size));
        let mut width = 0.0_f32;
        let mut previous = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        let height = scaled.ascent() - scaled.descent();
        (width.ceil().max(0.0) as u32, height.ceil().max(0.0) as u32)
    }
}

/// Renderer laying words out on a spiral and drawing them with an outline font.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpiralRenderer;

impl SpiralRenderer {
    pub fn new() -> Self {
        SpiralRenderer
    }
}

impl Renderer for SpiralRenderer {
    fn render(&self, words: &RankedList, config: &WordCloudConfig) -> Result<RgbaImage> {
        config.validate()?;
        let font = FontMeasure::load(&config.font_file)?;

        let placed = layout(words, config, &font)?;
        info!("placed {} of {} words", placed.len(), words.len());
        if placed.len() < words.len() {
            warn!(
                "{} words did not fit on the {}x{} canvas",
                words.len() - placed.len(),
                config.width,
                config.height
            );
        }

        let mut image = RgbaImage::from_pixel(config.width, config.height, config.background.into());
        for word in &placed {
            font.draw(&mut image, word);
        }
        Ok(image)
    }

    fn name(&self) -> &'static str {
        "spiral"
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::frequency::{FrequencyMap, select_top_k};

    /// Every character is a `size` x `size` square.
    struct SquareMeasure;

    impl TextMeasure for SquareMeasure {
        fn measure(&self, text: &str, size: f32) -> (u32, u32) {
            let side = size.round() as u32;
            (side * text.chars().count() as u32, side)
        }
    }

    fn config() -> WordCloudConfig {
        WordCloudConfig {
            font_max_size: 40,
            font_min_size: 8,
            width: 400,
            height: 300,
            seed: Some(7),
            ..Default::default()
        }
    }

    fn ranked(pairs: &[(&str, usize)]) -> RankedList {
        let counts: FrequencyMap = pairs.iter().copied().collect();
        select_top_k(&counts, pairs.len().max(1)).unwrap()
    }

    fn overlaps(a: &PlacedWord, b: &PlacedWord) -> bool {
        a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
    }

    #[test]
    fn test_font_size_scaling() {
        let config = config();

        assert_eq!(font_size(10, 1, 10, &config), 40.0);
        assert_eq!(font_size(1, 1, 10, &config), 8.0);
        assert_eq!(font_size(3, 3, 3, &config), 40.0);
        let mid = font_size(5, 1, 9, &config);
        assert!((mid - 24.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_first_word_is_centred() {
        let words = ranked(&[("東京", 5)]);

        let placed = layout(&words, &config(), &SquareMeasure).unwrap();

        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].size, 40.0);
        assert_eq!((placed[0].width, placed[0].height), (80, 40));
        // centre (200, 150) snapped to the 8px grid
        assert_eq!((placed[0].x, placed[0].y), (160, 128));
        assert_eq!(placed[0].color, config().colors[0]);
    }

    #[test]
    fn test_words_do_not_overlap_and_stay_on_canvas() {
        let words = ranked(&[
            ("猫", 9),
            ("東京", 7),
            ("犬", 7),
            ("大阪", 4),
            ("京都", 3),
            ("桜", 2),
            ("富士山", 1),
        ]);
        let config = config();

        let placed = layout(&words, &config, &SquareMeasure).unwrap();

        assert_eq!(placed.len(), 7);
        for (i, a) in placed.iter().enumerate() {
            assert!(a.x + a.width <= config.width);
            assert!(a.y + a.height <= config.height);
            for b in &placed[i + 1..] {
                assert!(!overlaps(a, b), "{} overlaps {}", a.word, b.word);
            }
        }
    }

    #[test]
    fn test_oversized_word_shrinks() {
        let words = ranked(&[("とても長い単語です", 1)]);
        let config = WordCloudConfig {
            font_max_size: 100,
            ..config()
        };

        let placed = layout(&words, &config, &SquareMeasure).unwrap();

        assert_eq!(placed.len(), 1);
        assert!(placed[0].size < 100.0);
        assert!(placed[0].width <= config.width);
    }

    #[test]
    fn test_word_that_never_fits_is_skipped() {
        let words = ranked(&[("あいうえおかきくけこさしすせそ", 1)]);
        let config = WordCloudConfig {
            width: 50,
            height: 50,
            ..config()
        };

        assert!(layout(&words, &config, &SquareMeasure).unwrap().is_empty());
    }

    #[test]
    fn test_random_placement_is_reproducible_with_seed() {
        let words = ranked(&[("猫", 3), ("犬", 2), ("鳥", 1)]);
        let config = WordCloudConfig {
            random_placement: true,
            ..config()
        };

        let first = layout(&words, &config, &SquareMeasure).unwrap();
        let second = layout(&words, &config, &SquareMeasure).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_list() {
        assert!(
            layout(&RankedList::default(), &config(), &SquareMeasure)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_occupancy_grid_counts_and_nearest_free() {
        let mut grid = OccupancyGrid::new(80, 40);
        assert_eq!((grid.cols, grid.rows), (10, 5));

        grid.mark(4, 1, 2, 3);

        assert_eq!(grid.used(0, 0, 10, 5), 6);
        assert_eq!(grid.used(5, 2, 1, 1), 1);
        assert_eq!(grid.used(0, 0, 4, 5), 0);
        // the centre is taken, so the closest free 2x3 box sits beside it
        assert_eq!(grid.nearest_free(2, 3, (40.0, 20.0)), Some((2, 1)));
        assert_eq!(grid.nearest_free(6, 2, (40.0, 20.0)), None);
        // a larger box is rejected from the cached failure
        assert_eq!(grid.nearest_free(7, 2, (40.0, 20.0)), None);
        assert_eq!(grid.full, vec![(6, 2)]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let words = ranked(&[("猫", 1)]);
        let empty_canvas = WordCloudConfig {
            width: 0,
            random_placement: true,
            ..config()
        };
        let no_colors = WordCloudConfig {
            colors: Vec::new(),
            ..config()
        };

        assert!(matches!(
            layout(&words, &empty_canvas, &SquareMeasure),
            Err(KumoError::Config(_))
        ));
        assert!(matches!(
            layout(&words, &no_colors, &SquareMeasure),
            Err(KumoError::Config(_))
        ));
    }

    #[test]
    fn test_default_canvas_with_300_words() {
        let pairs: Vec<(String, usize)> = (0..300).map(|i| (format!("単語{i}"), 300 - i)).collect();
        let counts: FrequencyMap = pairs.iter().map(|(w, c)| (w.as_str(), *c)).collect();
        let words = select_top_k(&counts, 300).unwrap();
        let config = WordCloudConfig {
            seed: Some(42),
            ..Default::default()
        };

        let started = Instant::now();
        let placed = layout(&words, &config, &SquareMeasure).unwrap();
        let elapsed = started.elapsed();

        assert!(elapsed < Duration::from_secs(30), "layout took {elapsed:?}");
        assert!(!placed.is_empty());
        assert_eq!(placed[0].word, "単語0");
        for (i, a) in placed.iter().enumerate() {
            assert!(a.x + a.width <= config.width);
            assert!(a.y + a.height <= config.height);
            assert!(a.size >= config.font_min_size as f32);
            for b in &placed[i + 1..] {
                assert!(!overlaps(a, b), "{} overlaps {}", a.word, b.word);
            }
        }
    }

    #[test]
    fn test_missing_font_is_render_error() {
        let config = WordCloudConfig {
            font_file: "/nonexistent/kumo/font.ttf".into(),
            ..config()
        };

        let result = SpiralRenderer::new().render(&ranked(&[("猫", 1)]), &config);

        assert!(matches!(result, Err(KumoError::Render(_))));
    }

    #[test]
    fn test_invalid_font_bytes() {
        let result = FontMeasure::from_bytes(b"not a font".to_vec());

        assert!(matches!(result, Err(KumoError::Render(_))));
    }
}
