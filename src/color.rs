//! Average colors and Euclidean RGB distance.

use crate::pixel::{Block, PixelBuffer};
use crate::{MosaicError, Result};

/// Mean red, green and blue of a region. Alpha is not sampled.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorSample {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ColorSample {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn distance(&self, other: &ColorSample) -> f64 {
        color_distance(self, other)
    }
}

impl From<[u8; 3]> for ColorSample {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r as f64, g as f64, b as f64)
    }
}

/// Average color of the pixels of `region` that lie inside `buffer`.
///
/// Anything past the right or bottom edge is clipped away; a region with no
/// pixel inside the buffer is rejected.
pub fn average_color(buffer: &PixelBuffer, region: Block) -> Result<ColorSample> {
    let (x_end, y_end) = region.clip(buffer.width(), buffer.height()).ok_or_else(|| {
        MosaicError::invalid(format!(
            "region {region:?} lies outside the {}x{} image",
            buffer.width(),
            buffer.height()
        ))
    })?;

    let width = buffer.width() as usize;
    let data = buffer.data();
    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for y in region.y..y_end {
        let start = (y as usize * width + region.x as usize) * 4;
        let end = (y as usize * width + x_end as usize) * 4;
        for px in data[start..end].chunks_exact(4) {
            r += px[0] as u64;
            g += px[1] as u64;
            b += px[2] as u64;
        }
    }

    let count = (x_end - region.x) as f64 * (y_end - region.y) as f64;
    Ok(ColorSample::new(r as f64 / count, g as f64 / count, b as f64 / count))
}

pub fn color_distance(a: &ColorSample, b: &ColorSample) -> f64 {
    ((b.r - a.r).powi(2) + (b.g - a.g).powi(2) + (b.b - a.b).powi(2)).sqrt()
}

/// Index of the sample closest to `target`. On equal distance the earliest
/// sample wins. `None` only for an empty iterator.
pub fn nearest<'a>(
    target: &ColorSample,
    samples: impl IntoIterator<Item = &'a ColorSample>,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, sample) in samples.into_iter().enumerate() {
        let dist = color_distance(target, sample);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}
