//! Mosaic compositing - rebuilds a target image block by block from the tile
//! whose average color is nearest to the block's.

use crate::backend::ImageBackend;
use crate::chop::ChopLayout;
use crate::color::{self, average_color, ColorSample};
use crate::pixel::PixelBuffer;
use crate::{MosaicError, Result};

/// A tile resized to the block size, with its average color.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub image: PixelBuffer,
    pub color: ColorSample,
}

impl Candidate {
    pub fn new(image: PixelBuffer) -> Result<Self> {
        let color = average_color(&image, image.bounds())?;
        Ok(Self { image, color })
    }
}

/// Non-empty, ordered set of candidates that all share one block size.
#[derive(Clone, Debug)]
pub struct CandidateSet {
    x_size: u32,
    y_size: u32,
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    /// Resize every tile to `x_size × y_size` once and sample its color.
    /// Candidate order follows `tiles`.
    pub fn prepare<B: ImageBackend + ?Sized>(
        backend: &B,
        tiles: &[PixelBuffer],
        x_size: u32,
        y_size: u32,
    ) -> Result<Self> {
        if tiles.is_empty() {
            return Err(MosaicError::invalid("at least one tile image is required"));
        }
        if x_size == 0 || y_size == 0 {
            return Err(MosaicError::invalid(format!(
                "block size must be positive, got {x_size}x{y_size}"
            )));
        }

        let resized = resize_all(backend, tiles, x_size, y_size)?;
        let candidates = resized
            .into_iter()
            .map(|image| {
                if image.dimensions() != (x_size, y_size) {
                    return Err(MosaicError::invalid(format!(
                        "backend resized a tile to {}x{} instead of {x_size}x{y_size}",
                        image.width(),
                        image.height()
                    )));
                }
                Candidate::new(image)
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("prepared {} candidates at {x_size}x{y_size}", candidates.len());
        Ok(Self { x_size, y_size, candidates })
    }

    pub fn block_size(&self) -> (u32, u32) {
        (self.x_size, self.y_size)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    /// Candidate nearest to `sample`, the earliest one on ties.
    pub fn nearest(&self, sample: &ColorSample) -> (usize, &Candidate) {
        let index = color::nearest(sample, self.candidates.iter().map(|c| &c.color)).unwrap_or(0);
        (index, &self.candidates[index])
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn resize_all<B: ImageBackend + ?Sized>(
    backend: &B,
    tiles: &[PixelBuffer],
    x_size: u32,
    y_size: u32,
) -> Result<Vec<PixelBuffer>> {
    use rayon::prelude::*;
    tiles.par_iter().map(|tile| backend.resize(tile, x_size, y_size)).collect()
}

#[cfg(target_arch = "wasm32")]
fn resize_all<B: ImageBackend + ?Sized>(
    backend: &B,
    tiles: &[PixelBuffer],
    x_size: u32,
    y_size: u32,
) -> Result<Vec<PixelBuffer>> {
    tiles.iter().map(|tile| backend.resize(tile, x_size, y_size)).collect()
}

/// Rebuild `target` from `candidates`.
///
/// Blocks are visited column by column like [`crate::chop`]. Each block is
/// replaced by the full pixels of its nearest candidate; tiles hanging over
/// the right or bottom edge are clipped.
pub fn composite(target: &PixelBuffer, candidates: &CandidateSet) -> Result<PixelBuffer> {
    if candidates.is_empty() {
        return Err(MosaicError::invalid("at least one tile image is required"));
    }
    let (x_size, y_size) = candidates.block_size();
    let layout = ChopLayout::new(target.width(), target.height(), x_size, y_size, false)?;
    let mut canvas = PixelBuffer::transparent(target.width(), target.height())?;

    for block in layout.blocks() {
        let sample = average_color(target, block)?;
        let (index, best) = candidates.nearest(&sample);
        log::trace!("block ({}, {}) -> candidate {index}", block.x, block.y);
        canvas.blit(&best.image, block.x, block.y);
    }

    log::debug!(
        "composited {}x{} image from {} blocks and {} candidates",
        target.width(),
        target.height(),
        layout.len(),
        candidates.len()
    );
    Ok(canvas)
}

/// Resize `tiles` with `backend` and rebuild `target` from them.
pub fn composite_with<B: ImageBackend + ?Sized>(
    backend: &B,
    target: &PixelBuffer,
    tiles: &[PixelBuffer],
    x_size: u32,
    y_size: u32,
) -> Result<PixelBuffer> {
    let candidates = CandidateSet::prepare(backend, tiles, x_size, y_size)?;
    composite(target, &candidates)
}
