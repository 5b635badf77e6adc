//! Image chopping - slices an image into a grid of fixed-size pieces.

use crate::pixel::{Block, PixelBuffer};
use crate::{MosaicError, Result};

/// Grid of blocks laid over an image, walked column by column: every block
/// of a column (top to bottom) comes before the next column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChopLayout {
    pub x_size: u32,
    pub y_size: u32,
    pub columns: u32,
    pub rows: u32,
}

impl ChopLayout {
    /// Layout for a `width × height` image. With `skip_incomplete` only
    /// blocks that fit entirely inside the image are counted.
    pub fn new(
        width: u32,
        height: u32,
        x_size: u32,
        y_size: u32,
        skip_incomplete: bool,
    ) -> Result<Self> {
        if x_size == 0 || y_size == 0 {
            return Err(MosaicError::invalid(format!(
                "block size must be positive, got {x_size}x{y_size}"
            )));
        }
        if width == 0 || height == 0 {
            return Err(MosaicError::invalid(format!(
                "image must have a positive area, got {width}x{height}"
            )));
        }
        let (columns, rows) = if skip_incomplete {
            (width / x_size, height / y_size)
        } else {
            (width.div_ceil(x_size), height.div_ceil(y_size))
        };
        Ok(Self { x_size, y_size, columns, rows })
    }

    pub fn len(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Block at position `index` in chop order.
    pub fn block(&self, index: usize) -> Option<Block> {
        if index >= self.len() {
            return None;
        }
        let rows = self.rows as usize;
        let x = (index / rows) as u32 * self.x_size;
        let y = (index % rows) as u32 * self.y_size;
        Some(Block::new(x, y, self.x_size, self.y_size))
    }

    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        (0..self.len()).filter_map(move |i| self.block(i))
    }
}

/// Cut `image` into `x_size × y_size` pieces in x-major order.
///
/// Every piece is exactly `x_size × y_size`; border pieces that are kept
/// (`skip_incomplete == false`) are padded with transparent black.
pub fn chop(
    image: &PixelBuffer,
    x_size: u32,
    y_size: u32,
    skip_incomplete: bool,
) -> Result<Vec<PixelBuffer>> {
    let layout = ChopLayout::new(image.width(), image.height(), x_size, y_size, skip_incomplete)?;
    log::debug!(
        "chopping {}x{} image into {} pieces of {x_size}x{y_size} ({} columns, {} rows)",
        image.width(),
        image.height(),
        layout.len(),
        layout.columns,
        layout.rows
    );
    layout.blocks().map(|block| image.crop(block)).collect()
}
