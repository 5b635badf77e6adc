//! RGBA pixel buffers and the rectangular blocks laid over them.

use crate::{MosaicError, Result};
use image::RgbaImage;

const CHANNELS: usize = 4;

/// Byte length of a `width × height` RGBA image, or an error if it does not
/// fit in memory addressing.
fn byte_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| MosaicError::invalid(format!("{width}x{height} image is too large")))
}

/// Row-major RGBA image with a guaranteed non-empty area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MosaicError::invalid(format!(
                "image must have a positive area, got {width}x{height}"
            )));
        }
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(MosaicError::invalid(format!(
                "{width}x{height} image needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// Fully transparent black buffer.
    pub fn transparent(width: u32, height: u32) -> Result<Self> {
        let len = byte_len(width, height)?;
        Self::new(width, height, vec![0; len])
    }

    /// Buffer filled with a single color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let len = byte_len(width, height)? / CHANNELS;
        Self::new(width, height, rgba.repeat(len))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Block covering the whole buffer.
    pub fn bounds(&self) -> Block {
        Block::new(0, 0, self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Copy `block` into a new `block.width × block.height` buffer. Parts of
    /// the block outside this buffer stay transparent black.
    pub fn crop(&self, block: Block) -> Result<PixelBuffer> {
        let mut out = PixelBuffer::transparent(block.width, block.height)?;
        if let Some((x_end, y_end)) = block.clip(self.width, self.height) {
            let row_len = (x_end - block.x) as usize * CHANNELS;
            for y in block.y..y_end {
                let src = self.offset(block.x, y);
                let dst = out.offset(0, y - block.y);
                out.data[dst..dst + row_len].copy_from_slice(&self.data[src..src + row_len]);
            }
        }
        Ok(out)
    }

    /// Paint `src` with its top-left corner at `(x, y)`, discarding whatever
    /// falls outside this buffer.
    pub(crate) fn blit(&mut self, src: &PixelBuffer, x: u32, y: u32) {
        let target = Block::new(x, y, src.width, src.height);
        let Some((x_end, y_end)) = target.clip(self.width, self.height) else {
            return;
        };
        let row_len = (x_end - x) as usize * CHANNELS;
        for row in y..y_end {
            let from = src.offset(0, row - y);
            let to = self.offset(x, row);
            self.data[to..to + row_len].copy_from_slice(&src.data[from..from + row_len]);
        }
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = MosaicError;

    fn try_from(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        PixelBuffer::new(width, height, image.into_raw())
    }
}

impl From<PixelBuffer> for RgbaImage {
    fn from(buffer: PixelBuffer) -> Self {
        let (width, height) = buffer.dimensions();
        // Length is validated on construction.
        RgbaImage::from_raw(width, height, buffer.data)
            .unwrap_or_else(|| RgbaImage::new(width, height))
    }
}

/// Rectangular region of a buffer. May extend past the buffer's right or
/// bottom edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Block {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// True when the whole block lies inside a `width × height` buffer.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }

    /// Exclusive end corner of the block clipped to a `width × height`
    /// buffer, or `None` if nothing of the block is inside it.
    pub fn clip(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        let x_end = self.x.saturating_add(self.width).min(width);
        let y_end = self.y.saturating_add(self.height).min(height);
        (x_end > self.x && y_end > self.y).then_some((x_end, y_end))
    }
}
