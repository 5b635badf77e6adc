//! Boundary services the mosaic core relies on: decoding, resizing and
//! encoding images.

use crate::pixel::PixelBuffer;
use crate::{MosaicError, Result};
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageBuffer, ImageEncoder, Rgba};

/// Image I/O capability injected into the workflows.
///
/// `Sync` so candidate resizing can fan out across threads.
pub trait ImageBackend: Sync {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer>;

    /// Scale `image` to exactly `width × height`.
    fn resize(&self, image: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer>;

    fn encode(&self, image: &PixelBuffer) -> Result<Vec<u8>>;
}

/// Backend on top of the `image` crate. Decodes any enabled format and
/// encodes PNG.
#[derive(Clone, Copy, Debug)]
pub struct ImageCrateBackend {
    filter: FilterType,
}

impl Default for ImageCrateBackend {
    fn default() -> Self {
        Self { filter: FilterType::Triangle }
    }
}

impl ImageCrateBackend {
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }
}

impl ImageBackend for ImageCrateBackend {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        let image = image::load_from_memory(bytes).map_err(|e| MosaicError::Decode(e.to_string()))?;
        PixelBuffer::try_from(image.to_rgba8())
    }

    fn resize(&self, image: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer> {
        if width == 0 || height == 0 {
            return Err(MosaicError::invalid(format!(
                "cannot resize to {width}x{height}"
            )));
        }
        let (w, h) = image.dimensions();
        let view = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(w, h, image.data())
            .ok_or_else(|| MosaicError::invalid("pixel data does not match image dimensions"))?;
        PixelBuffer::try_from(imageops::resize(&view, width, height, self.filter))
    }

    fn encode(&self, image: &PixelBuffer) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(image.data(), image.width(), image.height(), ExtendedColorType::Rgba8)
            .map_err(|e| MosaicError::Encode(e.to_string()))?;
        Ok(bytes)
    }
}
