//! Photomosaic builder: rebuilds a target image from a sheet of tile images,
//! picking for every block the tile with the nearest average color.

pub mod backend;
pub mod chop;
pub mod color;
pub mod config;
pub mod mosaic;
pub mod pixel;
pub mod workflow;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use backend::{ImageBackend, ImageCrateBackend};
pub use chop::{chop, ChopLayout};
pub use color::{average_color, color_distance, ColorSample};
pub use config::{BlockSize, WorkflowConfig};
pub use mosaic::{composite, Candidate, CandidateSet};
pub use pixel::{Block, PixelBuffer};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MosaicError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MosaicError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        MosaicError::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, MosaicError>;

/// Slices `image` into `x_size × y_size` pieces in x-major order.
///
/// Pieces that run past the right or bottom edge are dropped when
/// `skip_incomplete` is set, otherwise they are emitted with the missing
/// area left transparent black.
pub fn chop_image(
    image: &PixelBuffer,
    x_size: u32,
    y_size: u32,
    skip_incomplete: bool,
) -> Result<Vec<PixelBuffer>> {
    chop::chop(image, x_size, y_size, skip_incomplete)
}

/// Rebuilds `target` from `tiles`, each resized to `x_size × y_size` with the
/// default backend.
pub fn composite_mosaic(
    target: &PixelBuffer,
    tiles: &[PixelBuffer],
    x_size: u32,
    y_size: u32,
) -> Result<PixelBuffer> {
    let candidates = CandidateSet::prepare(&ImageCrateBackend::default(), tiles, x_size, y_size)?;
    mosaic::composite(target, &candidates)
}
