//! Integration tests for mosaic compositing.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use tilemosaic::mosaic::composite_with;
use tilemosaic::{
    composite_mosaic, CandidateSet, ImageBackend, ImageCrateBackend, MosaicError, PixelBuffer,
    Result,
};

/// Nearest-neighbor backend that counts its calls and never decodes.
#[derive(Default)]
struct CountingBackend {
    resizes: AtomicUsize,
}

impl ImageBackend for CountingBackend {
    fn decode(&self, _bytes: &[u8]) -> Result<PixelBuffer> {
        Err(MosaicError::Decode("counting backend cannot decode".into()))
    }

    fn resize(&self, image: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer> {
        self.resizes.fetch_add(1, Ordering::SeqCst);
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let sx = x * image.width() / width;
                let sy = y * image.height() / height;
                let px = image.pixel(sx, sy).expect("source pixel should exist");
                data.extend_from_slice(&px);
            }
        }
        PixelBuffer::new(width, height, data)
    }

    fn encode(&self, _image: &PixelBuffer) -> Result<Vec<u8>> {
        Err(MosaicError::Encode("counting backend cannot encode".into()))
    }
}

/// Backend that ignores the requested size.
struct SloppyBackend;

impl ImageBackend for SloppyBackend {
    fn decode(&self, _bytes: &[u8]) -> Result<PixelBuffer> {
        unreachable!("decode is not used by compositing")
    }

    fn resize(&self, image: &PixelBuffer, _width: u32, _height: u32) -> Result<PixelBuffer> {
        Ok(image.clone())
    }

    fn encode(&self, _image: &PixelBuffer) -> Result<Vec<u8>> {
        unreachable!("encode is not used by compositing")
    }
}

#[test]
fn black_target_uses_black_tile_everywhere() {
    let target = common::solid(70, 70, [0, 0, 0]);
    let tiles = [common::solid(35, 35, [255, 0, 0]), common::solid(35, 35, [0, 0, 0])];

    let result = composite_mosaic(&target, &tiles, 35, 35).expect("mosaic should build");

    assert_eq!(result.dimensions(), (70, 70));
    assert_eq!(result, common::solid(70, 70, [0, 0, 0]));
}

#[test]
fn exact_color_match_wins_per_block() {
    // four quadrants: red, green, blue, white
    let colors = [[200, 30, 30], [30, 200, 30], [30, 30, 200], [240, 240, 240]];
    let mut data = Vec::new();
    for y in 0..8u32 {
        for x in 0..8u32 {
            let q = colors[((x / 4) * 2 + y / 4) as usize];
            data.extend_from_slice(&[q[0], q[1], q[2], 255]);
        }
    }
    let target = PixelBuffer::new(8, 8, data).expect("target should be valid");
    let tiles: Vec<_> = colors.iter().rev().map(|&c| common::solid(4, 4, c)).collect();

    let backend = CountingBackend::default();
    let result = composite_with(&backend, &target, &tiles, 4, 4).expect("mosaic should build");

    assert_eq!(result, target);
    assert_eq!(backend.resizes.load(Ordering::SeqCst), tiles.len());
}

#[test]
fn identical_averages_pick_earliest_tile() {
    let target = common::solid(6, 6, [128, 128, 128]);
    let tiles = [
        common::solid(3, 3, [0, 0, 0]),
        common::solid(3, 3, [100, 100, 100]),
        common::solid(3, 3, [100, 100, 100]),
    ];
    let mut marked = tiles.clone();
    // tag the later twin in a way that does not change its average
    let mut raw = marked[2].clone().into_raw();
    raw[3] = 0;
    marked[2] = PixelBuffer::new(3, 3, raw).expect("tile should be valid");

    let result = composite_with(&CountingBackend::default(), &target, &marked, 3, 3)
        .expect("mosaic should build");
    assert!(result.data().chunks_exact(4).all(|px| px == [100, 100, 100, 255]));
}

#[test]
fn empty_tile_sheet_is_invalid_input() {
    let target = common::solid(10, 10, [1, 2, 3]);
    let backend = CountingBackend::default();
    let err = composite_with(&backend, &target, &[], 5, 5).unwrap_err();
    assert!(matches!(err, MosaicError::InvalidInput(_)));
    assert_eq!(backend.resizes.load(Ordering::SeqCst), 0);
}

#[test]
fn zero_block_size_is_invalid_input() {
    let target = common::solid(10, 10, [1, 2, 3]);
    let tiles = [common::solid(2, 2, [0, 0, 0])];
    assert!(matches!(composite_mosaic(&target, &tiles, 0, 5), Err(MosaicError::InvalidInput(_))));
    assert!(matches!(composite_mosaic(&target, &tiles, 5, 0), Err(MosaicError::InvalidInput(_))));
}

#[test]
fn wrongly_sized_resize_is_rejected() {
    let tiles = [common::solid(2, 2, [0, 0, 0])];
    let err = CandidateSet::prepare(&SloppyBackend, &tiles, 3, 3).unwrap_err();
    assert!(matches!(err, MosaicError::InvalidInput(_)));
}

#[test]
fn non_divisible_target_is_fully_covered() {
    let target = common::solid(71, 36, [10, 10, 10]);
    let tiles = [common::solid(35, 35, [0, 0, 0]), common::solid(35, 35, [255, 255, 255])];
    let result = composite_mosaic(&target, &tiles, 35, 35).expect("mosaic should build");
    assert_eq!(result.dimensions(), (71, 36));
    assert_eq!(result.pixel(70, 35), Some([0, 0, 0, 255]));
    assert!(result.data().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn compositing_is_deterministic() {
    let target = common::coordinates(40, 33);
    let tiles: Vec<_> = (0..6u8)
        .map(|i| common::solid(5 + i as u32, 3, [i * 40, 255 - i * 40, i * 7]))
        .collect();
    let backend = ImageCrateBackend::default();
    let first = composite_with(&backend, &target, &tiles, 6, 5).expect("mosaic should build");
    let second = composite_with(&backend, &target, &tiles, 6, 5).expect("mosaic should build");
    assert_eq!(first, second);
}
