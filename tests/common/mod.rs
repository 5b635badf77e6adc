//! Shared fixtures for integration tests.

use tilemosaic::PixelBuffer;

/// Opaque single-color buffer.
#[allow(dead_code)]
pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> PixelBuffer {
    PixelBuffer::filled(width, height, [rgb[0], rgb[1], rgb[2], 255])
        .expect("solid fixture should be valid")
}

/// Every pixel encodes its own coordinates: `[x, y, x ^ y, 255]`.
#[allow(dead_code)]
pub fn coordinates(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[x as u8, y as u8, (x ^ y) as u8, 255]);
        }
    }
    PixelBuffer::new(width, height, data).expect("coordinate fixture should be valid")
}

/// Fresh scratch directory under the system temp dir.
#[allow(dead_code)]
pub fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("tilemosaic-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("scratch dir should be creatable");
    dir
}
