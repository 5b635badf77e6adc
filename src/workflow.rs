//! The chop and build-mosaic workflows: bytes and files in, PNG out.

use crate::backend::ImageBackend;
use crate::config::{BlockSize, WorkflowConfig};
use crate::pixel::PixelBuffer;
use crate::{chop, mosaic, MosaicError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the chop piece at `index`, numbered from 1.
pub fn numbered_file_name(index: usize) -> String {
    format!("{}.png", index + 1)
}

/// Decode `bytes`, chop it and encode every piece, in chop order.
pub fn chop_bytes<B: ImageBackend + ?Sized>(
    backend: &B,
    bytes: &[u8],
    config: &WorkflowConfig,
) -> Result<Vec<Vec<u8>>> {
    let block = config.block_size()?;
    let image = backend.decode(bytes)?;
    chop::chop(&image, block.x, block.y, config.skip_incomplete)?
        .iter()
        .map(|piece| backend.encode(piece))
        .collect()
}

/// Decode the target and tiles, build the mosaic and encode it.
pub fn mosaic_bytes<B: ImageBackend + ?Sized, T: AsRef<[u8]>>(
    backend: &B,
    target: &[u8],
    tiles: &[T],
    block: BlockSize,
) -> Result<Vec<u8>> {
    if tiles.is_empty() {
        return Err(MosaicError::invalid("no tile images given"));
    }
    let target = backend.decode(target)?;
    let tiles = tiles
        .iter()
        .map(|bytes| backend.decode(bytes.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    let result = mosaic::composite_with(backend, &target, &tiles, block.x, block.y)?;
    backend.encode(&result)
}

/// Chop the image at `input` into `out_dir/1.png`, `out_dir/2.png`, ...
///
/// Nothing is written unless every piece encoded.
pub fn chop_to_dir<B: ImageBackend + ?Sized>(
    backend: &B,
    input: &Path,
    out_dir: &Path,
    config: &WorkflowConfig,
) -> Result<Vec<PathBuf>> {
    let pieces = chop_bytes(backend, &fs::read(input)?, config)?;
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(pieces.len());
    for (i, bytes) in pieces.iter().enumerate() {
        let path = out_dir.join(numbered_file_name(i));
        fs::write(&path, bytes)?;
        written.push(path);
    }
    log::info!("wrote {} pieces to {}", written.len(), out_dir.display());
    Ok(written)
}

/// Decode every readable image in `dir`, ordered by file name. Files that
/// fail to decode are skipped.
pub fn load_tile_dir<B: ImageBackend + ?Sized>(
    backend: &B,
    dir: &Path,
) -> Result<Vec<PixelBuffer>> {
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.retain(|p| p.is_file());
    paths.sort();

    let mut tiles = Vec::with_capacity(paths.len());
    for path in paths {
        match backend.decode(&fs::read(&path)?) {
            Ok(tile) => tiles.push(tile),
            Err(e) => log::warn!("skipping {}: {e}", path.display()),
        }
    }
    Ok(tiles)
}

/// Decode each of `paths` as a tile; any failure aborts.
pub fn load_tiles<B: ImageBackend + ?Sized>(
    backend: &B,
    paths: &[PathBuf],
) -> Result<Vec<PixelBuffer>> {
    paths
        .iter()
        .map(|path| backend.decode(&fs::read(path)?))
        .collect()
}

/// Build a mosaic of the image at `target` from `tiles` and write it as PNG
/// to `output`.
pub fn mosaic_to_file<B: ImageBackend + ?Sized>(
    backend: &B,
    target: &Path,
    tiles: &[PixelBuffer],
    output: &Path,
    block: BlockSize,
) -> Result<()> {
    if tiles.is_empty() {
        return Err(MosaicError::invalid("no tile images given"));
    }
    let target = backend.decode(&fs::read(target)?)?;
    let result = mosaic::composite_with(backend, &target, tiles, block.x, block.y)?;
    fs::write(output, backend.encode(&result)?)?;
    log::info!("wrote {}x{} mosaic to {}", result.width(), result.height(), output.display());
    Ok(())
}
