//! WebAssembly bindings for tilemosaic

use wasm_bindgen::prelude::*;
use crate::backend::ImageCrateBackend;
use crate::config::BlockSize;
use crate::pixel::PixelBuffer;
use crate::{chop, mosaic, MosaicError};

fn to_js(err: MosaicError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WasmMosaic {
    block: BlockSize,
    skip_incomplete: bool,
    tiles: Vec<PixelBuffer>,
}

#[wasm_bindgen]
impl WasmMosaic {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmMosaic {
        WasmMosaic {
            block: BlockSize::default(),
            skip_incomplete: true,
            tiles: Vec::new(),
        }
    }

    /// Set the block size; each side must be in 1..=256
    #[wasm_bindgen]
    pub fn set_block_size(&mut self, x_size: u32, y_size: u32) -> Result<(), JsValue> {
        self.block = BlockSize::new(x_size, y_size).map_err(to_js)?;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_skip_incomplete(&mut self, enabled: bool) {
        self.skip_incomplete = enabled;
    }

    /// Add a tile to the sheet from raw RGBA (e.g. `ImageData.data`)
    #[wasm_bindgen]
    pub fn add_tile(&mut self, image_data: &[u8], width: u32, height: u32) -> Result<(), JsValue> {
        let tile = PixelBuffer::new(width, height, image_data.to_vec()).map_err(to_js)?;
        self.tiles.push(tile);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn clear_tiles(&mut self) {
        self.tiles.clear();
    }

    #[wasm_bindgen]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Chop raw RGBA into pieces of the current block size.
    /// Returns an array of `Uint8Array`, each `x_size * y_size * 4` bytes, in x-major order.
    #[wasm_bindgen]
    pub fn chop(
        &self,
        image_data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<js_sys::Array, JsValue> {
        let image = PixelBuffer::new(width, height, image_data.to_vec()).map_err(to_js)?;
        let pieces = chop::chop(&image, self.block.x, self.block.y, self.skip_incomplete)
            .map_err(to_js)?;

        let result = js_sys::Array::new();
        for piece in pieces {
            result.push(&js_sys::Uint8Array::from(piece.data()));
        }
        Ok(result)
    }

    /// Rebuild raw RGBA from the loaded tiles. Output has the same size as the input.
    #[wasm_bindgen]
    pub fn composite(
        &self,
        image_data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, JsValue> {
        let target = PixelBuffer::new(width, height, image_data.to_vec()).map_err(to_js)?;
        let backend = ImageCrateBackend::default();
        let (x_size, y_size) = (self.block.x, self.block.y);
        let result = mosaic::composite_with(&backend, &target, &self.tiles, x_size, y_size)
            .map_err(to_js)?;
        web_sys::console::log_1(
            &format!("mosaic {}x{} from {} tiles", width, height, self.tiles.len()).into(),
        );
        Ok(result.into_raw())
    }
}

impl Default for WasmMosaic {
    fn default() -> Self {
        Self::new()
    }
}
