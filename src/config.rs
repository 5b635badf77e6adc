//! Workflow settings: block size and chop behavior.

use crate::{MosaicError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MIN_BLOCK_SIDE: u32 = 1;
pub const MAX_BLOCK_SIDE: u32 = 256;
pub const DEFAULT_BLOCK_SIDE: u32 = 35;

/// Block dimensions accepted by the workflows, each side in 1..=256.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockSize {
    pub x: u32,
    pub y: u32,
}

impl BlockSize {
    pub fn new(x: u32, y: u32) -> Result<Self> {
        for (axis, side) in [("x", x), ("y", y)] {
            if side == 0 {
                return Err(MosaicError::InvalidInput(format!("{axis} size must be positive")));
            }
            if !(MIN_BLOCK_SIDE..=MAX_BLOCK_SIDE).contains(&side) {
                return Err(MosaicError::Config(format!(
                    "{axis} size {side} is outside {MIN_BLOCK_SIDE}..={MAX_BLOCK_SIDE}"
                )));
            }
        }
        Ok(Self { x, y })
    }
}

impl Default for BlockSize {
    fn default() -> Self {
        Self { x: DEFAULT_BLOCK_SIDE, y: DEFAULT_BLOCK_SIDE }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkflowConfig {
    pub x_size: u32,
    pub y_size: u32,
    /// Drop chop pieces that would run past the image edge.
    pub skip_incomplete: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            x_size: DEFAULT_BLOCK_SIDE,
            y_size: DEFAULT_BLOCK_SIDE,
            skip_incomplete: true,
        }
    }
}

impl WorkflowConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| MosaicError::Config(e.to_string()))?;
        config.block_size()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn block_size(&self) -> Result<BlockSize> {
        BlockSize::new(self.x_size, self.y_size)
    }
}
