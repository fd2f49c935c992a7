//! HUD panel coordinate space
//!
//! A strip of equally spaced blocks above the field. Blocks are addressed
//! by signed index: `0..width` from the left, `-width..0` from the right.
//! The panel never wraps.

use crate::error::{Error, Result};
use super::sprite::Shape;

/// Gap between adjacent panel blocks, and margin at the panel's left and top
const BLOCK_GAP: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    /// Number of addressable blocks
    pub width: i32,
    pub block: Shape,
    /// Panel width in surface pixels
    pub surface_width: i32,
}

impl PanelGeometry {
    /// Fit as many `block`-shaped slots as possible into a strip `surface_width` pixels wide
    pub fn fit(surface_width: i32, block: Shape) -> Self {
        let stride = block.width as i32 + BLOCK_GAP;
        Self {
            width: ((surface_width - BLOCK_GAP) / stride).max(0),
            block,
            surface_width,
        }
    }

    fn stride(&self) -> i32 {
        self.block.width as i32 + BLOCK_GAP
    }

    /// Left-based slot for a signed block index
    pub fn slot(&self, index: i32) -> Result<i32> {
        let slot = if index < 0 { self.width + index } else { index };
        if !(0..self.width).contains(&slot) {
            return Err(Error::PanelIndexOutOfRange { index, width: self.width });
        }
        Ok(slot)
    }

    /// Surface origin of a block
    pub fn block_to_pixel(&self, index: i32) -> Result<(i32, i32)> {
        let slot = self.slot(index)?;
        Ok((BLOCK_GAP + slot * self.stride(), BLOCK_GAP))
    }

    /// Shortest strip holding the blocks, the separator line under them and
    /// a blank row above the field border
    pub fn min_strip_height(&self) -> i32 {
        BLOCK_GAP + self.block.height as i32 + 2
    }

    /// Surface origin for free placement; negative `x` counts from the right edge
    pub fn offset_to_pixel(&self, x: i32, y: i32) -> (i32, i32) {
        let x = if x < 0 { self.surface_width + x } else { x };
        (x, y)
    }
}
