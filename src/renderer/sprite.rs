//! Bitmask sprites
//!
//! A sprite is an unsigned mask paired with a caller-declared block shape.
//! Bit `i` set means the pixel at `(i % width, i / width)` is lit, so the
//! mask reads row-major starting from the least significant bit:
//!
//! ```text
//! 4x2, 0b1001_0110:   . X X .
//!                     X . . X
//! ```

use crate::error::{Error, Result};

/// Width and height of a sprite block, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub width: u8,
    pub height: u8,
}

impl Shape {
    /// Entity segment travelling up or down
    pub const HORIZONTAL: Shape = Shape::new(4, 2);
    /// Entity segment travelling left or right
    pub const VERTICAL: Shape = Shape::new(2, 4);
    /// Static item
    pub const ITEM: Shape = Shape::new(3, 3);
    /// Large composite glyph
    pub const GLYPH: Shape = Shape::new(8, 4);
    /// HUD digit
    pub const DIGIT: Shape = Shape::new(3, 5);

    pub const fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }

    pub fn cells(&self) -> u32 {
        self.width as u32 * self.height as u32
    }
}

/// A decoded-on-demand sprite with validated geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    bits: u32,
    shape: Shape,
}

impl Sprite {
    pub fn new(bits: u32, width: u8, height: u8) -> Result<Self> {
        Self::with_shape(bits, Shape::new(width, height))
    }

    pub fn with_shape(bits: u32, shape: Shape) -> Result<Self> {
        if shape.width == 0 || shape.height == 0 || shape.cells() > u32::BITS {
            return Err(Error::InvalidSpriteGeometry {
                width: shape.width,
                height: shape.height,
            });
        }
        Ok(Self { bits, shape })
    }

    /// A sprite that lights nothing; drawing it only clears its footprint
    pub fn blank(shape: Shape) -> Result<Self> {
        Self::with_shape(0, shape)
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn width(&self) -> u8 {
        self.shape.width
    }

    pub fn height(&self) -> u8 {
        self.shape.height
    }

    pub fn is_blank(&self) -> bool {
        self.pixels().len() == 0
    }

    /// Lit pixel offsets in increasing bit order.
    ///
    /// Bits at or beyond `width * height` are ignored.
    pub fn pixels(&self) -> Pixels {
        let cells = self.shape.cells();
        let mask = if cells >= u32::BITS { u32::MAX } else { (1u32 << cells) - 1 };
        Pixels {
            remaining: self.bits & mask,
            width: self.shape.width as u32,
        }
    }
}

/// Decode a mask into relative pixel offsets
pub fn decode(bits: u32, width: u8, height: u8) -> Result<Pixels> {
    Ok(Sprite::new(bits, width, height)?.pixels())
}

/// Iterator over the lit pixels of a sprite, relative to its origin
#[derive(Debug, Clone)]
pub struct Pixels {
    remaining: u32,
    width: u32,
}

impl Iterator for Pixels {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.remaining.trailing_zeros();
        self.remaining &= self.remaining - 1;
        Some(((i % self.width) as i32, (i / self.width) as i32))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Pixels {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_row_major() {
        let pixels: Vec<_> = decode(0b1001_0110, 4, 2).unwrap().collect();
        assert_eq!(pixels, vec![(1, 0), (2, 0), (0, 1), (3, 1)]);
    }

    #[test]
    fn test_zero_sprite_is_empty() {
        assert_eq!(decode(0, 8, 4).unwrap().count(), 0);
        assert!(Sprite::blank(Shape::ITEM).unwrap().is_blank());
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(matches!(
            decode(1, 0, 4),
            Err(Error::InvalidSpriteGeometry { width: 0, height: 4 })
        ));
        assert!(decode(1, 4, 0).is_err());
        assert!(decode(1, 8, 5).is_err());
    }

    #[test]
    fn test_bits_outside_shape_ignored() {
        let pixels: Vec<_> = decode(0b1_0000_0001, 2, 4).unwrap().collect();
        assert_eq!(pixels, vec![(0, 0)]);
    }

    #[test]
    fn test_full_32_cell_sprite() {
        let pixels: Vec<_> = decode(u32::MAX, 8, 4).unwrap().collect();
        assert_eq!(pixels.len(), 32);
        assert_eq!(pixels.last(), Some(&(7, 3)));
    }

    #[test]
    fn test_pixels_restartable() {
        let sprite = Sprite::with_shape(0b101_010_101, Shape::ITEM).unwrap();
        let first: Vec<_> = sprite.pixels().collect();
        let second: Vec<_> = sprite.pixels().collect();
        assert_eq!(first, second);
        assert_eq!(sprite.pixels().len(), 5);
    }

    proptest! {
        #[test]
        fn decode_matches_bit_definition(bits in any::<u32>(), width in 1u8..=8, height in 1u8..=4) {
            let cells = width as u32 * height as u32;
            let expected: Vec<(i32, i32)> = (0..cells)
                .filter(|i| bits & (1 << i) != 0)
                .map(|i| ((i % width as u32) as i32, (i / width as u32) as i32))
                .collect();
            let decoded: Vec<_> = decode(bits, width, height).unwrap().collect();
            prop_assert_eq!(decoded, expected);
        }
    }
}
