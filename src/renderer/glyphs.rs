//! HUD glyphs drawn locally, without the simulation engine

use crate::error::Result;
use super::sprite::{Shape, Sprite};

/// 3x5 digit font, written top-left first from the most significant bit.
/// Bit 0 is padding.
#[rustfmt::skip]
const DIGITS: [u16; 10] = [
    0b111_101_101_101_111_0,
    0b010_110_010_010_010_0,
    0b111_001_111_100_111_0,
    0b111_001_111_001_111_0,
    0b101_101_111_001_001_0,
    0b111_100_111_001_111_0,
    0b111_100_111_101_111_0,
    0b111_001_010_010_010_0,
    0b111_101_111_101_111_0,
    0b111_101_111_001_111_0,
];

/// Sprite for a single decimal digit; anything above 9 is blank
pub fn digit(d: u8) -> Result<Sprite> {
    let bits = DIGITS.get(d as usize).map_or(0, |g| g.reverse_bits());
    Sprite::with_shape(bits as u32, Shape::DIGIT)
}

/// The lowest `count` decimal digits of `n`, zero padded, most significant first
pub fn decimal_digits(mut n: u32, count: usize) -> Vec<u8> {
    let mut digits = vec![0; count];
    for slot in digits.iter_mut().rev() {
        *slot = (n % 10) as u8;
        n /= 10;
    }
    digits
}
