//! The logical-pixel unit: 26.6 fixed point
//!
//! Every metric a glyph engine reports travels in this unit. Six
//! fractional bits give 1/64th-pixel resolution—fine enough for
//! sub-pixel glyph positioning, coarse enough that comparisons stay
//! exact and hashable. The rounding family (`round`, `floor`, `ceil`)
//! carries the precise semantics the rasterizer origin math and the
//! integer-metrics mode depend on.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A 26.6 fixed-point value, the engine's logical-pixel currency.
///
/// ```rust
/// use scriva_core::fixed::Fixed;
///
/// let x = Fixed::from_int(5);       // exactly 5.0
/// let y = Fixed::from_f32(5.5);     // 5 + 32/64
/// assert_eq!((x + y).round().to_int(), 11);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Fixed(i32);

impl Fixed {
    /// Six fractional bits, 64 steps to the pixel.
    pub const FRAC_BITS: u32 = 6;

    /// Mask isolating the fractional part.
    pub const FRAC_MASK: i32 = (1 << Self::FRAC_BITS) - 1;

    /// Exactly 1.0.
    pub const ONE: Fixed = Fixed(1 << Self::FRAC_BITS);

    /// Exactly 0.0.
    pub const ZERO: Fixed = Fixed(0);

    /// Exactly 0.5, the rounding pivot.
    pub const HALF: Fixed = Fixed(1 << (Self::FRAC_BITS - 1));

    #[inline]
    pub const fn from_int(x: i32) -> Self {
        Fixed(x << Self::FRAC_BITS)
    }

    #[inline]
    pub fn from_f32(x: f32) -> Self {
        Fixed((x * 64.0) as i32)
    }

    /// Truncate toward negative infinity to a whole pixel count.
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 >> Self::FRAC_BITS
    }

    /// Round half-up to the nearest whole pixel count.
    #[inline]
    pub const fn to_int_round(self) -> i32 {
        (self.0 + Self::HALF.0) >> Self::FRAC_BITS
    }

    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 64.0
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 64.0
    }

    /// Nearest value on the whole-pixel grid, halves rounding up.
    ///
    /// This is the integer-metrics rounding: the result is still a
    /// `Fixed`, but its fractional part is zero.
    #[inline]
    pub const fn round(self) -> Fixed {
        Fixed((self.0 + Self::HALF.0) & !Self::FRAC_MASK)
    }

    /// Largest grid value not above `self`.
    #[inline]
    pub const fn floor(self) -> Fixed {
        Fixed(self.0 & !Self::FRAC_MASK)
    }

    /// Smallest grid value not below `self`.
    #[inline]
    pub const fn ceil(self) -> Fixed {
        if self.0 & Self::FRAC_MASK == 0 {
            self
        } else {
            Fixed((self.0 & !Self::FRAC_MASK) + Self::ONE.0)
        }
    }

    #[inline]
    pub const fn frac(self) -> i32 {
        self.0 & Self::FRAC_MASK
    }

    #[inline]
    pub const fn abs(self) -> Fixed {
        Fixed(self.0.abs())
    }

    /// Raw 32-bit representation, 64 units per pixel.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Fixed(raw)
    }
}

impl Add for Fixed {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Fixed(self.0 + other.0)
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Fixed {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Fixed(self.0 - other.0)
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Fixed {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Fixed(-self.0)
    }
}

impl Sum for Fixed {
    fn sum<I: Iterator<Item = Fixed>>(iter: I) -> Self {
        iter.fold(Fixed::ZERO, Add::add)
    }
}

impl From<i32> for Fixed {
    #[inline]
    fn from(x: i32) -> Self {
        Self::from_int(x)
    }
}

impl From<f32> for Fixed {
    #[inline]
    fn from(x: f32) -> Self {
        Self::from_f32(x)
    }
}

impl From<Fixed> for f32 {
    #[inline]
    fn from(x: Fixed) -> f32 {
        x.to_f32()
    }
}

/// A position in logical pixels, 26.6 in both axes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FixedPoint {
    pub x: Fixed,
    pub y: Fixed,
}

impl FixedPoint {
    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(Fixed::ZERO.raw(), 0);
        assert_eq!(Fixed::ONE.raw(), 64);
        assert_eq!(Fixed::HALF.raw(), 32);
    }

    #[test]
    fn int_round_trip() {
        assert_eq!(Fixed::from_int(5).to_int(), 5);
        assert_eq!(Fixed::from_int(-3).to_int(), -3);
        assert_eq!(Fixed::from_f32(5.75).to_int(), 5);
        assert_eq!(Fixed::from_f32(-3.25).to_int(), -4);
    }

    #[test]
    fn round_is_half_up_on_the_grid() {
        assert_eq!(Fixed::from_f32(5.25).round(), Fixed::from_int(5));
        assert_eq!(Fixed::from_f32(5.5).round(), Fixed::from_int(6));
        assert_eq!(Fixed::from_f32(-3.5).round(), Fixed::from_int(-3));
        assert_eq!(Fixed::from_f32(-3.75).round(), Fixed::from_int(-4));
        assert_eq!(Fixed::from_f32(8.5).round().frac(), 0);
    }

    #[test]
    fn floor_and_ceil() {
        assert_eq!(Fixed::from_f32(5.75).floor(), Fixed::from_int(5));
        assert_eq!(Fixed::from_f32(-3.25).floor(), Fixed::from_int(-4));
        assert_eq!(Fixed::from_f32(5.25).ceil(), Fixed::from_int(6));
        assert_eq!(Fixed::from_int(5).ceil(), Fixed::from_int(5));
        assert_eq!(Fixed::from_f32(-3.75).ceil(), Fixed::from_int(-3));
    }

    #[test]
    fn arithmetic() {
        let a = Fixed::from_f32(3.5);
        let b = Fixed::from_f32(2.25);
        assert_eq!(a + b, Fixed::from_f32(5.75));
        assert_eq!(a - b, Fixed::from_f32(1.25));
        assert_eq!(-a, Fixed::from_f32(-3.5));
    }

    #[test]
    fn sum_of_advances() {
        let total: Fixed = [1.5f32, 2.0, 0.25]
            .iter()
            .map(|&v| Fixed::from_f32(v))
            .sum();
        assert_eq!(total, Fixed::from_f32(3.75));
    }

    #[test]
    fn fraction_resolution() {
        for i in 0..64 {
            assert_eq!(Fixed::from_raw(i).frac(), i);
        }
    }
}
