// ============================================================================
// Storage Kinds
// Integer types that can back a fixed-point value
// ============================================================================

use super::errors::{FixedPointError, FixedPointResult};
use std::fmt;
use std::hash::Hash;

/// An integer type usable as fixed-point storage.
///
/// Implemented for `i8`..`i64` and `u8`..`u64`. Every kind carries a
/// double-width intermediate used by multiplication and division, so those
/// operations never lose bits before the final narrowing.
///
/// All non-checked operations wrap on overflow regardless of signedness.
pub trait Storage:
    Copy + Eq + Ord + Hash + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Width in bits.
    const BITS: u32;

    const ZERO: Self;
    const MIN: Self;
    const MAX: Self;

    fn wrapping_add(self, rhs: Self) -> Self;

    fn wrapping_sub(self, rhs: Self) -> Self;

    fn checked_add(self, rhs: Self) -> Option<Self>;

    fn checked_sub(self, rhs: Self) -> Option<Self>;

    /// Left shift; a count at or past the width shifts every bit out.
    fn shl_bits(self, n: u32) -> Self;

    /// Right shift (arithmetic for signed kinds); a count at or past the
    /// width leaves only sign fill.
    fn shr_bits(self, n: u32) -> Self;

    /// `1 << n`, wrapping into the sign bit and vanishing past the width.
    fn unit_at(n: u32) -> Self;

    /// Narrow an `i128`, keeping the low `BITS` bits.
    fn from_i128_wrapping(value: i128) -> Self;

    /// Narrow an `i128`, failing when it does not fit.
    fn try_from_i128(value: i128) -> Option<Self>;

    fn to_i128(self) -> i128;

    fn to_f64(self) -> f64;

    fn to_f32(self) -> f32;

    /// `round(self * rhs / 2^frac)` computed at double width, rounding half
    /// away from zero, then wrapped into storage.
    fn mul_round(self, rhs: Self, frac: u32) -> Self;

    /// As [`Storage::mul_round`] but reporting a result that does not fit.
    fn checked_mul_round(self, rhs: Self, frac: u32) -> FixedPointResult<Self>;

    /// `round(self * 2^frac / rhs)` computed at double width, rounding half
    /// away from zero, then wrapped into storage.
    ///
    /// # Panics
    /// Panics if `rhs` is zero, like native integer division.
    fn div_round(self, rhs: Self, frac: u32) -> Self;

    /// As [`Storage::div_round`] but reporting division by zero and results
    /// that do not fit.
    fn checked_div_round(self, rhs: Self, frac: u32) -> FixedPointResult<Self>;
}

/// Storage kinds that represent negative values.
pub trait SignedStorage: Storage {
    fn wrapping_neg(self) -> Self;

    fn checked_neg(self) -> Option<Self>;

    fn is_negative(self) -> bool;
}

// ----------------------------- shared plumbing -------------------------------

macro_rules! impl_storage_common {
    ($t:ty) => {
        const BITS: u32 = <$t>::BITS;
        const ZERO: Self = 0;
        const MIN: Self = <$t>::MIN;
        const MAX: Self = <$t>::MAX;

        #[inline]
        fn wrapping_add(self, rhs: Self) -> Self {
            self.wrapping_add(rhs)
        }

        #[inline]
        fn wrapping_sub(self, rhs: Self) -> Self {
            self.wrapping_sub(rhs)
        }

        #[inline]
        fn checked_add(self, rhs: Self) -> Option<Self> {
            self.checked_add(rhs)
        }

        #[inline]
        fn checked_sub(self, rhs: Self) -> Option<Self> {
            self.checked_sub(rhs)
        }

        #[inline]
        fn shl_bits(self, n: u32) -> Self {
            self.checked_shl(n).unwrap_or(0)
        }

        #[inline]
        fn unit_at(n: u32) -> Self {
            (1 as $t).checked_shl(n).unwrap_or(0)
        }

        #[inline]
        fn from_i128_wrapping(value: i128) -> Self {
            value as $t
        }

        #[inline]
        fn try_from_i128(value: i128) -> Option<Self> {
            <$t>::try_from(value).ok()
        }

        #[inline]
        fn to_i128(self) -> i128 {
            self as i128
        }

        #[inline]
        fn to_f64(self) -> f64 {
            self as f64
        }

        #[inline]
        fn to_f32(self) -> f32 {
            self as f32
        }
    };
}

// ------------------------------- signed kinds --------------------------------

macro_rules! impl_signed_storage {
    ($($t:ty => $wide:ty),+ $(,)?) => {
        $(
            impl Storage for $t {
                impl_storage_common!($t);

                #[inline]
                fn shr_bits(self, n: u32) -> Self {
                    self.checked_shr(n).unwrap_or(if self < 0 { -1 } else { 0 })
                }

                #[inline]
                fn mul_round(self, rhs: Self, frac: u32) -> Self {
                    signed_mul_wide!($wide, self, rhs, frac) as $t
                }

                fn checked_mul_round(self, rhs: Self, frac: u32) -> FixedPointResult<Self> {
                    let wide = signed_mul_wide!($wide, self, rhs, frac);
                    <$t>::try_from(wide).map_err(|_| signed_overflow_kind(wide < 0))
                }

                #[inline]
                fn div_round(self, rhs: Self, frac: u32) -> Self {
                    assert!(rhs != 0, "attempt to divide by zero");
                    signed_div_wide!($wide, self, rhs, frac)
                        .unwrap_or(<$wide>::MIN) as $t
                }

                fn checked_div_round(self, rhs: Self, frac: u32) -> FixedPointResult<Self> {
                    if rhs == 0 {
                        return Err(FixedPointError::DivisionByZero);
                    }
                    let wide = signed_div_wide!($wide, self, rhs, frac)
                        .ok_or(FixedPointError::Overflow)?;
                    <$t>::try_from(wide).map_err(|_| signed_overflow_kind(wide < 0))
                }
            }

            impl SignedStorage for $t {
                #[inline]
                fn wrapping_neg(self) -> Self {
                    self.wrapping_neg()
                }

                #[inline]
                fn checked_neg(self) -> Option<Self> {
                    self.checked_neg()
                }

                #[inline]
                fn is_negative(self) -> bool {
                    self < 0
                }
            }
        )+
    };
}

/// Double-width product of two signed values, round-shifted right by `frac`.
macro_rules! signed_mul_wide {
    ($wide:ty, $a:expr, $b:expr, $frac:expr) => {{
        let product = ($a as $wide) * ($b as $wide);
        let frac: u32 = $frac;
        if frac == 0 {
            product
        } else {
            let half: $wide = 1 << (frac - 1);
            if product >= 0 {
                (product + half) >> frac
            } else {
                -((-product + half) >> frac)
            }
        }
    }};
}

/// Double-width quotient `(a << frac) / b`, rounded half away from zero.
/// `None` for a zero divisor and for the overflowing `MIN / -1`, which the
/// wrapping caller maps back to `MIN`.
macro_rules! signed_div_wide {
    ($wide:ty, $a:expr, $b:expr, $frac:expr) => {{
        let num: $wide = ($a as $wide) << $frac;
        let den: $wide = $b as $wide;
        num.checked_div(den).map(|quotient| {
            let remainder = num % den;
            if remainder != 0 && remainder.unsigned_abs() * 2 >= den.unsigned_abs() {
                if (num < 0) != (den < 0) {
                    quotient - 1
                } else {
                    quotient + 1
                }
            } else {
                quotient
            }
        })
    }};
}

fn signed_overflow_kind(negative: bool) -> FixedPointError {
    if negative {
        FixedPointError::Underflow
    } else {
        FixedPointError::Overflow
    }
}

// ------------------------------ unsigned kinds -------------------------------

macro_rules! impl_unsigned_storage {
    ($($t:ty => $wide:ty),+ $(,)?) => {
        $(
            impl Storage for $t {
                impl_storage_common!($t);

                #[inline]
                fn shr_bits(self, n: u32) -> Self {
                    self.checked_shr(n).unwrap_or(0)
                }

                #[inline]
                fn mul_round(self, rhs: Self, frac: u32) -> Self {
                    unsigned_mul_wide!($wide, self, rhs, frac) as $t
                }

                fn checked_mul_round(self, rhs: Self, frac: u32) -> FixedPointResult<Self> {
                    let wide = unsigned_mul_wide!($wide, self, rhs, frac);
                    <$t>::try_from(wide).map_err(|_| FixedPointError::Overflow)
                }

                #[inline]
                fn div_round(self, rhs: Self, frac: u32) -> Self {
                    unsigned_div_wide!($wide, self, rhs, frac) as $t
                }

                fn checked_div_round(self, rhs: Self, frac: u32) -> FixedPointResult<Self> {
                    if rhs == 0 {
                        return Err(FixedPointError::DivisionByZero);
                    }
                    let wide = unsigned_div_wide!($wide, self, rhs, frac);
                    <$t>::try_from(wide).map_err(|_| FixedPointError::Overflow)
                }
            }
        )+
    };
}

macro_rules! unsigned_mul_wide {
    ($wide:ty, $a:expr, $b:expr, $frac:expr) => {{
        let product = ($a as $wide) * ($b as $wide);
        let frac: u32 = $frac;
        if frac == 0 {
            product
        } else {
            let half: $wide = 1 << (frac - 1);
            (product + half) >> frac
        }
    }};
}

macro_rules! unsigned_div_wide {
    ($wide:ty, $a:expr, $b:expr, $frac:expr) => {{
        let num: $wide = ($a as $wide) << $frac;
        let den: $wide = $b as $wide;
        let quotient = num / den;
        if (num % den) * 2 >= den {
            quotient + 1
        } else {
            quotient
        }
    }};
}

impl_signed_storage! {
    i8 => i16,
    i16 => i32,
    i32 => i64,
    i64 => i128,
}

impl_unsigned_storage! {
    u8 => u16,
    u16 => u32,
    u32 => u64,
    u64 => u128,
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(<i16 as Storage>::BITS, 16);
        assert_eq!(<u64 as Storage>::BITS, 64);
        assert_eq!(<u8 as Storage>::MAX, 255);
        assert_eq!(<i8 as Storage>::MIN, -128);
    }

    #[test]
    fn test_wrapping_add_sub() {
        assert_eq!(Storage::wrapping_add(i8::MAX, 1), i8::MIN);
        assert_eq!(Storage::wrapping_sub(0u8, 1), u8::MAX);
        assert_eq!(Storage::checked_add(i8::MAX, 1), None);
    }

    #[test]
    fn test_shifts_past_width() {
        assert_eq!(0x0Fi16.shl_bits(4), 0xF0);
        assert_eq!(1i16.shl_bits(16), 0);
        assert_eq!(1u8.shl_bits(200), 0);
        assert_eq!((-8i16).shr_bits(2), -2);
        assert_eq!((-8i16).shr_bits(16), -1);
        assert_eq!(8i16.shr_bits(40), 0);
        assert_eq!(0xF0u8.shr_bits(8), 0);
    }

    #[test]
    fn test_unit_at() {
        assert_eq!(<i16 as Storage>::unit_at(8), 256);
        assert_eq!(<i16 as Storage>::unit_at(15), i16::MIN);
        assert_eq!(<i16 as Storage>::unit_at(16), 0);
        assert_eq!(<u64 as Storage>::unit_at(63), 1u64 << 63);
    }

    #[test]
    fn test_i128_narrowing() {
        assert_eq!(<i8 as Storage>::from_i128_wrapping(128), -128);
        assert_eq!(<u8 as Storage>::from_i128_wrapping(-1), 255);
        assert_eq!(<i8 as Storage>::try_from_i128(128), None);
        assert_eq!(<u16 as Storage>::try_from_i128(65_535), Some(65_535));
    }

    #[test]
    fn test_float_conversion() {
        assert_eq!(Storage::to_f64(-3i8), -3.0);
        assert_eq!(Storage::to_f32(u64::MAX), 18_446_744_073_709_551_616.0);
        // rounded once, not through f64
        let near_tie = (1i64 << 62) + (1i64 << 38) + 1;
        assert_eq!(Storage::to_f32(near_tie), 4_611_686_568_183_201_792.0);
    }

    #[test]
    fn test_mul_round_signed() {
        // 1.5 * 1.5 = 2.25 with 8 fractional bits
        assert_eq!(384i16.mul_round(384, 8), 576);
        // -1.5 * 1.5 = -2.25
        assert_eq!((-384i16).mul_round(384, 8), -576);
        // 3 * 3 raw at frac 1: 9/2 = 4.5 rounds away from zero
        assert_eq!(3i16.mul_round(3, 1), 5);
        assert_eq!((-3i16).mul_round(3, 1), -5);
        // frac 0 is plain integer multiplication
        assert_eq!(7i32.mul_round(6, 0), 42);
    }

    #[test]
    fn test_mul_round_unsigned() {
        assert_eq!(384u16.mul_round(384, 8), 576);
        assert_eq!(3u16.mul_round(3, 1), 5);
        assert_eq!(u64::MAX.mul_round(1 << 32, 32), u64::MAX);
    }

    #[test]
    fn test_mul_round_wraps() {
        // 100.0 * 100.0 does not fit Q8.8 and wraps
        let wrapped = 25_600i16.mul_round(25_600, 8);
        assert_eq!(wrapped, (2_560_000i32 as i16));
        assert_eq!(
            25_600i16.checked_mul_round(25_600, 8),
            Err(FixedPointError::Overflow)
        );
        assert_eq!(
            (-25_600i16).checked_mul_round(25_600, 8),
            Err(FixedPointError::Underflow)
        );
    }

    #[test]
    fn test_div_round_signed() {
        // 1.0 / 3.0 at 8 fractional bits: 256 / 3 = 85.33 -> 85
        assert_eq!(256i16.div_round(768, 8), 85);
        // 2.0 / 3.0: 170.67 -> 171
        assert_eq!(512i16.div_round(768, 8), 171);
        assert_eq!((-512i16).div_round(768, 8), -171);
        assert_eq!(512i16.div_round(-768, 8), -171);
        // exact half rounds away from zero: 1 / 2 at frac 0 -> 1
        assert_eq!(1i32.div_round(2, 0), 1);
        assert_eq!((-1i32).div_round(2, 0), -1);
    }

    #[test]
    fn test_div_round_unsigned() {
        assert_eq!(512u16.div_round(768, 8), 171);
        assert_eq!(1u32.div_round(2, 0), 1);
    }

    #[test]
    fn test_div_min_by_minus_one() {
        // Full-fraction storage: MIN << BITS is the wide minimum
        assert_eq!(i16::MIN.div_round(-1, 16), 0);
        assert_eq!(
            i16::MIN.checked_div_round(-1, 16),
            Err(FixedPointError::Overflow)
        );
    }

    #[test]
    fn test_checked_div_by_zero() {
        assert_eq!(
            5i16.checked_div_round(0, 8),
            Err(FixedPointError::DivisionByZero)
        );
        assert_eq!(
            5u8.checked_div_round(0, 4),
            Err(FixedPointError::DivisionByZero)
        );
    }

    #[test]
    #[should_panic]
    fn test_div_round_by_zero_panics() {
        let _ = 5i16.div_round(0, 8);
    }

    #[test]
    fn test_signed_storage() {
        assert_eq!(SignedStorage::wrapping_neg(i8::MIN), i8::MIN);
        assert_eq!(SignedStorage::checked_neg(i8::MIN), None);
        assert!(SignedStorage::is_negative(-1i64));
        assert!(!SignedStorage::is_negative(0i64));
    }
}
