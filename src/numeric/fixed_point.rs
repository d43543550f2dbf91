// ============================================================================
// Fixed-Point Number
// Binary fixed-point value with compile-time layout and integer-only math
// ============================================================================

use super::errors::{FixedPointError, FixedPointResult};
use super::operators::{OrderedField, Shiftable, UnitSteppable};
use super::storage::{SignedStorage, Storage};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::ops::Neg;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Binary fixed-point number usable in place of `f32`/`f64`.
///
/// Internally stores `round(value × 2^F)` in the integer `B`. Only integer
/// instructions run after construction.
///
/// # Type Parameters
/// - `B`: storage kind; signed storage gives a signed number.
/// - `I`: integer bits, counting the sign bit for signed storage.
/// - `F`: fractional bits. `I + F` must not exceed the width of `B`; this is
///   checked when the type is first used. [`fixed!`](crate::fixed) fills in
///   `F = bits(B) - I`.
///
/// # Overflow
/// Every operator wraps like the storage integer under two's complement,
/// for signed and unsigned storage alike. Use the `checked_*` methods to
/// detect overflow.
///
/// # Example
/// ```
/// use fixed_point::numeric::Q8_8;
///
/// let x = Q8_8::from_f64(3.75);
/// assert_eq!(x.raw(), 960);
///
/// let sum = x + Q8_8::from_f64(1.25);
/// assert_eq!(sum.to_f64(), 5.0);
/// ```
///
/// # Layout
/// A layout may use every storage bit:
/// ```
/// use fixed_point::numeric::FixedPoint;
///
/// assert_eq!(FixedPoint::<u8, 0, 8>::from_f64(0.5).raw(), 128);
/// assert_eq!(FixedPoint::<i8, 8, 0>::from_f64(-3.0).raw(), -3);
/// ```
///
/// Asking for more bits than the storage holds is rejected at compile time:
/// ```compile_fail
/// use fixed_point::numeric::FixedPoint;
///
/// let _ = FixedPoint::<i8, 5, 5>::from_f64(1.0);
/// ```
///
/// ```compile_fail
/// use fixed_point::numeric::FixedPoint;
///
/// let _ = FixedPoint::<u16, 17, 0>::ZERO;
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct FixedPoint<B: Storage, const I: u32, const F: u32>(B);

/// Compute 2^n as `f64` at compile time
const fn pow2(n: u32) -> f64 {
    let mut result = 1.0;
    let mut i = 0;
    while i < n {
        result *= 2.0;
        i += 1;
    }
    result
}

impl<B: Storage, const I: u32, const F: u32> FixedPoint<B, I, F> {
    const LAYOUT_CHECK: () = assert!(
        I <= B::BITS && F <= B::BITS - I,
        "integer bits plus fractional bits exceed the storage width"
    );

    /// Bits left of the radix point
    pub const INTEGER_BITS: u32 = I;

    /// Bits right of the radix point
    pub const FRACTIONAL_BITS: u32 = F;

    /// The scale factor (2^F)
    pub const TWO_POWER_F: f64 = pow2(F);

    /// Zero value
    pub const ZERO: Self = Self::from_raw(B::ZERO);

    /// Smallest representable value
    pub const MIN: Self = Self::from_raw(B::MIN);

    /// Largest representable value
    pub const MAX: Self = Self::from_raw(B::MAX);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from the raw stored integer.
    #[inline]
    pub const fn from_raw(raw: B) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::LAYOUT_CHECK;
        Self(raw)
    }

    /// Quantize a real value, rounding half away from zero.
    ///
    /// Values outside the representable range wrap into storage; NaN maps
    /// to zero.
    pub fn from_f64(value: f64) -> Self {
        let rounded = (value * Self::TWO_POWER_F).round() as i128;
        let raw = B::try_from_i128(rounded).unwrap_or_else(|| {
            tracing::trace!(value, bits = F, "fixed-point construction outside range wraps");
            B::from_i128_wrapping(rounded)
        });
        Self::from_raw(raw)
    }

    /// Quantize a single-precision value; see [`FixedPoint::from_f64`].
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self::from_f64(f64::from(value))
    }

    /// Quantize a real value, rejecting anything the storage cannot hold.
    ///
    /// # Errors
    /// - `NotFinite` for NaN and infinities
    /// - `OutOfRange` if the rounded value does not fit
    pub fn try_from_f64(value: f64) -> FixedPointResult<Self> {
        if !value.is_finite() {
            tracing::debug!(value, "rejected non-finite fixed-point input");
            return Err(FixedPointError::NotFinite);
        }

        let rounded = (value * Self::TWO_POWER_F).round();
        let raw = if rounded < i128::MIN as f64 || rounded >= i128::MAX as f64 {
            None
        } else {
            B::try_from_i128(rounded as i128)
        };

        raw.map(Self::from_raw).ok_or_else(|| {
            tracing::debug!(value, bits = F, "rejected out-of-range fixed-point input");
            FixedPointError::OutOfRange
        })
    }

    /// Create from a whole number.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the value is too large to
    /// represent.
    pub fn from_integer(value: i64) -> FixedPointResult<Self> {
        let scaled = i128::from(value) << F;
        B::try_from_i128(scaled).map(Self::from_raw).ok_or(if value < 0 {
            FixedPointError::Underflow
        } else {
            FixedPointError::Overflow
        })
    }

    /// The value one, wrapped into storage when `I` leaves no room for it.
    #[inline]
    pub fn one() -> Self {
        Self::from_raw(B::unit_at(F))
    }

    /// The smallest positive step, `2^-F`.
    #[inline]
    pub fn epsilon() -> Self {
        Self::from_raw(B::unit_at(0))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The raw stored integer, `round(value × 2^F)`.
    #[inline]
    pub fn raw(self) -> B {
        self.0
    }

    /// Best-effort floating-point approximation (`raw / 2^F`).
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0.to_f64() / Self::TWO_POWER_F
    }

    /// Single-precision approximation, rounded once from the raw value.
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0.to_f32() / Self::TWO_POWER_F as f32
    }

    /// Integer part, rounded toward negative infinity.
    #[inline]
    pub fn integer_part(self) -> B {
        self.0.shr_bits(F)
    }

    /// Distance above [`FixedPoint::integer_part`] in raw steps.
    #[inline]
    pub fn fractional_raw(self) -> B {
        self.0.wrapping_sub(self.0.shr_bits(F).shl_bits(F))
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == B::ZERO
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > B::ZERO
    }

    // ========================================================================
    // Checked Arithmetic
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    pub fn checked_add(self, rhs: Self) -> FixedPointResult<Self> {
        Storage::checked_add(self.0, rhs.0)
            .map(Self::from_raw)
            .ok_or_else(|| {
                if rhs.0 < B::ZERO {
                    FixedPointError::Underflow
                } else {
                    FixedPointError::Overflow
                }
            })
            .inspect_err(|err| tracing::debug!(%err, "checked fixed-point addition failed"))
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    pub fn checked_sub(self, rhs: Self) -> FixedPointResult<Self> {
        Storage::checked_sub(self.0, rhs.0)
            .map(Self::from_raw)
            .ok_or_else(|| {
                if rhs.0 < B::ZERO {
                    FixedPointError::Overflow
                } else {
                    FixedPointError::Underflow
                }
            })
            .inspect_err(|err| tracing::debug!(%err, "checked fixed-point subtraction failed"))
    }

    /// Checked multiplication, rounding half away from zero.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    pub fn checked_mul(self, rhs: Self) -> FixedPointResult<Self> {
        self.0
            .checked_mul_round(rhs.0, F)
            .map(Self::from_raw)
            .inspect_err(|err| tracing::debug!(%err, "checked fixed-point multiplication failed"))
    }

    /// Checked division, rounding half away from zero.
    ///
    /// # Errors
    /// - `DivisionByZero` if `rhs` is zero
    /// - `Overflow` or `Underflow` if the result is out of range
    pub fn checked_div(self, rhs: Self) -> FixedPointResult<Self> {
        self.0
            .checked_div_round(rhs.0, F)
            .map(Self::from_raw)
            .inspect_err(|err| tracing::debug!(%err, "checked fixed-point division failed"))
    }
}

// ============================================================================
// Signed Storage
// ============================================================================

impl<B: SignedStorage, const I: u32, const F: u32> FixedPoint<B, I, F> {
    #[inline]
    pub fn is_negative(self) -> bool {
        self.0.is_negative()
    }

    /// Absolute value; `MIN` wraps to itself.
    #[inline]
    pub fn abs(self) -> Self {
        if self.0.is_negative() {
            -self
        } else {
            self
        }
    }

    /// Checked negation.
    ///
    /// # Errors
    /// Returns `Overflow` when negating `MIN`.
    pub fn checked_neg(self) -> FixedPointResult<Self> {
        self.0
            .checked_neg()
            .map(Self::from_raw)
            .ok_or(FixedPointError::Overflow)
    }
}

impl<B: SignedStorage, const I: u32, const F: u32> Neg for FixedPoint<B, I, F> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::from_raw(self.0.wrapping_neg())
    }
}

// ============================================================================
// Primitive Operators
// ============================================================================

impl<B: Storage, const I: u32, const F: u32> OrderedField for FixedPoint<B, I, F> {
    #[inline]
    fn add_in_place(&mut self, rhs: &Self) {
        self.0 = self.0.wrapping_add(rhs.0);
    }

    #[inline]
    fn sub_in_place(&mut self, rhs: &Self) {
        self.0 = self.0.wrapping_sub(rhs.0);
    }

    #[inline]
    fn mul_in_place(&mut self, rhs: &Self) {
        self.0 = self.0.mul_round(rhs.0, F);
    }

    /// # Panics
    /// Panics if `rhs` is zero.
    #[inline]
    fn div_in_place(&mut self, rhs: &Self) {
        self.0 = self.0.div_round(rhs.0, F);
    }

    #[inline]
    fn less_than(&self, rhs: &Self) -> bool {
        self.0 < rhs.0
    }

    #[inline]
    fn equals(&self, rhs: &Self) -> bool {
        self.0 == rhs.0
    }
}

impl<B: Storage, const I: u32, const F: u32> UnitSteppable for FixedPoint<B, I, F> {
    /// Moves up by one unit in the last place (`2^-F`), i.e. adds one to
    /// the stored integer.
    #[inline]
    fn step_up(&mut self) {
        self.0 = self.0.wrapping_add(B::unit_at(0));
    }

    #[inline]
    fn step_down(&mut self) {
        self.0 = self.0.wrapping_sub(B::unit_at(0));
    }
}

impl<B: Storage, const I: u32, const F: u32> Shiftable for FixedPoint<B, I, F> {
    /// Scales the value by `2^n` by shifting the stored bits; the radix
    /// point stays put.
    #[inline]
    fn shl_in_place(&mut self, n: u32) {
        self.0 = self.0.shl_bits(n);
    }

    /// Divides by `2^n`, truncating the shifted-out bits toward negative
    /// infinity.
    #[inline]
    fn shr_in_place(&mut self, n: u32) {
        self.0 = self.0.shr_bits(n);
    }
}

crate::impl_synthesized_operators!([B: Storage, const I: u32, const F: u32] FixedPoint<B, I, F>);

// ============================================================================
// Trait Implementations
// ============================================================================

impl<B: Storage, const I: u32, const F: u32> Default for FixedPoint<B, I, F> {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl<B: Storage, const I: u32, const F: u32> Hash for FixedPoint<B, I, F> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<B: Storage, const I: u32, const F: u32> Sum for FixedPoint<B, I, F> {
    fn sum<It: Iterator<Item = Self>>(iter: It) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<B: Storage, const I: u32, const F: u32> From<f64> for FixedPoint<B, I, F> {
    #[inline]
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl<B: Storage, const I: u32, const F: u32> From<f32> for FixedPoint<B, I, F> {
    #[inline]
    fn from(value: f32) -> Self {
        Self::from_f32(value)
    }
}

impl<B: Storage, const I: u32, const F: u32> From<FixedPoint<B, I, F>> for f64 {
    #[inline]
    fn from(value: FixedPoint<B, I, F>) -> Self {
        value.to_f64()
    }
}

impl<B: Storage, const I: u32, const F: u32> From<FixedPoint<B, I, F>> for f32 {
    #[inline]
    fn from(value: FixedPoint<B, I, F>) -> Self {
        value.to_f32()
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl<B: Storage, const I: u32, const F: u32> fmt::Debug for FixedPoint<B, I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FixedPoint<{}, {}, {}>({}, raw={})",
            std::any::type_name::<B>(),
            I,
            F,
            self,
            self.0
        )
    }
}

impl<B: Storage, const I: u32, const F: u32> fmt::Display for FixedPoint<B, I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

// ============================================================================
// Conversion from rust_decimal (float-free)
// ============================================================================

impl<B: Storage, const I: u32, const F: u32> FixedPoint<B, I, F> {
    fn decimal_scale() -> FixedPointResult<Decimal> {
        Decimal::try_from_i128_with_scale(1i128 << F, 0).map_err(|_| FixedPointError::OutOfRange)
    }

    /// Convert from `rust_decimal::Decimal` without touching floating point,
    /// rounding half away from zero.
    ///
    /// # Errors
    /// - `Overflow` if scaling exceeds the decimal range
    /// - `OutOfRange` if the rounded value does not fit the storage
    pub fn from_decimal(d: Decimal) -> FixedPointResult<Self> {
        let scaled = d
            .checked_mul(Self::decimal_scale()?)
            .ok_or(FixedPointError::Overflow)?;

        scaled
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i128()
            .and_then(B::try_from_i128)
            .map(Self::from_raw)
            .ok_or(FixedPointError::OutOfRange)
    }

    /// Convert to `rust_decimal::Decimal`.
    ///
    /// Exact whenever `raw / 2^F` fits in 28 decimal digits.
    ///
    /// # Errors
    /// Returns `OutOfRange` if `2^F` exceeds the decimal range.
    pub fn to_decimal(self) -> FixedPointResult<Decimal> {
        let raw = Decimal::from_i128_with_scale(self.0.to_i128(), 0);
        raw.checked_div(Self::decimal_scale()?)
            .ok_or(FixedPointError::OutOfRange)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl<B: Storage, const I: u32, const F: u32> std::str::FromStr for FixedPoint<B, I, F> {
    type Err = FixedPointError;

    /// Parse a decimal literal such as `"3.75"` or `"-0.125"`, rounding
    /// half away from zero to the nearest representable value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let d = s
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(s))
            .map_err(|_| {
                tracing::debug!(input = s, "rejected unparsable fixed-point literal");
                FixedPointError::InvalidInput
            })?;

        Self::from_decimal(d)
    }
}

// ============================================================================
// Type Aliases for Common Layouts
// ============================================================================

/// Signed 8.8 layout on `i16`
pub type Q8_8 = FixedPoint<i16, 8, 8>;

/// Signed 16.16 layout on `i32`
pub type Q16_16 = FixedPoint<i32, 16, 16>;

/// Signed 32.32 layout on `i64`
pub type Q32_32 = FixedPoint<i64, 32, 32>;

/// Unsigned 8.8 layout on `u16`
pub type UQ8_8 = FixedPoint<u16, 8, 8>;

/// Unsigned 16.16 layout on `u32`
pub type UQ16_16 = FixedPoint<u32, 16, 16>;

/// Names a [`FixedPoint`] type, defaulting the fractional bits to whatever
/// the storage has left after the integer bits.
///
/// ```
/// use fixed_point::fixed;
/// use fixed_point::numeric::Q8_8;
///
/// let x: fixed!(i16, 8) = Q8_8::from_f64(1.5);
/// assert_eq!(x.raw(), 384);
/// ```
#[macro_export]
macro_rules! fixed {
    ($b:ty, $i:literal) => {
        $crate::numeric::FixedPoint<$b, $i, { <$b>::BITS - $i }>
    };
    ($b:ty, $i:literal, $f:literal) => {
        $crate::numeric::FixedPoint<$b, $i, $f>
    };
}

// ============================================================================
// Tests
// ============================================================================
