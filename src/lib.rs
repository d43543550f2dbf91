// ============================================================================
// Fixed-Point Library
// Integer-only numbers that stand in for native floating-point types
// ============================================================================

//! # Fixed Point
//!
//! A binary fixed-point number type for targets without a floating-point
//! unit, or where bit-exact integer arithmetic matters (hardware synthesis,
//! deterministic simulation).
//!
//! ## Features
//!
//! - **Compile-time layout**: storage kind, integer bits and fractional bits
//!   are type parameters
//! - **Integer-only arithmetic** after construction
//! - **Full operator surface** synthesized from a handful of primitives
//! - **Wrapping operators** that mirror the storage integer, plus a checked API
//!
//! ## Example
//!
//! ```rust
//! use fixed_point::prelude::*;
//!
//! let mut x = Q8_8::from_f64(3.75);
//! assert_eq!(x.raw(), 960);
//!
//! x += Q8_8::from_f64(1.25);
//! assert_eq!(x.to_f64(), 5.0);
//!
//! let product = x * Q8_8::from_f64(0.5);
//! assert_eq!(f64::from(product), 2.5);
//!
//! // `++x` moves to the next representable value
//! let next = x.pre_increment();
//! assert_eq!(next.to_f64(), 5.00390625);
//! ```

pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::fixed;
    pub use crate::numeric::{
        FixedPoint, FixedPointError, FixedPointResult, OrderedField, Shiftable, SignedStorage,
        Storage, UnitSteppable, Q16_16, Q32_32, Q8_8, UQ16_16, UQ8_8,
    };
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;

    /// Horner evaluation of a polynomial, written once for any numeric type.
    fn horner<T>(coefficients: &[T], x: T) -> T
    where
        T: Copy + std::ops::Add<Output = T> + std::ops::Mul<Output = T> + Default,
    {
        coefficients
            .iter()
            .rev()
            .fold(T::default(), |acc, &c| acc * x + c)
    }

    #[test]
    fn test_drop_in_for_f64() {
        let coefficients = [0.5, -1.25, 0.75, 2.0];
        let x = 1.5;

        let expected = horner(&coefficients, x);

        let fixed: Vec<Q16_16> = coefficients.iter().copied().map(Q16_16::from).collect();
        let actual = horner(&fixed, Q16_16::from(x));

        assert!((actual.to_f64() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_concrete_layout_scenario() {
        let x = Q8_8::from_f64(3.75);
        let y = x + Q8_8::from_f64(1.25);

        assert_eq!(x.raw(), 960);
        assert_eq!(y.raw(), 1280);
        assert_eq!(f64::from(y), 5.0);
        assert_eq!(Q8_8::from_f64(-3.75).raw(), -960);

        let mut a = Q8_8::from_f64(1.0);
        a.post_increment();
        assert_eq!(a.to_f64(), 1.00390625);
    }

    #[test]
    fn test_distinct_instances_across_threads() {
        let values: Vec<Q16_16> = (0..8).map(|i| Q16_16::from_f64(i as f64 * 0.25)).collect();

        let doubled: Vec<Q16_16> = std::thread::scope(|scope| {
            let handles: Vec<_> = values
                .iter()
                .map(|&v| scope.spawn(move || v << 1))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (v, d) in values.iter().zip(&doubled) {
            assert_eq!(d.to_f64(), v.to_f64() * 2.0);
        }
    }
}
