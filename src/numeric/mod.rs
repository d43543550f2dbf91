// ============================================================================
// Numeric Module
// Integer-only binary fixed-point arithmetic
// ============================================================================
//
// This module provides:
// - FixedPoint<B, I, F>: fixed-point value over integer storage B
// - Storage / SignedStorage: the integer kinds that can back a value
// - OrderedField / UnitSteppable / Shiftable: operator synthesis traits
// - FixedPointError: error types for the checked API
// - Q8_8, Q16_16, ... type aliases for common layouts
//
// Design principles:
// - No floating-point operations after construction
// - Operators wrap like the storage integer; checked_* methods return Result
// - Compile-time layout via const generics, validated on first use

mod errors;
mod fixed_point;
mod operators;
mod storage;

pub use errors::{FixedPointError, FixedPointResult};
pub use fixed_point::{FixedPoint, Q16_16, Q32_32, Q8_8, UQ16_16, UQ8_8};
pub use operators::{OrderedField, Shiftable, UnitSteppable};
pub use storage::{SignedStorage, Storage};
