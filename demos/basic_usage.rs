// ============================================================================
// Basic Usage Demo
// Run with: cargo run --example basic_usage --features logging
// ============================================================================

use fixed_point::prelude::*;
use tracing::info;

/// Exponential moving average, the kind of filter that runs on FPU-less
/// microcontrollers.
fn smooth(samples: &[f64], alpha: Q16_16) -> Vec<Q16_16> {
    let mut state = Q16_16::ZERO;
    samples
        .iter()
        .map(|&s| {
            state += alpha * (Q16_16::from_f64(s) - state);
            state
        })
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    info!("=== Fixed-Point Demo ===");

    // Q8.8 on i16: 8 integer bits (sign included), 8 fractional bits
    let x = Q8_8::from_f64(3.75);
    let y = x + Q8_8::from_f64(1.25);
    info!(raw = x.raw(), value = %x, "constructed");
    info!(raw = y.raw(), value = %y, "after addition");

    let mut step = Q8_8::from_f64(1.0);
    let before = step.post_increment();
    info!(before = %before, after = %step, "unit step");

    let scaled = x << 2;
    info!(value = %scaled, "shifted left by two");

    // Fractional bits defaulted from the storage width
    let z: fixed!(u16, 4) = FixedPoint::from_f64(9.0625);
    info!(value = %z, raw = z.raw(), "UQ4.12");

    // Wrapping vs checked arithmetic
    let big = Q8_8::from_f64(100.0);
    info!(wrapped = %(big * big), "wrapping multiplication");
    match big.checked_mul(big) {
        Ok(v) => info!(value = %v, "checked multiplication"),
        Err(err) => info!(%err, "checked multiplication rejected"),
    }

    // Out-of-range construction logs at trace level and wraps
    let wrapped = Q8_8::from_f64(200.0);
    info!(value = %wrapped, "200.0 in Q8.8");

    let samples = [1.0, 1.0, 4.0, 4.0, 4.0, 0.0, 0.0];
    let filtered = smooth(&samples, Q16_16::from_f64(0.25));
    for (s, f) in samples.iter().zip(&filtered) {
        info!(sample = s, filtered = %f, "ema");
    }

    match "12.3456".parse::<Q16_16>() {
        Ok(v) => info!(value = %v, debug = ?v, "parsed"),
        Err(err) => info!(%err, "parse failed"),
    }
}
