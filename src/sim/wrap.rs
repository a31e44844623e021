//! Horizontal wrapping for finite-width layers
//!
//! Each layer is a cylinder: walking off the right edge puts you on the left.

/// Normalize `x` into `[0, width)`.
///
/// The modulo runs in `f64` (see [`wrap_f64`]), so every `f32` input wraps
/// exactly. A non-positive width leaves `x` untouched.
#[inline]
pub fn wrap(x: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return x;
    }
    let wrapped = wrap_f64(x as f64, width as f64) as f32;
    // Narrowing can round a value just below `width` up to it
    if wrapped >= width { 0.0 } else { wrapped }
}

/// Normalize `x` into `[0, width)` in double precision.
///
/// Uses `rem_euclid`, so negative inputs and magnitudes up to 2^53 resolve
/// exactly and in constant time.
#[inline]
pub fn wrap_f64(x: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return x;
    }
    let wrapped = x.rem_euclid(width);
    // rem_euclid can round up to exactly `width` for tiny negative inputs
    if wrapped >= width { 0.0 } else { wrapped }
}

/// Signed shortest offset from `from` to `to` on the cyclic axis.
///
/// Result lies in `[-width/2, width/2)`.
#[inline]
pub fn wrapped_delta(from: f32, to: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return to - from;
    }
    let d = wrap(to - from, width);
    if d >= width / 2.0 { d - width } else { d }
}

/// Shortest distance between two points on the cyclic axis
#[inline]
pub fn cyclic_distance(x1: f32, x2: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return (x2 - x1).abs();
    }
    let direct = wrap(x2 - x1, width);
    direct.min(width - direct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_literals() {
        assert_eq!(wrap(-1.0, 1000.0), 999.0);
        assert_eq!(wrap(1200.0, 1000.0), 200.0);
        assert_eq!(wrap(2500.0, 1000.0), 500.0);
        assert_eq!(wrap(500.0, 500.0), 0.0);
        assert_eq!(wrap(0.0, 500.0), 0.0);
    }

    #[test]
    fn test_wrap_huge_magnitude() {
        // Largest integer with an exact f64 representation
        let max_safe = 9_007_199_254_740_991.0_f64;
        assert_eq!(wrap_f64(max_safe, 1000.0), 991.0);
        assert_eq!(wrap_f64(-max_safe, 1000.0), 9.0);
        assert_eq!(wrap_f64(16_777_217.0, 1000.0), 217.0);

        // 2^24 is exact in f32; its neighbours above are even integers
        assert_eq!(wrap(16_777_216.0, 1000.0), 216.0);
        assert_eq!(wrap(16_777_218.0, 1000.0), 218.0);
        assert_eq!(wrap(-16_777_216.0, 1000.0), 784.0);
    }

    #[test]
    fn test_wrap_tiny_negative_stays_below_width() {
        let w = wrap(-1.0e-9, 1000.0);
        assert!((0.0..1000.0).contains(&w));
        assert_eq!(wrap_f64(-1.0e-20, 1000.0), 0.0);
    }

    #[test]
    fn test_cyclic_distance_takes_short_way() {
        assert_eq!(cyclic_distance(10.0, 990.0, 1000.0), 20.0);
        assert_eq!(cyclic_distance(990.0, 10.0, 1000.0), 20.0);
        assert_eq!(cyclic_distance(100.0, 300.0, 1000.0), 200.0);
    }

    #[test]
    fn test_wrapped_delta_sign() {
        assert_eq!(wrapped_delta(990.0, 10.0, 1000.0), 20.0);
        assert_eq!(wrapped_delta(10.0, 990.0, 1000.0), -20.0);
        assert_eq!(wrapped_delta(100.0, 150.0, 1000.0), 50.0);
    }

    proptest! {
        #[test]
        fn prop_wrap_f64_matches_integer_modulo(
            x in -9_007_199_254_740_991i64..=9_007_199_254_740_991i64,
            width in 1i64..100_000,
        ) {
            let once = wrap_f64(x as f64, width as f64);
            prop_assert_eq!(once, x.rem_euclid(width) as f64);
            prop_assert_eq!(wrap_f64(once, width as f64), once);
        }

        #[test]
        fn prop_wrap_in_range_and_idempotent(x in -2_000_000_000i64..2_000_000_000i64, width in 1i64..100_000) {
            // Compare against the integer the f32 input actually holds
            let xf = x as f32;
            let once = wrap(xf, width as f32);
            prop_assert!(once >= 0.0 && once < width as f32);
            prop_assert_eq!(once, (xf as i64).rem_euclid(width) as f32);
            prop_assert_eq!(wrap(once, width as f32), once);
        }

        #[test]
        fn prop_cyclic_distance_at_most_half_width(a in 0.0f32..5000.0, b in 0.0f32..5000.0, width in 1.0f32..5000.0) {
            let d = cyclic_distance(a, b, width);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= width / 2.0 + 1e-3);
        }
    }
}
