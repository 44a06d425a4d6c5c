// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Approximate float comparison over IEEE-754 bit patterns.

/// Two values closer than this many representable doubles compare equal.
const MAX_ULPS: i64 = 16;

/// Returns `true` if `v` is within [`MAX_ULPS`] representable values of zero.
///
/// A cheaper special case of [`almost_equals`]. `NaN` and infinities are
/// never almost zero.
pub fn almost_zero(v: f64) -> bool {
    if v == 0.0 {
        return true;
    }
    if v.is_nan() || v.is_infinite() {
        return false;
    }
    let mut bits = v.to_bits() as i64;
    if bits < 0 {
        // Map sign-magnitude to distance from zero.
        bits = bits.wrapping_sub(i64::MIN);
    }
    bits < MAX_ULPS
}

/// Returns `true` if `v1` and `v2` are within [`MAX_ULPS`] representable
/// values of each other.
///
/// Infinities compare equal only to themselves; `NaN` to nothing, itself
/// included.
pub fn almost_equals(v1: f64, v2: f64) -> bool {
    if v1 == v2 {
        return true;
    }
    if v1.is_nan() || v2.is_nan() || v1.is_infinite() || v2.is_infinite() {
        return false;
    }
    sign_magnitude(v1)
        .wrapping_sub(sign_magnitude(v2))
        .wrapping_abs()
        < MAX_ULPS
}

/// Reorders the bit patterns of doubles so that adjacent values differ by
/// one, negative values below positive ones.
fn sign_magnitude(v: f64) -> i64 {
    let bits = v.to_bits() as i64;
    if bits < 0 {
        i64::MIN.wrapping_sub(bits)
    } else {
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn almost_zero_near_zero() {
        assert!(almost_zero(0.0));
        assert!(almost_zero(-0.0));
        assert!(almost_zero(f64::from_bits(1)), "smallest denormal");
        assert!(almost_zero(f64::from_bits(15)));
        assert!(!almost_zero(f64::from_bits(16)));
        assert!(
            almost_zero(f64::from_bits(0x8000_0000_0000_0001)),
            "negative denormal"
        );
        assert!(almost_zero(f64::from_bits(0x8000_0000_0000_0002)));
        assert!(!almost_zero(f64::NAN));
        assert!(!almost_zero(f64::INFINITY));
        assert!(!almost_zero(1e-300));
    }

    #[test]
    fn almost_equals_basics() {
        assert!(almost_equals(0.0, 0.0));
        assert!(almost_equals(f64::INFINITY, f64::INFINITY));
        assert!(almost_equals(f64::NEG_INFINITY, f64::NEG_INFINITY));
        assert!(!almost_equals(f64::INFINITY, f64::NEG_INFINITY));
        assert!(!almost_equals(f64::NAN, f64::NAN));
    }

    #[test]
    fn almost_equals_across_zero() {
        let denormal = f64::from_bits(1);
        assert!(almost_equals(0.0, denormal));
        assert!(almost_equals(0.0, -denormal));
        assert!(
            !almost_equals(f64::MIN_POSITIVE, denormal),
            "smallest normal is far from the smallest denormal"
        );
    }

    #[test]
    fn almost_equals_adjacent_values() {
        let bits: u64 = 12_345_678;
        assert!(almost_equals(f64::from_bits(bits), f64::from_bits(bits + 1)));

        let bits = (-100.0_f64).to_bits();
        assert!(almost_equals(f64::from_bits(bits), f64::from_bits(bits + 1)));

        assert!(!almost_equals(1.0, 1.0 + 1e-10));
        assert!(almost_equals(1.0, 1.0 + f64::EPSILON));
    }
}
