//! Codec Module - Bit field helpers for packed gesture arguments
//!
//! The platform packs several gesture payloads into a single 64-bit argument.
//! These helpers split that value into its 32-bit and 16-bit halves and
//! convert the encoded rotation angle into radians.
//!
//! # API
//!
//! - `lo_dword`, `hi_dword` - Low/high 32 bits of a 64-bit value
//! - `lo_word`, `hi_word` - Low/high 16 bits of a 32-bit value
//! - `split_words` - Both 16-bit halves as a signed pair
//! - `rotation_angle_from_arg` - Encoded rotation argument to radians
//! - `radians_to_degrees` - Angle conversion for display

use std::f64::consts::PI;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Largest value of the unsigned 16-bit rotation encoding.
pub const ROTATION_MAX_SCALE: i32 = 65535;

// =============================================================================
// WORD SPLITTING
// =============================================================================

/// Low 32 bits of a 64-bit value.
#[inline]
pub fn lo_dword(x: i64) -> i32 {
    (x & 0xFFFF_FFFF) as i32
}

/// High 32 bits of a 64-bit value.
#[inline]
pub fn hi_dword(x: i64) -> i32 {
    ((x >> 32) & 0xFFFF_FFFF) as i32
}

/// Low 16 bits of a 32-bit value, reinterpreted as signed.
#[inline]
pub fn lo_word(x: i32) -> i16 {
    (x & 0xFFFF) as i16
}

/// High 16 bits of a 32-bit value, reinterpreted as signed.
#[inline]
pub fn hi_word(x: i32) -> i16 {
    ((x >> 16) & 0xFFFF) as i16
}

/// Split a 32-bit value into a `(low, high)` signed coordinate pair.
#[inline]
pub fn split_words(x: i32) -> (i16, i16) {
    (lo_word(x), hi_word(x))
}

// =============================================================================
// ANGLES
// =============================================================================

/// Convert an encoded rotation argument to radians.
///
/// The platform stores a signed angle as an unsigned fraction of a doubled
/// range, so `0` maps to `-2π`, `max_scale` maps to `+2π` and the midpoint
/// maps to (roughly) zero.
pub fn rotation_angle_from_arg(arg: i32, max_scale: i32) -> f64 {
    (arg as f64 / max_scale as f64) * 4.0 * PI - 2.0 * PI
}

/// Convert radians to degrees.
#[inline]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-3;

    #[test]
    fn test_dword_split() {
        let x: i64 = 0x1234_5678_9ABC_DEF0;
        assert_eq!(lo_dword(x), 0x9ABC_DEF0_u32 as i32);
        assert_eq!(hi_dword(x), 0x1234_5678);
    }

    #[test]
    fn test_dword_reconstruction() {
        let samples = [
            0_i64,
            -1,
            1,
            i64::MIN,
            i64::MAX,
            0x0000_0001_FFFF_FFFF,
            -0x0000_7FFF_0000_8000,
        ];
        for x in samples {
            let rebuilt = ((hi_dword(x) as i64) << 32) | (lo_dword(x) as i64 & 0xFFFF_FFFF);
            assert_eq!(rebuilt, x, "round trip failed for {x:#x}");
        }
    }

    #[test]
    fn test_word_split_is_signed() {
        let packed = ((-5_i32 as u16 as i32) << 16) | (10_i32 & 0xFFFF);
        assert_eq!(lo_word(packed), 10);
        assert_eq!(hi_word(packed), -5);
        assert_eq!(split_words(packed), (10, -5));
    }

    #[test]
    fn test_rotation_range_endpoints() {
        assert!((rotation_angle_from_arg(0, ROTATION_MAX_SCALE) + 2.0 * PI).abs() < EPSILON);
        assert!(
            (rotation_angle_from_arg(ROTATION_MAX_SCALE, ROTATION_MAX_SCALE) - 2.0 * PI).abs()
                < EPSILON
        );
    }

    #[test]
    fn test_rotation_midpoint() {
        assert!(rotation_angle_from_arg(32767, ROTATION_MAX_SCALE).abs() < EPSILON);
        assert!(rotation_angle_from_arg(32768, ROTATION_MAX_SCALE).abs() < EPSILON);
    }

    #[test]
    fn test_radians_to_degrees() {
        assert!((radians_to_degrees(PI) - 180.0).abs() < 1e-9);
        assert!((radians_to_degrees(-PI / 2.0) + 90.0).abs() < 1e-9);
    }
}
