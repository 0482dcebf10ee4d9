//! Conversions between the compact difficulty encoding, the 256-bit
//! proof-of-work target and the floating point difficulty.
//!
//! The compact form packs a target as `mantissa * 256^(exponent - 3)` with the
//! exponent in the top byte and a 24-bit mantissa below it.

/// A 256-bit unsigned integer in big-endian byte order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target(pub [u8; 32]);

/// The compact form of [`BLOCK_TARGET_MAX`], i.e. difficulty 1.
pub const BLOCK_TARGET_MAX_COMPACT: u32 = 0x1f00_ffff;

/// The easiest permitted target.
pub const BLOCK_TARGET_MAX: Target = compact_to_target(BLOCK_TARGET_MAX_COMPACT);

/// Expand a compact target.
pub const fn compact_to_target(compact: u32) -> Target {
    let exponent = (compact >> 24) as isize;
    let mantissa = (compact & 0x00ff_ffff).to_be_bytes();
    let mut bytes = [0u8; 32];
    // `mantissa[0]` is always zero; the three low bytes land at positions
    // `32 - exponent ..= 34 - exponent`, dropping anything outside the 32 bytes.
    let mut i = 0;
    while i < 3 {
        let pos = 32 - exponent + i as isize;
        if pos >= 0 && pos < 32 {
            bytes[pos as usize] = mantissa[i + 1];
        }
        i += 1;
    }
    Target(bytes)
}

/// Compress a target, truncating it to its three most significant bytes.
pub fn target_to_compact(target: &Target) -> u32 {
    let Some(first) = target.0.iter().position(|&b| b != 0) else {
        return 0;
    };
    let byte_at = |i: usize| u32::from(target.0.get(i).copied().unwrap_or(0));
    let mut size = (32 - first) as u32;
    let mut mantissa = byte_at(first) << 16 | byte_at(first + 1) << 8 | byte_at(first + 2);
    // The top mantissa bit is reserved as a sign bit in the compact form.
    if mantissa & 0x0080_0000 != 0 {
        mantissa >>= 8;
        size += 1;
    }
    size << 24 | mantissa
}

/// The target as a float. Exact for every target a compact value expands to.
pub fn target_to_f64(target: &Target) -> f64 {
    target
        .0
        .iter()
        .fold(0.0, |acc, &byte| acc * 256.0 + f64::from(byte))
}

/// Convert a float to a target, discarding any fractional part.
///
/// Negative and NaN inputs yield the zero target; inputs beyond the 256-bit
/// range saturate.
pub fn f64_to_target(value: f64) -> Target {
    let mut rest = value.floor();
    if !(rest >= 1.0) {
        return Target::default();
    }
    if rest >= 2f64.powi(256) {
        return Target([0xff; 32]);
    }
    let mut bytes = [0u8; 32];
    for byte in bytes.iter_mut().rev() {
        *byte = (rest % 256.0) as u8;
        rest = (rest / 256.0).floor();
    }
    Target(bytes)
}

/// The difficulty of a target relative to [`BLOCK_TARGET_MAX`].
pub fn target_to_difficulty(target: &Target) -> f64 {
    target_to_f64(&BLOCK_TARGET_MAX) / target_to_f64(target)
}

/// The target of the given difficulty.
pub fn difficulty_to_target(difficulty: f64) -> Target {
    f64_to_target(target_to_f64(&BLOCK_TARGET_MAX) / difficulty)
}

/// The compact target of the given difficulty.
pub fn difficulty_to_compact(difficulty: f64) -> u32 {
    target_to_compact(&difficulty_to_target(difficulty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_target() {
        let mut expected = [0u8; 32];
        expected[2] = 0xff;
        expected[3] = 0xff;
        assert_eq!(BLOCK_TARGET_MAX, Target(expected));
        assert_eq!(target_to_compact(&BLOCK_TARGET_MAX), BLOCK_TARGET_MAX_COMPACT);
    }

    #[test]
    fn difficulty_one_is_max_target() {
        assert_eq!(difficulty_to_compact(1.0), BLOCK_TARGET_MAX_COMPACT);
        assert_eq!(target_to_difficulty(&BLOCK_TARGET_MAX), 1.0);
    }

    #[test]
    fn compact_round_trip() {
        for compact in [0x1d2f_6bb1, 0x1f00_ffff, 0x1e01_0000, 0x0301_2345, 0x1c7f_ffff] {
            assert_eq!(target_to_compact(&compact_to_target(compact)), compact);
        }
    }

    #[test]
    fn small_exponents_shift_right() {
        let target = compact_to_target(0x0112_3456);
        let mut expected = [0u8; 32];
        expected[31] = 0x12;
        assert_eq!(target, Target(expected));
    }

    #[test]
    fn sign_bit_moves_into_exponent() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x80;
        assert_eq!(target_to_compact(&Target(bytes)), 0x0200_8000);
        assert_eq!(target_to_compact(&Target::default()), 0);
    }

    #[test]
    fn harder_targets_have_higher_difficulty() {
        let difficulty = target_to_difficulty(&compact_to_target(0x1d2f_6bb1));
        let expected = 65535.0 * 65536.0 / f64::from(0x2f_6bb1);
        assert!((difficulty - expected).abs() < 1e-9, "{difficulty}");
        assert!(difficulty > 1.0);
    }

    #[test]
    fn float_conversion_saturates() {
        assert_eq!(f64_to_target(-1.0), Target::default());
        assert_eq!(f64_to_target(f64::NAN), Target::default());
        assert_eq!(f64_to_target(f64::INFINITY), Target([0xff; 32]));
        assert_eq!(target_to_f64(&f64_to_target(1234.9)), 1234.0);
    }
}
