//! Bit/float codec for IEEE-754 binary32 words.
//!
//! Pure reinterpretation: no numeric conversion happens in either direction,
//! so every one of the 2^32 patterns survives a round trip, NaN payloads
//! included.

/// Raw pattern of `-∞`; the seed value of every running maximum.
pub const NEG_INF_BITS: u32 = 0xFF80_0000;
/// Raw pattern of `+∞`.
pub const POS_INF_BITS: u32 = 0x7F80_0000;
/// Sign bit.
pub const SIGN_MASK: u32 = 0x8000_0000;
/// Biased exponent field.
pub const EXP_MASK: u32 = 0x7F80_0000;
/// Stored fraction field (without the implicit leading one).
pub const FRAC_MASK: u32 = 0x007F_FFFF;

/// Reinterpret a raw word as a binary32 value.
#[inline]
pub fn bits_to_float(bits: u32) -> f32 {
    f32::from_bits(bits)
}

/// Reinterpret a binary32 value as its raw word.
#[inline]
pub fn float_to_bits(value: f32) -> u32 {
    value.to_bits()
}

/// True when `bits` encodes a NaN of either sign or kind.
#[inline]
pub fn is_nan_bits(bits: u32) -> bool {
    bits & EXP_MASK == EXP_MASK && bits & FRAC_MASK != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_values_round_trip() {
        for bits in [
            0x0000_0000,
            0x8000_0000,
            0x0000_0001,
            0x807F_FFFF,
            NEG_INF_BITS,
            POS_INF_BITS,
            0x7FC0_0000,
            0xFFC0_0001,
            0x7F80_0001,
            0xFFFF_FFFF,
        ] {
            assert_eq!(float_to_bits(bits_to_float(bits)), bits, "{bits:08x}");
        }
    }

    #[test]
    fn decodes_known_values() {
        assert_eq!(bits_to_float(0x3F80_0000), 1.0);
        assert_eq!(bits_to_float(0xC098_0000), -4.75);
        assert_eq!(bits_to_float(NEG_INF_BITS), f32::NEG_INFINITY);
        assert!(bits_to_float(0x7FC0_0000).is_nan());
    }

    #[test]
    fn nan_detection() {
        assert!(is_nan_bits(0x7FC0_0000));
        assert!(is_nan_bits(0xFF80_0001));
        assert!(is_nan_bits(0xFFFF_FFFF));
        assert!(!is_nan_bits(NEG_INF_BITS));
        assert!(!is_nan_bits(0x0000_0000));
    }
}
