//! Integer-only binary32 adder.
//!
//! Models the datapath of a hardware floating adder: unpack both operands,
//! align the smaller significand with guard, round and sticky bits, add or
//! subtract magnitudes, renormalise, then round to nearest even. Subnormals
//! are handled gradually and overflow saturates to an infinity.
//!
//! NaN results are always quiet. Payload selection follows the usual x86
//! convention (first NaN operand wins), which the native path does not
//! promise, so NaN results are only comparable as "is a NaN".

use crate::bits::{is_nan_bits, EXP_MASK, FRAC_MASK, POS_INF_BITS, SIGN_MASK};
use crate::traits::Adder;

const HIDDEN: u32 = 1 << 23;
const QUIET: u32 = 1 << 22;
const DEFAULT_NAN: u32 = 0x7FC0_0000;
// guard, round, sticky
const GRS: u32 = 3;

/// Adder that never touches the platform's float unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SoftAdder;

impl Adder for SoftAdder {
    fn name(&self) -> &'static str {
        "soft"
    }

    #[inline]
    fn add(&self, a: u32, b: u32) -> u32 {
        soft_add(a, b)
    }
}

/// Round-to-nearest-even binary32 addition on raw words.
pub fn soft_add(a: u32, b: u32) -> u32 {
    if is_nan_bits(a) {
        return a | QUIET;
    }
    if is_nan_bits(b) {
        return b | QUIET;
    }

    let mag_a = a & !SIGN_MASK;
    let mag_b = b & !SIGN_MASK;
    let opposite = (a ^ b) & SIGN_MASK != 0;

    if mag_a == POS_INF_BITS {
        if mag_b == POS_INF_BITS && opposite {
            return DEFAULT_NAN;
        }
        return a;
    }
    if mag_b == POS_INF_BITS {
        return b;
    }
    if mag_a == 0 && mag_b == 0 {
        // -0 survives only when both operands are -0
        return a & b;
    }
    if mag_a == 0 {
        return b;
    }
    if mag_b == 0 {
        return a;
    }

    // For non-NaN words the raw magnitude order is the numeric order.
    let (big, small) = if mag_a >= mag_b { (a, b) } else { (b, a) };
    let sign = big & SIGN_MASK;
    let (mut exp, sig_big) = unpack(big);
    let (exp_small, sig_small) = unpack(small);

    let big_m = sig_big << GRS;
    let small_m = shift_right_sticky(sig_small << GRS, exp - exp_small);

    let mut m;
    if opposite {
        m = big_m - small_m;
        if m == 0 {
            return 0;
        }
        while m < HIDDEN << GRS && exp > 1 {
            m <<= 1;
            exp -= 1;
        }
    } else {
        m = big_m + small_m;
        if m >= HIDDEN << (GRS + 1) {
            m = (m >> 1) | (m & 1);
            exp += 1;
        }
    }

    round_pack(sign, exp, m)
}

/// Split a finite, non-zero word into (effective exponent, significand).
///
/// Subnormals get exponent 1 and no hidden bit, so both classes align the
/// same way.
#[inline]
fn unpack(bits: u32) -> (u32, u32) {
    let exp = (bits & EXP_MASK) >> 23;
    let frac = bits & FRAC_MASK;
    if exp == 0 {
        (1, frac)
    } else {
        (exp, frac | HIDDEN)
    }
}

#[inline]
fn shift_right_sticky(m: u32, shift: u32) -> u32 {
    match shift {
        0 => m,
        s if s >= 32 => u32::from(m != 0),
        s => (m >> s) | u32::from(m & ((1 << s) - 1) != 0),
    }
}

fn round_pack(sign: u32, mut exp: u32, m: u32) -> u32 {
    let tail = m & ((1 << GRS) - 1);
    let half = 1 << (GRS - 1);
    let mut sig = m >> GRS;
    if tail > half || (tail == half && sig & 1 == 1) {
        sig += 1;
    }
    if sig == HIDDEN << 1 {
        sig >>= 1;
        exp += 1;
    }
    if exp >= 0xFF {
        return sign | POS_INF_BITS;
    }
    if sig & HIDDEN == 0 {
        // still subnormal; exp is pinned at 1 here
        return sign | sig;
    }
    sign | (exp << 23) | (sig & FRAC_MASK)
}
