//! The bit-exact adder.
//!
//! Rust's `f32` addition is IEEE-754 binary32 with round-to-nearest,
//! ties-to-even on every supported target, and never traps. That is exactly
//! the contract the hardware's floating adder follows, so the native path is
//! the default. [`crate::softfloat::SoftAdder`] implements the same operation
//! on integer fields and is held to bit-equality with this one.

use crate::bits::{bits_to_float, float_to_bits};
use crate::traits::Adder;

/// Adder backed by the platform's binary32 unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NativeAdder;

impl Adder for NativeAdder {
    fn name(&self) -> &'static str {
        "native"
    }

    #[inline]
    fn add(&self, a: u32, b: u32) -> u32 {
        add(a, b)
    }
}

/// Add two binary32 words and return the raw word of the sum.
#[inline]
pub fn add(a_bits: u32, b_bits: u32) -> u32 {
    float_to_bits(bits_to_float(a_bits) + bits_to_float(b_bits))
}
