//! Core trait definitions.
//!
//! The trellis recursion never touches a native float sum. Every value it
//! stores or propagates comes out of an [`Adder`], which takes two raw
//! binary32 words and returns the raw word of their sum. Swapping the adder
//! is how the oracle is re-targeted at a different rounding model.

/// Binary32 addition over raw bit patterns.
///
/// Implementations must round to nearest, ties to even, and return the IEEE
/// result pattern as-is for overflow, underflow, infinities and NaN: nothing
/// is ever raised.
///
/// Semantics the decoder relies on:
/// - `add` is a pure function of its two operands.
/// - `add(NEG_INF, finite) == NEG_INF` and `add(NEG_INF, NEG_INF) == NEG_INF`.
/// - Multi-term sums are always evaluated left to right, one binary step at a
///   time, by the caller. An adder must not fuse or reorder.
pub trait Adder: Sync {
    /// Short label used in logs and bench ids.
    fn name(&self) -> &'static str;

    /// Sum of `a` and `b`, both given and returned as raw words.
    fn add(&self, a: u32, b: u32) -> u32;
}

impl<A: Adder + ?Sized> Adder for &A {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn add(&self, a: u32, b: u32) -> u32 {
        (**self).add(a, b)
    }
}
