//! HMM parameters in the hardware's flat word layout.
//!
//! `A` holds the `N` initial log-probabilities followed by the `N×N`
//! transition table in row-major (`from`, `to`) order. `B` holds the `N×M`
//! emission table in row-major (`state`, `symbol`) order. Symbols arrive
//! 1-indexed and are shifted down on lookup.
//!
//! Table lengths are not checked against `N` and `M` up front. A short table
//! surfaces as an [`OracleError::Index`] at the first lookup that runs off its
//! end, which is the point where the hardware reference fails too.

use crate::error::{lookup, OracleError, Result};

/// Hidden Markov Model with every probability kept as a raw binary32 word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HmmModel {
    /// Number of hidden states `N`.
    pub n_states: usize,
    /// Number of observation symbols `M`.
    pub n_symbols: usize,
    /// Initial row then transition table, `N + N*N` words.
    pub a: Vec<u32>,
    /// Emission table, `N*M` words.
    pub b: Vec<u32>,
}

impl HmmModel {
    pub fn new(n_states: usize, n_symbols: usize, a: Vec<u32>, b: Vec<u32>) -> Self {
        let model = Self {
            n_states,
            n_symbols,
            a,
            b,
        };
        #[cfg(feature = "tracing")]
        model.warn_on_shape();
        model
    }

    /// Build from the raw contents of the dimension, transition and emission
    /// files. The first two dimension words are `N` and `M`.
    pub fn from_words(dims: &[u32], a: Vec<u32>, b: Vec<u32>) -> Result<Self> {
        let n = lookup(dims, "dims", 0)? as usize;
        let m = lookup(dims, "dims", 1)? as usize;
        #[cfg(feature = "tracing")]
        tracing::info!(states = n, symbols = m, "model dimensions");
        Ok(Self::new(n, m, a, b))
    }

    /// `log π[j]`
    #[inline]
    pub fn initial(&self, state: usize) -> Result<u32> {
        lookup(&self.a, "A", state)
    }

    /// `log a[from][to]`
    #[inline]
    pub fn transition(&self, from: usize, to: usize) -> Result<u32> {
        let index = from
            .checked_mul(self.n_states)
            .and_then(|row| row.checked_add(self.n_states))
            .and_then(|row| row.checked_add(to))
            .ok_or(OracleError::Index {
                what: "A",
                index: usize::MAX,
                len: self.a.len(),
            })?;
        lookup(&self.a, "A", index)
    }

    /// `log b[state][symbol - 1]` for a 1-indexed `symbol`.
    #[inline]
    pub fn emission(&self, state: usize, symbol: u32) -> Result<u32> {
        let index = (symbol as usize)
            .checked_sub(1)
            .and_then(|k| state.checked_mul(self.n_symbols)?.checked_add(k))
            .ok_or(OracleError::Index {
                what: "B",
                index: usize::MAX,
                len: self.b.len(),
            })?;
        lookup(&self.b, "B", index)
    }

    #[cfg(feature = "tracing")]
    fn warn_on_shape(&self) {
        let n = self.n_states;
        let expect_a = n.saturating_mul(n).saturating_add(n);
        let expect_b = n.saturating_mul(self.n_symbols);
        if self.a.len() != expect_a {
            tracing::warn!(
                expected = expect_a,
                actual = self.a.len(),
                "transition table length disagrees with N"
            );
        }
        if self.b.len() != expect_b {
            tracing::warn!(
                expected = expect_b,
                actual = self.b.len(),
                "emission table length disagrees with N and M"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_three() -> HmmModel {
        // A: pi0 pi1 | a00 a01 a10 a11 ; B: b00 b01 b02 b10 b11 b12
        HmmModel::new(2, 3, (10..16).collect(), (20..26).collect())
    }

    #[test]
    fn flat_layout() {
        let m = two_by_three();
        assert_eq!(m.initial(0).unwrap(), 10);
        assert_eq!(m.initial(1).unwrap(), 11);
        assert_eq!(m.transition(0, 0).unwrap(), 12);
        assert_eq!(m.transition(0, 1).unwrap(), 13);
        assert_eq!(m.transition(1, 0).unwrap(), 14);
        assert_eq!(m.transition(1, 1).unwrap(), 15);
        assert_eq!(m.emission(0, 1).unwrap(), 20);
        assert_eq!(m.emission(0, 3).unwrap(), 22);
        assert_eq!(m.emission(1, 1).unwrap(), 23);
        assert_eq!(m.emission(1, 3).unwrap(), 25);
    }

    #[test]
    fn bounds_follow_flat_index_only() {
        let m = two_by_three();
        // symbol 4 from state 0 lands on b[1][0], as a flat table would
        assert_eq!(m.emission(0, 4).unwrap(), 23);
        assert!(matches!(
            m.emission(1, 4),
            Err(OracleError::Index { what: "B", index: 6, len: 6 })
        ));
        assert!(matches!(
            m.transition(2, 0),
            Err(OracleError::Index { what: "A", .. })
        ));
        assert!(m.emission(0, 0).is_err());
    }

    #[test]
    fn dims_need_two_words() {
        assert!(HmmModel::from_words(&[2], vec![], vec![]).is_err());
        let m = HmmModel::from_words(&[2, 3, 99], vec![], vec![]).unwrap();
        assert_eq!((m.n_states, m.n_symbols), (2, 3));
    }
}
