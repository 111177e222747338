//! Viterbi decoding over raw binary32 words.
//!
//! Every trellis cell is the output of an [`Adder`]; decoded floats appear
//! only on the left and right of a `>` comparison. Sums are formed pairwise
//! and in a fixed order:
//!
//! - `V[0][j]   = add(π[j], b[j][o0])`
//! - `cand      = add(V[t-1][i], a[i][j])`
//! - `V[t][j]   = add(max_i cand, b[j][ot])`
//!
//! Maxima use strict `>`, seeded with `-∞` at index 0, so on exact ties the
//! lowest-indexed candidate is kept and a later equal value never displaces
//! it. NaN candidates never win.

use crate::adder::NativeAdder;
use crate::bits::{bits_to_float, NEG_INF_BITS};
use crate::error::{OracleError, Result};
use crate::model::HmmModel;
use crate::traits::Adder;

/// Result of decoding one observation sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedPath {
    /// 1-indexed state per time step.
    pub states: Vec<u32>,
    /// Log-probability of the best path, as a raw word.
    pub log_prob_bits: u32,
}

impl DecodedPath {
    /// Decoded view of [`Self::log_prob_bits`], for display only.
    pub fn log_prob(&self) -> f32 {
        bits_to_float(self.log_prob_bits)
    }
}

/// Scores and backpointers for one sequence, `T` rows of `N` cells.
///
/// Rows are appended as the recursion completes them; nothing is
/// preallocated from `N`, so a bogus dimension fails on its first table
/// lookup instead of on an allocation.
#[derive(Clone, Debug)]
pub struct Trellis {
    n_states: usize,
    scores: Vec<u32>,
    // rows 1..T; row 0 has no predecessor
    backpointers: Vec<usize>,
}

impl Trellis {
    fn new(n_states: usize) -> Self {
        Self {
            n_states,
            scores: Vec::new(),
            backpointers: Vec::new(),
        }
    }

    /// Number of completed time steps.
    pub fn len(&self) -> usize {
        if self.n_states == 0 {
            0
        } else {
            self.scores.len() / self.n_states
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Score words of time step `t`.
    pub fn row(&self, t: usize) -> &[u32] {
        let n = self.n_states;
        &self.scores[t * n..(t + 1) * n]
    }

    /// Predecessor (0-indexed) that produced `V[t][j]`, for `t >= 1`.
    pub fn backpointer(&self, t: usize, state: usize) -> Result<usize> {
        if state >= self.n_states || t == 0 {
            return Err(OracleError::Index {
                what: "backpointer",
                index: state,
                len: self.n_states,
            });
        }
        let index = (t - 1) * self.n_states + state;
        self.backpointers
            .get(index)
            .copied()
            .ok_or(OracleError::Index {
                what: "backpointer",
                index,
                len: self.backpointers.len(),
            })
    }
}

/// Running maximum over raw words, compared by decoded magnitude.
#[derive(Clone, Copy, Debug)]
struct RunningMax {
    bits: u32,
    index: usize,
}

impl RunningMax {
    fn new() -> Self {
        Self {
            bits: NEG_INF_BITS,
            index: 0,
        }
    }

    #[inline]
    fn offer(&mut self, index: usize, bits: u32) {
        if bits_to_float(bits) > bits_to_float(self.bits) {
            self.bits = bits;
            self.index = index;
        }
    }
}

/// Viterbi decoder parameterised by its addition primitive.
#[derive(Clone, Debug)]
pub struct ViterbiDecoder<A: Adder = NativeAdder> {
    adder: A,
}

impl ViterbiDecoder<NativeAdder> {
    /// Decoder on the platform's binary32 adder.
    pub fn native() -> Self {
        Self::new(NativeAdder)
    }
}

impl Default for ViterbiDecoder<NativeAdder> {
    fn default() -> Self {
        Self::native()
    }
}

impl<A: Adder> ViterbiDecoder<A> {
    pub fn new(adder: A) -> Self {
        Self { adder }
    }

    /// Fill the trellis for `obs` (1-indexed symbols, non-empty).
    pub fn forward(&self, model: &HmmModel, obs: &[u32]) -> Result<Trellis> {
        let n = model.n_states;
        let mut trellis = Trellis::new(n);
        let Some((&first, rest)) = obs.split_first() else {
            return Err(OracleError::Index {
                what: "observations",
                index: 0,
                len: 0,
            });
        };

        for j in 0..n {
            let score = self.adder.add(model.initial(j)?, model.emission(j, first)?);
            trellis.scores.push(score);
        }

        for (step, &symbol) in rest.iter().enumerate() {
            let prev = step * n;
            for j in 0..n {
                let mut best = RunningMax::new();
                for i in 0..n {
                    let cand = self
                        .adder
                        .add(trellis.scores[prev + i], model.transition(i, j)?);
                    best.offer(i, cand);
                }
                let score = self.adder.add(best.bits, model.emission(j, symbol)?);
                trellis.scores.push(score);
                trellis.backpointers.push(best.index);
            }
        }

        Ok(trellis)
    }

    /// Decode the most likely state path for `obs`.
    pub fn decode(&self, model: &HmmModel, obs: &[u32]) -> Result<DecodedPath> {
        let trellis = self.forward(model, obs)?;
        let t_len = obs.len();
        let last = t_len - 1;

        let mut best = RunningMax::new();
        if !trellis.is_empty() {
            for (j, &bits) in trellis.row(last).iter().enumerate() {
                best.offer(j, bits);
            }
        }

        let mut states = vec![0u32; t_len];
        states[last] = best.index as u32 + 1;
        for t in (0..last).rev() {
            let next = states[t + 1] as usize - 1;
            states[t] = trellis.backpointer(t + 1, next)? as u32 + 1;
        }

        Ok(DecodedPath {
            states,
            log_prob_bits: best.bits,
        })
    }
}
