//! Bit-exact software oracle for a hardware HMM Viterbi decoder.
//!
//! The crate reads the same hex stimulus files a hardware decoder is driven
//! with, replays the trellis computation with the hardware's binary32
//! rounding discipline, and writes the decoded paths in the hardware's own
//! dump format so the two can be diffed line for line.
//!
//! ## Core idea
//! 1. Every probability is a raw 32-bit word from the moment it is read to
//!    the moment it is written.
//! 2. All arithmetic goes through an [`Adder`]: binary32 addition, round to
//!    nearest even, one binary step at a time, never fused or reordered.
//! 3. Native floats are only ever decoded to be compared with `>`.
//!
//! ## Quick start
//! ```
//! use viterbi_oracle::{HmmModel, OracleEngine};
//!
//! let w = |x: f32| x.to_bits();
//! // 2 states, 2 symbols: initial row, then the 2x2 transition table
//! let a = vec![w(-1.0), w(-2.0), w(-0.5), w(-1.5), w(-2.0), w(-0.25)];
//! let b = vec![w(-0.5), w(-3.0), w(-2.5), w(-0.75)];
//! let engine = OracleEngine::new(HmmModel::new(2, 2, a, b));
//!
//! let run = engine.run(&[1, 2, 2, 0xFFFF_FFFF, 0]).unwrap();
//! assert_eq!(run.output.words(), &[1, 2, 2, 0xC098_0000, 0xFFFF_FFFF, 0]);
//! ```
//!
//! ## Layout
//! - [`bits`], [`adder`], [`softfloat`]: the numeric core.
//! - [`hexio`], [`segment`], [`output`]: the file and stream formats.
//! - [`model`], [`viterbi`]: the decoder proper.
//! - [`engine`], [`builder`], [`config`]: wiring a run together.
//! - [`compare`]: line diff used to check a dump against a reference.

pub mod adder;
pub mod bits;
pub mod builder;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod hexio;
pub mod model;
pub mod output;
pub mod segment;
pub mod softfloat;
pub mod traits;
pub mod viterbi;

pub use crate::adder::NativeAdder;
pub use crate::builder::OracleBuilder;
pub use crate::config::OracleConfig;
pub use crate::engine::{OracleEngine, RunOutput, RunStats};
pub use crate::error::{OracleError, Result};
pub use crate::model::HmmModel;
pub use crate::softfloat::SoftAdder;
pub use crate::traits::Adder;
pub use crate::viterbi::{DecodedPath, ViterbiDecoder};
