//! Pipeline driver: observation stream in, hardware-format word stream out.
//!
//! A run goes through three phases:
//! 1. segment the observation words ([`Segmenter`]),
//! 2. decode every completed sequence ([`ViterbiDecoder`]), sequentially or,
//!    with the `parallel` feature, on the rayon pool,
//! 3. encode results in input order into an [`OutputBuffer`].
//!
//! Each sequence gets a fresh trellis; nothing is shared between sequences
//! except the read-only model. The output buffer belongs to the run and is
//! handed back to the caller.

use std::path::Path;

use crate::adder::NativeAdder;
use crate::builder::OracleBuilder;
use crate::config::OracleConfig;
use crate::error::Result;
use crate::hexio;
use crate::model::HmmModel;
use crate::output::OutputBuffer;
use crate::segment::{Segment, Segmenter, StreamEnd};
use crate::traits::Adder;
use crate::viterbi::{DecodedPath, ViterbiDecoder};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Counters describing one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunStats {
    /// Non-empty sequences decoded.
    pub sequences: usize,
    /// Bare `0xFFFF_FFFF` markers passed through.
    pub empty_sequences: usize,
    /// Observations of an open sequence dropped by an explicit terminator.
    pub discarded_observations: usize,
    /// How the observation stream ended.
    pub end: StreamEnd,
}

/// Output words plus counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutput {
    pub output: OutputBuffer,
    pub stats: RunStats,
}

/// Decoding pipeline bound to one model.
///
/// ```
/// use viterbi_oracle::{HmmModel, OracleEngine};
///
/// let w = |x: f32| x.to_bits();
/// let model = HmmModel::new(1, 1, vec![w(-1.0), w(-0.5)], vec![w(-0.25)]);
/// let run = OracleEngine::new(model).run(&[1, 1, 0xFFFF_FFFF, 0]).unwrap();
/// assert_eq!(
///     run.output.words(),
///     &[1, 1, w(-2.0), 0xFFFF_FFFF, 0]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct OracleEngine<A: Adder = NativeAdder> {
    model: HmmModel,
    decoder: ViterbiDecoder<A>,
    #[cfg(feature = "parallel")]
    parallel: bool,
}

impl OracleEngine<NativeAdder> {
    /// Engine with the native adder, single-threaded.
    pub fn new(model: HmmModel) -> Self {
        OracleBuilder::new().build(model)
    }
}

impl<A: Adder> OracleEngine<A> {
    pub(crate) fn from_parts(
        model: HmmModel,
        decoder: ViterbiDecoder<A>,
        #[allow(unused_variables)] parallel: bool,
    ) -> Self {
        Self {
            model,
            decoder,
            #[cfg(feature = "parallel")]
            parallel,
        }
    }

    /// Decode a whole observation stream.
    pub fn run(&self, observations: &[u32]) -> Result<RunOutput> {
        let mut segments = Vec::new();
        let mut end = StreamEnd::Exhausted;
        for segment in Segmenter::new(observations) {
            match segment {
                Segment::End(e) => end = e,
                other => segments.push(other),
            }
        }

        let decoded = self.decode_all(&segments)?;

        let mut output = OutputBuffer::new();
        let mut stats = RunStats {
            sequences: 0,
            empty_sequences: 0,
            discarded_observations: 0,
            end,
        };
        for path in &decoded {
            match path {
                Some(path) => {
                    stats.sequences += 1;
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        sequence = stats.sequences,
                        len = path.states.len(),
                        path = ?path.states,
                        log_prob = %path.log_prob(),
                        bits = %hexio::format_word(path.log_prob_bits),
                        "decoded sequence"
                    );
                    output.push_decoded(path);
                }
                None => {
                    stats.empty_sequences += 1;
                    #[cfg(feature = "tracing")]
                    tracing::debug!("empty sequence");
                    output.push_empty();
                }
            }
        }

        if let StreamEnd::Sentinel { discarded } = end {
            stats.discarded_observations = discarded;
        }
        #[cfg(feature = "tracing")]
        log_stream_end(end);
        output.close();

        Ok(RunOutput { output, stats })
    }

    /// Load the observation file, decode it, and write `output`.
    pub fn run_files(
        &self,
        observations: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<RunStats> {
        let words = hexio::load(observations)?;
        let run = self.run(&words)?;
        run.output.store(output)?;
        Ok(run.stats)
    }

    fn decode_segment(&self, segment: &Segment) -> Result<Option<DecodedPath>> {
        match segment {
            Segment::Sequence(obs) => self.decoder.decode(&self.model, obs).map(Some),
            Segment::Empty | Segment::End(_) => Ok(None),
        }
    }

    fn decode_all(&self, segments: &[Segment]) -> Result<Vec<Option<DecodedPath>>> {
        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                #[cfg(feature = "tracing")]
                let _span =
                    tracing::debug_span!("decode_parallel", segments = segments.len()).entered();
                return segments
                    .par_iter()
                    .map(|segment| self.decode_segment(segment))
                    .collect();
            }
        }
        segments
            .iter()
            .map(|segment| self.decode_segment(segment))
            .collect()
    }
}

#[cfg(feature = "tracing")]
fn log_stream_end(end: StreamEnd) {
    match end {
        StreamEnd::Sentinel { discarded } if discarded > 0 => {
            tracing::info!(discarded, "terminator inside open sequence; partial run dropped");
        }
        StreamEnd::Sentinel { .. } => tracing::info!("explicit end of stream"),
        StreamEnd::Exhausted => tracing::info!("input exhausted without terminator"),
    }
}

/// One complete run as described by `config`, with the native adder.
pub fn run(config: &OracleConfig) -> Result<RunStats> {
    OracleBuilder::new()
        .load(config)?
        .run_files(&config.observations, &config.output)
}

#[cfg(all(test, feature = "tracing"))]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged_run(observations: &[u32]) -> (RunStats, String) {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer({
                let sink = captured.clone();
                move || sink.clone()
            })
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let w = |x: f32| x.to_bits();
        let engine = OracleEngine::new(HmmModel::new(1, 1, vec![w(-1.0), w(-0.5)], vec![w(-0.25)]));
        let run = tracing::subscriber::with_default(subscriber, || engine.run(observations).unwrap());
        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        (run.stats, text)
    }

    #[test]
    fn dropped_partial_sequence_is_logged() {
        let (stats, text) = logged_run(&[1, 1, 0]);
        assert_eq!(stats.discarded_observations, 2);
        assert!(text.contains("partial run dropped"), "{text}");
        assert!(text.contains("discarded=2"), "{text}");
    }

    #[test]
    fn missing_terminator_is_logged() {
        let (stats, text) = logged_run(&[1, 0xFFFF_FFFF]);
        assert_eq!(stats.end, StreamEnd::Exhausted);
        assert!(text.contains("input exhausted without terminator"), "{text}");
    }
}
