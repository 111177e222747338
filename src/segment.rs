//! Splitting the observation stream into sequences.
//!
//! The stream shares its value space with two sentinels:
//! `0xFFFF_FFFF` closes the current sequence and `0x0000_0000` closes the
//! whole stream. The segmenter is a three-state machine:
//!
//! ```text
//!   Between --sym--> Collecting --sym--> Collecting
//!   Between --FFFF_FFFF--> Between            (emits Empty)
//!   Collecting --FFFF_FFFF--> Between         (emits Sequence)
//!   Between | Collecting --0000_0000--> Done  (emits End, partial run dropped)
//!   Between --eof--> Done                     (emits End)
//!   Collecting --eof--> Done                  (emits Sequence, then End)
//! ```
//!
//! A zero seen mid-sequence ends everything at once and the observations
//! collected so far are discarded, not decoded. A run still open when input
//! runs out is decoded like a terminated one.

/// Closes the current observation sequence.
pub const END_OF_SEQUENCE: u32 = 0xFFFF_FFFF;
/// Closes the whole stream.
pub const END_OF_STREAM: u32 = 0x0000_0000;

/// How the stream came to an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamEnd {
    /// An explicit `0x0000_0000` was read. `discarded` counts the
    /// observations of the open sequence that were thrown away.
    Sentinel { discarded: usize },
    /// Input ran out without an explicit terminator.
    Exhausted,
}

/// One item produced by the segmenter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// A non-empty run of 1-indexed symbols.
    Sequence(Vec<u32>),
    /// A bare `0xFFFF_FFFF` with nothing before it.
    Empty,
    /// The stream is over; always the last item.
    End(StreamEnd),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Between,
    Collecting,
    Done,
}

/// Cursor over an observation stream yielding [`Segment`]s.
#[derive(Debug)]
pub struct Segmenter<'a> {
    words: &'a [u32],
    pos: usize,
    state: State,
    pending_end: Option<StreamEnd>,
}

impl<'a> Segmenter<'a> {
    pub fn new(words: &'a [u32]) -> Self {
        Self {
            words,
            pos: 0,
            state: State::Between,
            pending_end: None,
        }
    }

    /// Words consumed so far. Nothing past an explicit terminator is read.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for Segmenter<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if let Some(end) = self.pending_end.take() {
            return Some(Segment::End(end));
        }
        if self.state == State::Done {
            return None;
        }

        let mut run = Vec::new();
        loop {
            let Some(&word) = self.words.get(self.pos) else {
                self.state = State::Done;
                if run.is_empty() {
                    return Some(Segment::End(StreamEnd::Exhausted));
                }
                self.pending_end = Some(StreamEnd::Exhausted);
                return Some(Segment::Sequence(run));
            };
            self.pos += 1;

            match (self.state, word) {
                (_, END_OF_STREAM) => {
                    self.state = State::Done;
                    return Some(Segment::End(StreamEnd::Sentinel {
                        discarded: run.len(),
                    }));
                }
                (State::Between, END_OF_SEQUENCE) => return Some(Segment::Empty),
                (State::Collecting, END_OF_SEQUENCE) => {
                    self.state = State::Between;
                    return Some(Segment::Sequence(run));
                }
                (_, symbol) => {
                    self.state = State::Collecting;
                    run.push(symbol);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(words: &[u32]) -> Vec<Segment> {
        Segmenter::new(words).collect()
    }

    #[test]
    fn sequences_and_explicit_end() {
        let segs = split(&[1, 2, END_OF_SEQUENCE, 2, END_OF_SEQUENCE, END_OF_STREAM]);
        assert_eq!(
            segs,
            vec![
                Segment::Sequence(vec![1, 2]),
                Segment::Sequence(vec![2]),
                Segment::End(StreamEnd::Sentinel { discarded: 0 }),
            ]
        );
    }

    #[test]
    fn empty_marker() {
        let segs = split(&[END_OF_SEQUENCE, END_OF_STREAM]);
        assert_eq!(
            segs,
            vec![
                Segment::Empty,
                Segment::End(StreamEnd::Sentinel { discarded: 0 })
            ]
        );
    }

    #[test]
    fn zero_mid_sequence_drops_partial_run_and_stops_reading() {
        let words = [3, 1, 2, END_OF_STREAM, 1, END_OF_SEQUENCE];
        let mut seg = Segmenter::new(&words);
        assert_eq!(
            seg.next(),
            Some(Segment::End(StreamEnd::Sentinel { discarded: 3 }))
        );
        assert_eq!(seg.next(), None);
        assert_eq!(seg.position(), 4);
    }

    #[test]
    fn exhausted_input_closes_stream() {
        assert_eq!(split(&[]), vec![Segment::End(StreamEnd::Exhausted)]);
        assert_eq!(
            split(&[1, END_OF_SEQUENCE]),
            vec![
                Segment::Sequence(vec![1]),
                Segment::End(StreamEnd::Exhausted)
            ]
        );
    }

    #[test]
    fn open_run_at_eof_is_still_a_sequence() {
        assert_eq!(
            split(&[END_OF_SEQUENCE, 4, 5]),
            vec![
                Segment::Empty,
                Segment::Sequence(vec![4, 5]),
                Segment::End(StreamEnd::Exhausted)
            ]
        );
    }

    #[test]
    fn fused_after_end() {
        let mut seg = Segmenter::new(&[END_OF_STREAM]);
        assert!(matches!(seg.next(), Some(Segment::End(_))));
        assert_eq!(seg.next(), None);
        assert_eq!(seg.next(), None);
    }
}
