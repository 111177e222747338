use proptest::prelude::*;
use viterbi_oracle::adder::add;
use viterbi_oracle::bits::NEG_INF_BITS;
use viterbi_oracle::{HmmModel, SoftAdder, ViterbiDecoder};

fn w(x: f32) -> u32 {
    x.to_bits()
}

fn make_sym_hmm() -> HmmModel {
    let half = (0.5f32).ln();
    HmmModel::new(
        2,
        2,
        vec![w(half); 6],
        vec![w(0.6f32.ln()), w(0.4f32.ln()), w(0.4f32.ln()), w(0.6f32.ln())],
    )
}

proptest! {
    #[test]
    fn single_state_is_a_straight_chain(
        pi in -30.0f32..0.0,
        self_loop in -30.0f32..0.0,
        emit in prop::collection::vec(-30.0f32..0.0, 1..5),
        seed_obs in prop::collection::vec(any::<u32>(), 1..24),
    ) {
        let m = emit.len() as u32;
        let obs: Vec<u32> = seed_obs.iter().map(|s| s % m + 1).collect();
        let model = HmmModel::new(
            1,
            emit.len(),
            vec![w(pi), w(self_loop)],
            emit.iter().map(|&e| w(e)).collect(),
        );

        let path = ViterbiDecoder::native().decode(&model, &obs).unwrap();
        prop_assert!(path.states.iter().all(|&s| s == 1));
        prop_assert_eq!(path.states.len(), obs.len());

        let emission = |sym: u32| w(emit[(sym - 1) as usize]);
        let mut chain = add(w(pi), emission(obs[0]));
        for &sym in &obs[1..] {
            chain = add(add(chain, w(self_loop)), emission(sym));
        }
        prop_assert_eq!(path.log_prob_bits, chain);
    }
}

#[test]
fn exact_ties_pick_lowest_source_state() {
    // V[0] = [-1 + -1, -1.5 + -0.5] = [-2, -2]; both transitions cost -1,
    // so every recursion step sees two bit-identical candidates.
    let model = HmmModel::new(
        2,
        1,
        vec![w(-1.0), w(-1.5), w(-1.0), w(-1.0), w(-1.0), w(-1.0)],
        vec![w(-1.0), w(-0.5)],
    );
    let dec = ViterbiDecoder::native();
    let trellis = dec.forward(&model, &[1, 1]).unwrap();
    assert_eq!(trellis.row(0), &[w(-2.0), w(-2.0)]);
    assert_eq!(trellis.backpointer(1, 0).unwrap(), 0);
    assert_eq!(trellis.backpointer(1, 1).unwrap(), 0);

    let path = dec.decode(&model, &[1, 1]).unwrap();
    assert_eq!(path.states, vec![1, 2]);
    assert_eq!(path.log_prob_bits, w(-3.5));
}

#[test]
fn final_tie_picks_lowest_state() {
    let model = HmmModel::new(3, 1, vec![w(-1.0); 12], vec![w(-0.5); 3]);
    let path = ViterbiDecoder::native().decode(&model, &[1, 1, 1]).unwrap();
    assert_eq!(path.states, vec![1, 1, 1]);
}

#[test]
fn zero_probabilities_are_respected() {
    let model = HmmModel::new(
        2,
        2,
        // only state 1 can start; state 2 is unreachable from it
        vec![w(0.0), NEG_INF_BITS, w(0.0), NEG_INF_BITS, NEG_INF_BITS, w(0.0)],
        // state 1 can emit only symbol 1
        vec![w(0.0), NEG_INF_BITS, w(0.0), w(0.0)],
    );
    let path = ViterbiDecoder::native()
        .decode(&model, &[1, 1, 1])
        .unwrap();
    assert_eq!(path.log_prob_bits, w(0.0));
    assert!(path.states.iter().all(|&s| s == 1));
}

#[test]
fn impossible_sequence_reports_negative_infinity() {
    let model = HmmModel::new(
        2,
        2,
        vec![w(0.0), NEG_INF_BITS, w(0.0), NEG_INF_BITS, NEG_INF_BITS, w(0.0)],
        vec![w(0.0), NEG_INF_BITS, w(0.0), w(0.0)],
    );
    let path = ViterbiDecoder::native().decode(&model, &[2, 2]).unwrap();
    assert_eq!(path.log_prob_bits, NEG_INF_BITS);
    assert_eq!(path.states, vec![1, 1]);
}

#[test]
fn ties_are_deterministic() {
    let obs = [1, 2, 1, 2];
    let first = ViterbiDecoder::native().decode(&make_sym_hmm(), &obs).unwrap();
    let second = ViterbiDecoder::native().decode(&make_sym_hmm(), &obs).unwrap();
    let soft = ViterbiDecoder::new(SoftAdder)
        .decode(&make_sym_hmm(), &obs)
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first, soft);
}

#[test]
fn short_sequences_with_ties() {
    let path = ViterbiDecoder::native().decode(&make_sym_hmm(), &[2]).unwrap();
    assert_eq!(path.states, vec![2]);
    assert!(path.log_prob().is_finite());
}
