//! Example: decode a small in-memory stream and print the hardware dump.
//!
//! Run with:
//! `cargo run --example decode`

use viterbi_oracle::{hexio::format_word, HmmModel, OracleEngine};

fn main() {
    // States 1,2; symbols 1,2. State 1 prefers symbol 1, state 2 symbol 2.
    let w = |p: f32| p.ln().to_bits();
    let model = HmmModel::new(
        2,
        2,
        vec![w(0.5), w(0.5), w(0.9), w(0.1), w(0.2), w(0.8)],
        vec![w(0.8), w(0.2), w(0.3), w(0.7)],
    );

    // Two sequences, one empty marker, then end of stream.
    let stream = [1, 1, 2, 2, 2, 1, 2, 0xFFFF_FFFF, 0xFFFF_FFFF, 2, 1, 0xFFFF_FFFF, 0];

    let run = match OracleEngine::new(model).run(&stream) {
        Ok(run) => run,
        Err(err) => {
            eprintln!("decode failed: {err}");
            std::process::exit(1);
        }
    };

    println!("sequences decoded: {}", run.stats.sequences);
    for word in run.output.words() {
        println!("{}", format_word(*word));
    }
}
