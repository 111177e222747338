use std::env;
use std::process::ExitCode;

use viterbi_oracle::{engine, OracleConfig};

#[cfg(feature = "tracing")]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(not(feature = "tracing"))]
fn init_logging() {}

fn main() -> ExitCode {
    init_logging();

    let config = OracleConfig::from_args(env::args_os().skip(1));
    #[cfg(feature = "tracing")]
    tracing::info!(
        observations = %config.observations.display(),
        output = %config.output.display(),
        "starting run"
    );

    match engine::run(&config) {
        #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
        Ok(stats) => {
            #[cfg(feature = "tracing")]
            tracing::info!(
                sequences = stats.sequences,
                empty = stats.empty_sequences,
                discarded = stats.discarded_observations,
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::error!("viterbi_oracle: {err}");
            #[cfg(not(feature = "tracing"))]
            eprintln!("viterbi_oracle: {err}");
            ExitCode::FAILURE
        }
    }
}
