use std::env;
use std::process::ExitCode;

use viterbi_oracle::compare::compare_files;

#[cfg(feature = "tracing")]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(not(feature = "tracing"))]
fn init_logging() {}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<_> = env::args_os().skip(1).collect();
    let [left, right] = args.as_slice() else {
        eprintln!("Usage: hexdiff <file1> <file2>");
        return ExitCode::FAILURE;
    };

    let report = match compare_files(left, right) {
        Ok(report) => report,
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::error!("hexdiff: {err}");
            #[cfg(not(feature = "tracing"))]
            eprintln!("hexdiff: {err}");
            return ExitCode::FAILURE;
        }
    };

    if !report.line_counts_match() {
        println!(
            "Different number of lines: {} vs {}",
            report.left_lines, report.right_lines
        );
        return ExitCode::FAILURE;
    }
    for mismatch in &report.mismatches {
        println!("{mismatch}");
    }
    if report.is_match() {
        println!("All {} lines match", report.left_lines);
        ExitCode::SUCCESS
    } else {
        println!(
            "{} mismatches out of {} lines",
            report.mismatches.len(),
            report.left_lines
        );
        ExitCode::FAILURE
    }
}
