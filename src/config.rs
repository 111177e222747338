//! Input/output locations for one oracle run.

use std::path::PathBuf;

/// The five files a run touches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleConfig {
    /// `N` then `M`.
    pub dims: PathBuf,
    /// Initial row followed by the transition table.
    pub transitions: PathBuf,
    /// Emission table.
    pub emissions: PathBuf,
    /// Observation stream.
    pub observations: PathBuf,
    /// Where the decoded stream is written.
    pub output: PathBuf,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            dims: PathBuf::from("fut/N_fut.dat"),
            transitions: PathBuf::from("fut/A_fut.dat"),
            emissions: PathBuf::from("fut/B_fut.dat"),
            observations: PathBuf::from("fut/input_fut.dat"),
            output: PathBuf::from("output_oracle.dat"),
        }
    }
}

impl OracleConfig {
    /// Positional arguments: dims, transitions, emissions, observations,
    /// output. Fewer than five falls back to [`OracleConfig::default`] as a
    /// whole; anything past the fifth is ignored.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PathBuf>,
    {
        let args: Vec<PathBuf> = args.into_iter().map(Into::into).collect();
        match args.as_slice() {
            [dims, transitions, emissions, observations, output, rest @ ..] => {
                #[cfg(feature = "tracing")]
                {
                    if !rest.is_empty() {
                        tracing::warn!(extra = rest.len(), "ignoring arguments past the fifth");
                    }
                }
                #[cfg(not(feature = "tracing"))]
                let _ = rest;
                Self {
                    dims: dims.clone(),
                    transitions: transitions.clone(),
                    emissions: emissions.clone(),
                    observations: observations.clone(),
                    output: output.clone(),
                }
            }
            _ => Self::default(),
        }
    }
}
