use crate::adder::NativeAdder;
use crate::config::OracleConfig;
use crate::engine::OracleEngine;
use crate::error::Result;
use crate::hexio;
use crate::model::HmmModel;
use crate::traits::Adder;
use crate::viterbi::ViterbiDecoder;

pub struct OracleBuilder<A: Adder = NativeAdder> {
    adder: A,
    parallel: bool,
}

impl OracleBuilder<NativeAdder> {
    pub fn new() -> Self {
        Self {
            adder: NativeAdder,
            parallel: false,
        }
    }
}

impl Default for OracleBuilder<NativeAdder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Adder> OracleBuilder<A> {
    pub fn with_adder<B: Adder>(self, adder: B) -> OracleBuilder<B> {
        OracleBuilder {
            adder,
            parallel: self.parallel,
        }
    }

    /// Decode sequences on the rayon pool. Output order is unchanged.
    #[cfg(feature = "parallel")]
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn build(self, model: HmmModel) -> OracleEngine<A> {
        #[cfg(feature = "tracing")]
        tracing::debug!(adder = self.adder.name(), parallel = self.parallel, "engine configured");
        OracleEngine::from_parts(model, ViterbiDecoder::new(self.adder), self.parallel)
    }

    /// Read the dimension, transition and emission files named by `config`
    /// and build an engine around them.
    pub fn load(self, config: &OracleConfig) -> Result<OracleEngine<A>> {
        #[cfg(feature = "tracing")]
        tracing::info!(
            dims = %config.dims.display(),
            transitions = %config.transitions.display(),
            emissions = %config.emissions.display(),
            "loading model"
        );
        let dims = hexio::load(&config.dims)?;
        let a = hexio::load(&config.transitions)?;
        let b = hexio::load(&config.emissions)?;
        let model = HmmModel::from_words(&dims, a, b)?;
        Ok(self.build(model))
    }
}
