use crate::nn::{Combine, Layer, LoadError, Network, Prediction, ProcessError, Transform};
use crate::util::Driver;
use derive_more::From;
use ndarray::{Array, Dimension};
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::debug;

#[cfg(test)]
use proptest::prelude::*;

/// The outcome of evaluating an [`Ensemble`].
#[derive(Debug, Clone, PartialEq, From)]
pub enum Ensembled {
    /// The members' predictions merged by the combination strategy.
    Combined(Prediction),
    /// One prediction per member network, in member order.
    Raw(Vec<Prediction>),
}

/// Configuration for ensemble evaluation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Options {
    /// The number of threads to use while evaluating member networks.
    #[cfg_attr(test, strategy((1..=4usize).prop_filter_map("zero", |t| NonZeroUsize::new(t))))]
    pub threads: NonZeroUsize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            threads: NonZeroUsize::new(1).unwrap(),
        }
    }
}

/// A set of independently trained networks evaluated as one.
#[derive(Debug)]
pub struct Ensemble<T = Layer> {
    networks: Vec<Network<T>>,
    combine: Option<Combine>,
    driver: Driver,
}

impl<T> Ensemble<T> {
    /// Constructs an [`Ensemble`] that averages its members' predictions.
    pub fn new(networks: Vec<Network<T>>) -> Self {
        Ensemble {
            networks,
            combine: Some(Combine::Average),
            driver: Driver::new(Options::default().threads),
        }
    }

    /// Sets the combination strategy.
    ///
    /// `None` disables combination; [`process`][Ensemble::process] then
    /// returns the raw per-network predictions.
    pub fn with_combine(mut self, combine: Option<Combine>) -> Self {
        self.combine = combine;
        self
    }

    /// Configures how member networks are evaluated.
    pub fn with_options(mut self, options: Options) -> Self {
        self.driver = Driver::new(options.threads);
        self
    }
}

impl Ensemble {
    /// Loads one [`Network`] per model file.
    ///
    /// The order of `paths` determines the order of the members, and thereby
    /// the order of the predictions fed to the combination strategy.
    pub fn load<I, P>(paths: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let networks = paths
            .into_iter()
            .map(Network::load)
            .collect::<Result<_, _>>()?;

        Ok(Ensemble::new(networks))
    }
}

impl<T: Transform + Send> Ensemble<T> {
    /// Evaluates every member network on the same input.
    ///
    /// Predictions are collected in member order regardless of completion
    /// order and merged by the combination strategy, if any. The first
    /// failing member aborts the call.
    pub fn process<D: Dimension>(
        &mut self,
        input: Array<f32, D>,
        reset: bool,
    ) -> Result<Ensembled, ProcessError> {
        debug!(networks = self.networks.len(), reset, "evaluating ensemble");

        let input = input.into_dyn();
        let predictions: Vec<Prediction> = self
            .driver
            .map(&mut self.networks, |n| n.process(input.clone(), reset))?;

        match &self.combine {
            Some(c) => Ok(Ensembled::Combined(c.apply(predictions)?)),
            None => Ok(Ensembled::Raw(predictions)),
        }
    }

    /// Resets every member network to its initial state.
    pub fn reset(&mut self) {
        for network in &mut self.networks {
            network.reset();
        }
    }
}
