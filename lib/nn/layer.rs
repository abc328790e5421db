use crate::nn::{BatchNorm, Bidirectional, CombineError, FeedForward, Lstm, MultiTask, Recurrent};
use derive_more::{Display, Error, From};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// A block of frames flowing between layers.
#[derive(Debug, Clone, PartialEq, From)]
pub enum Block {
    /// A dense `frames × features` matrix.
    Dense(Array2<f32>),
    /// One matrix per task, out of the final layer of a multi-task network.
    Tasks(Vec<Array2<f32>>),
}

/// The reason why processing frames failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ProcessError {
    /// A layer was fed frames of unexpected width.
    #[display(fmt = "expected frames of {_0} features, found {_1}")]
    Incompatible(#[error(not(source))] usize, #[error(not(source))] usize),

    /// The input has more axes than layers accept.
    #[display(fmt = "expected at most 2 axes, found {_0}")]
    Dimensions(#[error(not(source))] usize),

    /// A multi-task block was fed into a subsequent layer.
    #[display(fmt = "only the final layer may split into multiple tasks")]
    Midstream,

    /// Combining predictions failed.
    Combine(CombineError),
}

/// Trait for types that can transform a block of frames.
#[cfg_attr(test, mockall::automock)]
pub trait Transform {
    /// Transforms a block of input frames.
    ///
    /// Stateful implementations clear their internal state first if `reset` is set.
    fn forward(&mut self, input: Array2<f32>, reset: bool) -> Result<Block, ProcessError>;

    /// Restores the initial state.
    fn reset(&mut self);
}

/// A concrete layer of a [`Network`][crate::nn::Network].
#[derive(Debug, Display, Clone, PartialEq, From, Deserialize, Serialize)]
pub enum Layer {
    #[display(fmt = "feed forward")]
    FeedForward(FeedForward),
    #[display(fmt = "recurrent")]
    Recurrent(Recurrent),
    #[display(fmt = "lstm")]
    Lstm(Lstm),
    #[display(fmt = "bidirectional")]
    Bidirectional(Bidirectional),
    #[display(fmt = "batch norm")]
    BatchNorm(BatchNorm),
    #[display(fmt = "multi task")]
    MultiTask(MultiTask),
}

impl Transform for Layer {
    fn forward(&mut self, input: Array2<f32>, reset: bool) -> Result<Block, ProcessError> {
        match self {
            Layer::FeedForward(l) => l.forward(input, reset),
            Layer::Recurrent(l) => l.forward(input, reset),
            Layer::Lstm(l) => l.forward(input, reset),
            Layer::Bidirectional(l) => l.forward(input, reset),
            Layer::BatchNorm(l) => l.forward(input, reset),
            Layer::MultiTask(l) => l.forward(input, reset),
        }
    }

    fn reset(&mut self) {
        match self {
            Layer::FeedForward(l) => l.reset(),
            Layer::Recurrent(l) => l.reset(),
            Layer::Lstm(l) => l.reset(),
            Layer::Bidirectional(l) => l.reset(),
            Layer::BatchNorm(l) => l.reset(),
            Layer::MultiTask(l) => l.reset(),
        }
    }
}
