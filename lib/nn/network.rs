use crate::nn::{Block, Layer, Prediction, ProcessError, Transform};
use derive_more::{Display, Error, From};
use ndarray::{Array, Array2, Axis, Dimension, Ix2};
use serde::{Deserialize, Serialize};
use std::{fs::File, io, path::Path};

/// The reason why loading a model file failed.
#[derive(Debug, Display, Error, From)]
pub enum LoadError {
    #[display(fmt = "failed to read the model file")]
    Io(io::Error),
    #[display(fmt = "failed to parse the model file")]
    Parse(ron::de::SpannedError),
}

/// Promotes the input to a `frames × features` matrix.
///
/// Arrays of fewer than 2 axes are viewed as a single frame without copying.
fn frames<D: Dimension>(input: Array<f32, D>) -> Result<Array2<f32>, ProcessError> {
    let mut input = input.into_dyn();

    while input.ndim() < 2 {
        input = input.insert_axis(Axis(0));
    }

    let axes = input.ndim();

    input
        .into_dimensionality::<Ix2>()
        .map_err(|_| ProcessError::Dimensions(axes))
}

/// An ordered composition of layers executed as a pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Network<T = Layer> {
    layers: Vec<T>,
}

impl<T> Network<T> {
    /// Constructs a [`Network`] from the given layers.
    ///
    /// Inter-layer shape compatibility is not validated; a mismatch surfaces
    /// as a [`ProcessError`] on first use.
    pub fn new(layers: Vec<T>) -> Self {
        Network { layers }
    }

    /// The layers, in topology order.
    pub fn layers(&self) -> &[T] {
        &self.layers
    }
}

impl Network {
    /// Deserializes a [`Network`] from a model file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Ok(ron::de::from_reader(File::open(path)?)?)
    }
}

impl<T: Transform> Network<T> {
    /// Processes a block of frames through every layer in sequence.
    ///
    /// Stateful layers clear their internal state first if `reset` is set,
    /// otherwise they resume from where the previous call left off.
    pub fn process<D: Dimension>(
        &mut self,
        input: Array<f32, D>,
        reset: bool,
    ) -> Result<Prediction, ProcessError> {
        let mut block = frames(input)?;
        let last = self.layers.len();

        for (i, layer) in self.layers.iter_mut().enumerate() {
            block = match layer.forward(block, reset)? {
                Block::Dense(b) => b,
                Block::Tasks(ts) if i + 1 == last => return Ok(Block::Tasks(ts).into()),
                Block::Tasks(_) => return Err(ProcessError::Midstream),
            };
        }

        Ok(Block::Dense(block).into())
    }

    /// Resets every layer to its initial state, in topology order.
    pub fn reset(&mut self) {
        for layer in &mut self.layers {
            layer.reset();
        }
    }
}
