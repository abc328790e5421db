use crate::nn::{Block, Layer, ProcessError, Transform};
use derive_more::Constructor;
use ndarray::{concatenate, s, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Processes frames in both directions.
///
/// The output of the forward pass over the block and of the backward pass
/// over the reversed block are concatenated along the feature axis.
#[derive(Debug, Clone, PartialEq, Constructor, Deserialize, Serialize)]
pub struct Bidirectional {
    fwd: Box<Layer>,
    bwd: Box<Layer>,
}

impl Bidirectional {
    fn pass(layer: &mut Layer, input: Array2<f32>, reset: bool) -> Result<Array2<f32>, ProcessError> {
        match layer.forward(input, reset)? {
            Block::Dense(b) => Ok(b),
            Block::Tasks(_) => Err(ProcessError::Midstream),
        }
    }
}

impl Transform for Bidirectional {
    fn forward(&mut self, input: Array2<f32>, reset: bool) -> Result<Block, ProcessError> {
        let reversed = input.slice(s![..;-1, ..]).to_owned();

        let fwd = Self::pass(&mut self.fwd, input, reset)?;
        let bwd = Self::pass(&mut self.bwd, reversed, reset)?;
        let bwd = bwd.slice(s![..;-1, ..]).to_owned();

        match concatenate(Axis(1), &[fwd.view(), bwd.view()]) {
            Ok(b) => Ok(b.into()),
            Err(_) => Err(ProcessError::Incompatible(fwd.nrows(), bwd.nrows())),
        }
    }

    fn reset(&mut self) {
        self.fwd.reset();
        self.bwd.reset();
    }
}
