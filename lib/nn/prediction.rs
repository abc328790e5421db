use crate::nn::Block;
use derive_more::From;
use ndarray::{ArrayD, Axis};

/// A network's output, squeezed to its most natural shape.
#[derive(Debug, Clone, PartialEq, From)]
pub enum Prediction {
    /// A single output array.
    Single(ArrayD<f32>),
    /// One output array per task of a multi-task network, in task order.
    MultiTask(Vec<ArrayD<f32>>),
}

/// Drops axes of size 1.
fn squeeze(mut array: ArrayD<f32>) -> ArrayD<f32> {
    for i in (0..array.ndim()).rev() {
        if array.shape()[i] == 1 {
            array = array.remove_axis(Axis(i));
        }
    }

    array
}

impl From<Block> for Prediction {
    fn from(block: Block) -> Self {
        match block {
            Block::Dense(b) => Prediction::Single(squeeze(b.into_dyn())),
            Block::Tasks(ts) => {
                Prediction::MultiTask(ts.into_iter().map(|t| squeeze(t.into_dyn())).collect())
            }
        }
    }
}
