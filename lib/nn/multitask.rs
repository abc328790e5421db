use crate::nn::{Block, Layer, ProcessError, Transform};
use derive_more::Constructor;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Splits processing into parallel task heads.
///
/// Every head transforms the same block; their outputs form the tasks of a
/// multi-task network, in head order. Only valid as the final stage of a
/// [`Network`][crate::nn::Network].
#[derive(Debug, Clone, PartialEq, Constructor, Deserialize, Serialize)]
pub struct MultiTask {
    heads: Vec<Layer>,
}

impl Transform for MultiTask {
    fn forward(&mut self, input: Array2<f32>, reset: bool) -> Result<Block, ProcessError> {
        let mut tasks = Vec::with_capacity(self.heads.len());

        for head in &mut self.heads {
            match head.forward(input.clone(), reset)? {
                Block::Dense(b) => tasks.push(b),
                Block::Tasks(_) => return Err(ProcessError::Midstream),
            }
        }

        Ok(Block::Tasks(tasks))
    }

    fn reset(&mut self) {
        for head in &mut self.heads {
            head.reset();
        }
    }
}
