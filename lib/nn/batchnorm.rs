use crate::nn::{Activation, Block, ProcessError, Transform};
use derive_more::Constructor;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// A [batch normalization] layer.
///
/// Normalizes every feature with statistics frozen at training time.
///
/// [batch normalization]: https://en.wikipedia.org/wiki/Batch_normalization
#[derive(Debug, Clone, PartialEq, Constructor, Deserialize, Serialize)]
pub struct BatchNorm {
    mean: Array1<f32>,
    inv_std: Array1<f32>,
    gamma: Array1<f32>,
    beta: Array1<f32>,
    activation: Activation,
}

impl Transform for BatchNorm {
    fn forward(&mut self, input: Array2<f32>, _: bool) -> Result<Block, ProcessError> {
        let features = input.ncols();

        for param in [&self.mean, &self.inv_std, &self.gamma, &self.beta] {
            if param.len() != features {
                return Err(ProcessError::Incompatible(param.len(), features));
            }
        }

        let mut output = (input - &self.mean) * &self.inv_std * &self.gamma + &self.beta;
        self.activation.apply(&mut output);
        Ok(output.into())
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use test_strategy::proptest;

    #[proptest]
    fn batch_norm_standardizes_every_feature(
        #[strategy(-10f32..10.)] a: f32,
        #[strategy(-10f32..10.)] b: f32,
    ) {
        let mut l = BatchNorm::new(
            array![1., -1.],
            array![2., 0.5],
            array![1., 1.],
            array![0., 1.],
            Activation::Linear,
        );

        assert_eq!(
            l.forward(array![[a, b]], true),
            Ok(Block::Dense(array![[(a - 1.) * 2., (b + 1.) * 0.5 + 1.]]))
        );
    }

    #[proptest(cases = 1)]
    fn unit_statistics_leave_the_block_unchanged() {
        let mut l = BatchNorm::new(
            array![0.],
            array![1.],
            array![1.],
            array![0.],
            Activation::Linear,
        );

        assert_eq!(
            l.forward(array![[1.], [2.]], true),
            Ok(Block::Dense(array![[1.], [2.]]))
        );
    }

    #[proptest(cases = 1)]
    fn batch_norm_rejects_frames_of_the_wrong_width() {
        let mut l = BatchNorm::new(
            array![0.],
            array![1.],
            array![1.],
            array![0.],
            Activation::Linear,
        );

        assert_eq!(
            l.forward(array![[1., 2.]], true),
            Err(ProcessError::Incompatible(1, 2))
        );
    }
}
