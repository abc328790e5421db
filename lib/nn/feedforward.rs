use crate::nn::{Activation, Block, ProcessError, Transform};
use derive_more::Constructor;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// A fully connected layer.
#[derive(Debug, Clone, PartialEq, Constructor, Deserialize, Serialize)]
pub struct FeedForward {
    weights: Array2<f32>,
    bias: Array1<f32>,
    activation: Activation,
}

impl Transform for FeedForward {
    fn forward(&mut self, input: Array2<f32>, _: bool) -> Result<Block, ProcessError> {
        if input.ncols() != self.weights.nrows() {
            return Err(ProcessError::Incompatible(
                self.weights.nrows(),
                input.ncols(),
            ));
        } else if self.bias.len() != self.weights.ncols() {
            return Err(ProcessError::Incompatible(
                self.weights.ncols(),
                self.bias.len(),
            ));
        }

        let mut output = input.dot(&self.weights) + &self.bias;
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
    fn feed_forward_multiplies_by_the_weight_matrix(
        #[strategy(-10f32..10.)] a: f32,
        #[strategy(-10f32..10.)] b: f32,
    ) {
        let mut l = FeedForward::new(array![[2.], [3.]], array![0.], Activation::Linear);

        assert_eq!(
            l.forward(array![[a, b]], true),
            Ok(Block::Dense(array![[2. * a + 3. * b]]))
        );
    }

    #[proptest]
    fn feed_forward_adds_the_bias_vector(
        #[strategy(-10f32..10.)] a: f32,
        #[strategy(-10f32..10.)] b: f32,
    ) {
        let mut l = FeedForward::new(array![[1., 0.], [0., 1.]], array![a, b], Activation::Linear);

        assert_eq!(
            l.forward(array![[1., 2.]], true),
            Ok(Block::Dense(array![[1. + a, 2. + b]]))
        );
    }

    #[proptest(cases = 1)]
    fn feed_forward_applies_the_activation() {
        let mut l = FeedForward::new(array![[1.]], array![0.], Activation::Relu);

        assert_eq!(
            l.forward(array![[-3.], [5.]], true),
            Ok(Block::Dense(array![[0.], [5.]]))
        );
    }

    #[proptest(cases = 1)]
    fn feed_forward_rejects_frames_of_the_wrong_width() {
        let mut l = FeedForward::new(array![[1.], [1.]], array![0.], Activation::Linear);

        assert_eq!(
            l.forward(array![[1., 2., 3.]], true),
            Err(ProcessError::Incompatible(2, 3))
        );
    }
}
