use ndarray::{Array, Axis, Dimension};
use serde::{Deserialize, Serialize};
use test_strategy::Arbitrary;

/// An elementwise [activation function].
///
/// [activation function]: https://en.wikipedia.org/wiki/Activation_function
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary, Deserialize, Serialize)]
pub enum Activation {
    /// The identity function.
    Linear,
    /// The hyperbolic tangent.
    Tanh,
    /// The logistic function.
    Sigmoid,
    /// A rectified linear unit.
    Relu,
    /// The softmax function, normalized along the last axis.
    Softmax,
}

impl Default for Activation {
    fn default() -> Self {
        Activation::Linear
    }
}

impl Activation {
    /// Applies the function to every element in place.
    pub fn apply<D: Dimension>(&self, block: &mut Array<f32, D>) {
        match self {
            Activation::Linear => {}
            Activation::Tanh => block.mapv_inplace(f32::tanh),
            Activation::Sigmoid => block.mapv_inplace(|v| 1. / (1. + (-v).exp())),
            Activation::Relu => block.mapv_inplace(|v| v.max(0.)),
            Activation::Softmax => {
                let axis = Axis(block.ndim().saturating_sub(1));
                for mut lane in block.lanes_mut(axis) {
                    let max = lane.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
                    lane.mapv_inplace(|v| (v - max).exp());
                    let sum = lane.sum();
                    lane /= sum;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};
    use proptest::collection::vec;
    use proptest::prelude::*;
    use test_strategy::proptest;

    fn frames() -> impl Strategy<Value = Array2<f32>> {
        (1..4usize, 1..4usize).prop_flat_map(|(r, c)| {
            vec(-10f32..10., r * c).prop_map(move |v| Array2::from_shape_vec((r, c), v).unwrap())
        })
    }

    #[proptest]
    fn linear_leaves_the_block_unchanged(#[strategy(frames())] b: Array2<f32>) {
        let mut a = b.clone();
        Activation::Linear.apply(&mut a);
        assert_eq!(a, b);
    }

    #[proptest]
    fn tanh_applies_elementwise(#[strategy(frames())] b: Array2<f32>) {
        let mut a = b.clone();
        Activation::Tanh.apply(&mut a);
        assert_eq!(a, b.mapv(f32::tanh));
    }

    #[proptest]
    fn sigmoid_squashes_into_the_unit_interval(#[strategy(frames())] b: Array2<f32>) {
        let mut a = b.clone();
        Activation::Sigmoid.apply(&mut a);
        assert!(a.iter().all(|&v| (0. ..=1.).contains(&v)));
    }

    #[proptest]
    fn relu_clips_negative_values(#[strategy(frames())] b: Array2<f32>) {
        let mut a = b.clone();
        Activation::Relu.apply(&mut a);
        assert_eq!(a, b.mapv(|v| v.max(0.)));
    }

    #[proptest]
    fn softmax_normalizes_every_frame(#[strategy(frames())] b: Array2<f32>) {
        let mut a = b.clone();
        Activation::Softmax.apply(&mut a);

        for row in a.rows() {
            assert!((row.sum() - 1.).abs() < 1e-5);
        }
    }

    #[proptest(cases = 1)]
    fn softmax_prefers_the_largest_activation() {
        let mut a = array![[1., 2., 3.]];
        Activation::Softmax.apply(&mut a);
        assert!(a[[0, 2]] > a[[0, 1]] && a[[0, 1]] > a[[0, 0]]);
    }
}
