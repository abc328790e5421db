use crate::nn::{Activation, Block, ProcessError, Transform};
use derive_more::Constructor;
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// A single gate of an [`Lstm`] layer.
#[derive(Debug, Clone, PartialEq, Constructor, Deserialize, Serialize)]
pub struct Gate {
    weights: Array2<f32>,
    bias: Array1<f32>,
    recurrence: Array2<f32>,
}

impl Gate {
    fn check(&self, features: usize, units: usize) -> Result<(), ProcessError> {
        if self.weights.dim() != (features, units) {
            Err(ProcessError::Incompatible(features, self.weights.nrows()))
        } else if self.bias.len() != units {
            Err(ProcessError::Incompatible(units, self.bias.len()))
        } else if self.recurrence.dim() != (units, units) {
            Err(ProcessError::Incompatible(units, self.recurrence.nrows()))
        } else {
            Ok(())
        }
    }

    fn excite(&self, frame: ArrayView1<f32>, prev: &Array1<f32>) -> Array1<f32> {
        frame.dot(&self.weights) + &self.bias + prev.dot(&self.recurrence)
    }
}

/// A [long short-term memory][LSTM] layer.
///
/// [LSTM]: https://en.wikipedia.org/wiki/Long_short-term_memory
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Lstm {
    input_gate: Gate,
    forget_gate: Gate,
    cell: Gate,
    output_gate: Gate,
    activation: Activation,
    #[serde(skip)]
    state: Option<(Array1<f32>, Array1<f32>)>,
}

impl Lstm {
    /// Constructs an [`Lstm`] layer in its initial state.
    pub fn new(
        input_gate: Gate,
        forget_gate: Gate,
        cell: Gate,
        output_gate: Gate,
        activation: Activation,
    ) -> Self {
        Lstm {
            input_gate,
            forget_gate,
            cell,
            output_gate,
            activation,
            state: None,
        }
    }
}

impl Transform for Lstm {
    fn forward(&mut self, input: Array2<f32>, reset: bool) -> Result<Block, ProcessError> {
        if reset {
            self.reset();
        }

        let features = input.ncols();
        let units = self.cell.weights.ncols();

        self.input_gate.check(features, units)?;
        self.forget_gate.check(features, units)?;
        self.cell.check(features, units)?;
        self.output_gate.check(features, units)?;

        let mut output = Array2::zeros((input.nrows(), units));
        let (mut memory, mut prev) = self
            .state
            .take()
            .unwrap_or_else(|| (Array1::zeros(units), Array1::zeros(units)));

        for (i, frame) in input.rows().into_iter().enumerate() {
            let mut ig = self.input_gate.excite(frame, &prev);
            Activation::Sigmoid.apply(&mut ig);

            let mut fg = self.forget_gate.excite(frame, &prev);
            Activation::Sigmoid.apply(&mut fg);

            let mut candidate = self.cell.excite(frame, &prev);
            self.activation.apply(&mut candidate);

            memory = fg * memory + ig * candidate;

            let mut og = self.output_gate.excite(frame, &prev);
            Activation::Sigmoid.apply(&mut og);

            let mut unit = memory.clone();
            self.activation.apply(&mut unit);
            prev = og * unit;

            output.row_mut(i).assign(&prev);
        }

        self.state = Some((memory, prev));
        Ok(output.into())
    }

    fn reset(&mut self) {
        self.state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::collection::vec;
    use test_strategy::proptest;

    fn gate(w: f32, b: f32, r: f32) -> Gate {
        Gate::new(array![[w]], array![b], array![[r]])
    }

    fn lstm() -> Lstm {
        Lstm::new(
            gate(0.5, 0.1, 0.2),
            gate(-0.3, 0.2, 0.1),
            gate(0.8, 0., 0.4),
            gate(0.6, -0.1, 0.3),
            Activation::Tanh,
        )
    }

    #[proptest(cases = 1)]
    fn zero_weights_produce_zero_activations() {
        let mut l = Lstm::new(
            gate(0., 0., 0.),
            gate(0., 0., 0.),
            gate(0., 0., 0.),
            gate(0., 0., 0.),
            Activation::Tanh,
        );

        assert_eq!(
            l.forward(array![[1.], [-1.]], true),
            Ok(Block::Dense(array![[0.], [0.]]))
        );
    }

    #[proptest]
    fn resetting_restores_the_initial_state(#[strategy(vec(-1f32..1., 1..9))] v: Vec<f32>) {
        let input = Array2::from_shape_vec((v.len(), 1), v).unwrap();
        let mut l = lstm();

        let first = l.forward(input.clone(), true);
        l.reset();

        assert_eq!(l.forward(input, false), first);
    }

    #[proptest]
    fn processing_with_reset_is_idempotent(#[strategy(vec(-1f32..1., 1..9))] v: Vec<f32>) {
        let input = Array2::from_shape_vec((v.len(), 1), v).unwrap();
        let mut l = lstm();

        assert_eq!(
            l.forward(input.clone(), true),
            l.forward(input.clone(), true)
        );
    }

    #[proptest(cases = 1)]
    fn lstm_rejects_frames_of_the_wrong_width() {
        let mut l = lstm();

        assert_eq!(
            l.forward(array![[1., 2.]], true),
            Err(ProcessError::Incompatible(2, 1))
        );
    }
}
