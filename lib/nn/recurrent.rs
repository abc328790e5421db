use crate::nn::{Activation, Block, ProcessError, Transform};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// A simple recurrent layer.
///
/// The activation of every frame is fed back into the next one through the
/// recurrence matrix, until the state is [reset][Transform::reset].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Recurrent {
    weights: Array2<f32>,
    bias: Array1<f32>,
    recurrence: Array2<f32>,
    activation: Activation,
    #[serde(skip)]
    state: Option<Array1<f32>>,
}

impl Recurrent {
    /// Constructs a [`Recurrent`] layer in its initial state.
    pub fn new(
        weights: Array2<f32>,
        bias: Array1<f32>,
        recurrence: Array2<f32>,
        activation: Activation,
    ) -> Self {
        Recurrent {
            weights,
            bias,
            recurrence,
            activation,
            state: None,
        }
    }

    fn check(&self, input: &Array2<f32>) -> Result<(), ProcessError> {
        let units = self.weights.ncols();

        if input.ncols() != self.weights.nrows() {
            Err(ProcessError::Incompatible(
                self.weights.nrows(),
                input.ncols(),
            ))
        } else if self.bias.len() != units {
            Err(ProcessError::Incompatible(units, self.bias.len()))
        } else if self.recurrence.dim() != (units, units) {
            Err(ProcessError::Incompatible(units, self.recurrence.nrows()))
        } else {
            Ok(())
        }
    }
}

impl Transform for Recurrent {
    fn forward(&mut self, input: Array2<f32>, reset: bool) -> Result<Block, ProcessError> {
        if reset {
            self.reset();
        }

        self.check(&input)?;

        let units = self.weights.ncols();
        let mut output = Array2::zeros((input.nrows(), units));
        let mut prev = self.state.take().unwrap_or_else(|| Array1::zeros(units));

        for (i, frame) in input.rows().into_iter().enumerate() {
            let mut unit = frame.dot(&self.weights) + &self.bias + prev.dot(&self.recurrence);
            self.activation.apply(&mut unit);
            output.row_mut(i).assign(&unit);
            prev = unit;
        }

        self.state = Some(prev);
        Ok(output.into())
    }

    fn reset(&mut self) {
        self.state = None;
    }
}
