use crate::nn::Prediction;
use derive_more::{Display, Error};
use std::fmt;

/// The reason why combining predictions failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum CombineError {
    /// There is nothing to combine.
    #[display(fmt = "cannot combine an empty list of predictions")]
    Empty,

    /// Single and multi-task predictions are mixed, or task arities differ.
    #[display(fmt = "cannot combine predictions of different kinds")]
    Incompatible,

    /// Array shapes disagree.
    #[display(fmt = "cannot combine predictions of different shapes")]
    Shape,
}

/// Returns the average of all predictions.
///
/// Multi-task predictions are averaged slot by slot, preserving task order.
pub fn average(predictions: Vec<Prediction>) -> Result<Prediction, CombineError> {
    let count = predictions.len();
    let mut rest = predictions.into_iter();
    let first = rest.next().ok_or(CombineError::Empty)?;

    // a lone prediction is its own average
    if count == 1 {
        return Ok(first);
    }

    match first {
        Prediction::Single(mut sum) => {
            for prediction in rest {
                match prediction {
                    Prediction::Single(p) if p.shape() == sum.shape() => sum += &p,
                    Prediction::Single(_) => return Err(CombineError::Shape),
                    Prediction::MultiTask(_) => return Err(CombineError::Incompatible),
                }
            }

            Ok(Prediction::Single(sum / count as f32))
        }

        Prediction::MultiTask(mut sums) => {
            for prediction in rest {
                let tasks = match prediction {
                    Prediction::MultiTask(ts) if ts.len() == sums.len() => ts,
                    _ => return Err(CombineError::Incompatible),
                };

                for (sum, task) in sums.iter_mut().zip(tasks) {
                    if task.shape() != sum.shape() {
                        return Err(CombineError::Shape);
                    }

                    *sum += &task;
                }
            }

            Ok(Prediction::MultiTask(
                sums.into_iter().map(|s| s / count as f32).collect(),
            ))
        }
    }
}

/// Strategy for merging the ordered predictions of an
/// [`Ensemble`][crate::nn::Ensemble] into one.
pub enum Combine {
    /// The elementwise arithmetic mean, see [`average`].
    Average,
    /// A custom combination function.
    Custom(Box<dyn Fn(Vec<Prediction>) -> Result<Prediction, CombineError> + Send + Sync>),
}

impl Combine {
    /// Merges predictions into one.
    pub fn apply(&self, predictions: Vec<Prediction>) -> Result<Prediction, CombineError> {
        match self {
            Combine::Average => average(predictions),
            Combine::Custom(f) => f(predictions),
        }
    }
}

impl Default for Combine {
    fn default() -> Self {
        Combine::Average
    }
}

impl fmt::Debug for Combine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combine::Average => f.write_str("Average"),
            Combine::Custom(_) => f.write_str("Custom"),
        }
    }
}
