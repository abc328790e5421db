use derive_more::{Display, Error, From};
use ndarray::Array2;
use std::io::{self, BufRead};

/// The reason why reading frames failed.
#[derive(Debug, Display, Error, From)]
pub enum ReadFramesError {
    #[display(fmt = "failed to read the input")]
    Io(io::Error),

    #[display(fmt = "invalid number on line {_0}")]
    Number(#[error(not(source))] usize),

    #[display(fmt = "expected {_0} features on line {_1}, found {_2}")]
    Ragged(
        #[error(not(source))] usize,
        #[error(not(source))] usize,
        #[error(not(source))] usize,
    ),
}

/// Reads whitespace or comma separated frames, one per line.
///
/// Blank lines are skipped; all remaining lines must have the same width.
pub fn read_frames<R: BufRead>(reader: R) -> Result<Array2<f32>, ReadFramesError> {
    let mut features = 0;
    let mut data = Vec::new();
    let mut frames = 0;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let values = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|v| !v.is_empty());

        let mut width = 0;
        for value in values {
            match value.parse() {
                Ok(v) => data.push(v),
                Err(_) => return Err(ReadFramesError::Number(i + 1)),
            }

            width += 1;
        }

        if width == 0 {
            continue;
        } else if frames == 0 {
            features = width;
        } else if width != features {
            return Err(ReadFramesError::Ragged(features, i + 1, width));
        }

        frames += 1;
    }

    match Array2::from_shape_vec((frames, features), data) {
        Ok(block) => Ok(block),
        Err(_) => Err(ReadFramesError::Ragged(features, frames, 0)),
    }
}
