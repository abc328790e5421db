use crate::io::read_frames;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::nn::{Ensemble, Ensembled, Options, Prediction};
use std::io::{stdin, BufReader};
use std::num::NonZeroUsize;
use std::{fs::File, path::PathBuf};
use tracing::{info, instrument};

/// Runs an ensemble of networks over input frames.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Predict {
    /// The number of threads to use while evaluating member networks.
    #[clap(short, long)]
    threads: Option<NonZeroUsize>,

    /// Print one prediction per network instead of their average.
    #[clap(short, long)]
    raw: bool,

    /// The file to read frames from, `-` for the standard input.
    #[clap(short, long, default_value = "-")]
    input: String,

    /// Model files, one network per file.
    #[clap(required = true)]
    models: Vec<PathBuf>,
}

fn print(prediction: &Prediction) {
    match prediction {
        Prediction::Single(p) => println!("{p}"),
        Prediction::MultiTask(ts) => {
            for t in ts {
                println!("{t}");
            }
        }
    }
}

impl Predict {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut ensemble = Ensemble::load(&self.models)?;

        if self.raw {
            ensemble = ensemble.with_combine(None);
        }

        if let Some(threads) = self.threads {
            ensemble = ensemble.with_options(Options { threads });
        }

        let frames = match self.input.as_str() {
            "-" => read_frames(stdin().lock())?,
            path => read_frames(BufReader::new(File::open(path)?))?,
        };

        info!(
            networks = self.models.len(),
            frames = frames.nrows(),
            features = frames.ncols(),
        );

        match ensemble.process(frames, true)? {
            Ensembled::Combined(p) => print(&p),
            Ensembled::Raw(ps) => {
                for p in &ps {
                    print(p);
                }
            }
        }

        Ok(())
    }
}
