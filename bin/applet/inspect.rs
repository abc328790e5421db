use anyhow::Error as Anyhow;
use clap::Parser;
use lib::nn::Network;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Prints the layer stack of a model file.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Inspect {
    /// The model file.
    model: PathBuf,
}

impl Inspect {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let network = Network::load(&self.model)?;

        info!(layers = network.layers().len());

        for (i, layer) in network.layers().iter().enumerate() {
            println!("{i}: {layer}");
        }

        Ok(())
    }
}
