use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;

mod inspect;
mod predict;

#[derive(From, Subcommand)]
pub enum Applet {
    Predict(predict::Predict),
    Inspect(inspect::Inspect),
}

impl Applet {
    pub fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Predict(a) => a.execute(),
            Applet::Inspect(a) => a.execute(),
        }
    }
}
