use std::path::PathBuf;

use clap::*;

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Mirror a real directory's top-level entries into a fresh ufs
  /// instance, then list what a `[BASE]` view sees under ROOT.
  Inspect {
    directory: PathBuf,
  },
}

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
  #[clap(subcommand)]
  pub command: Command,
}

pub fn parse() -> Cli {
  Cli::parse()
}
