//! gdml2mcnp command-line interface.
//!
//! Convert GDML geometry files to MCNP card decks:
//! ```sh
//! gdml2mcnp convert detector.gdml -o detector.card
//! gdml2mcnp validate detector.gdml
//! gdml2mcnp materials detector.gdml
//! ```

mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gdml2mcnp")]
#[command(about = "Convert GDML geometry descriptions to MCNP card decks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a GDML file to an MCNP card deck.
    Convert {
        /// Path to the GDML geometry file.
        input: PathBuf,
        /// Output card file (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse and convert a GDML file without writing a deck.
    Validate {
        /// Path to the GDML geometry file.
        input: PathBuf,
    },
    /// Print the material legend a conversion would produce.
    Materials {
        /// Path to the GDML geometry file.
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { input, output } => runner::convert(&input, output.as_deref()),
        Commands::Validate { input } => runner::validate(&input),
        Commands::Materials { input } => runner::materials(&input),
    }
}
