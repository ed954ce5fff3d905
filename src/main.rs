//! French RSU tax calculator
//!
//! Computes the taxes due when selling vested RSUs under the Macron I,
//! Macron III and unrestricted (non-qualified) regimes.

use clap::{Parser, Subcommand};

mod cmd;
mod tax;
mod utils;

#[derive(Parser, Debug)]
#[command(name = "rsutax", version, about = "Calculate French taxes on RSU sales")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the tax breakdown for a single sell scenario
    Calc(cmd::calc::CalcCommand),
    /// Calculate a batch of scenarios from a CSV file
    Batch(cmd::batch::BatchCommand),
    /// Compare two sell scenarios side by side
    Compare(cmd::compare::CompareCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calc(cmd) => cmd.exec(),
        Command::Batch(cmd) => cmd.exec(),
        Command::Compare(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
