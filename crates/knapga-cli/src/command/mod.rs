use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{brute_force::BruteForceArg, solve::SolveArg};

mod brute_force;
mod solve;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve a packing of the reference catalog
    Solve(#[clap(flatten)] SolveArg),
    /// Find the exact optimum by trying every subset
    BruteForce(#[clap(flatten)] BruteForceArg),
}

pub fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Solve(SolveArg::default())) {
        Mode::Solve(arg) => solve::run(&arg)?,
        Mode::BruteForce(arg) => brute_force::run(&arg)?,
    }
    Ok(())
}
