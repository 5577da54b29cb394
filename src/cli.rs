use clap::{Parser, Subcommand};

/// Exact and Monte Carlo analysis of finite Markov chains.
#[derive(Parser)]
#[command(
    name = "chainval",
    version,
    about = "Exact and simulated Markov chain analysis"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Absorption probabilities of the example absorbing chain.
    Absorption(AbsorptionArgs),
    /// Stationary distribution of the example ergodic chain.
    Stationary(StationaryArgs),
}

/// Arguments for the `absorption` subcommand.
#[derive(clap::Args)]
pub struct AbsorptionArgs {
    /// Override the RNG seed.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the number of simulated trajectories.
    #[arg(short = 'n', long)]
    pub trajectories: Option<usize>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `stationary` subcommand.
#[derive(clap::Args)]
pub struct StationaryArgs {
    /// Override the RNG seed.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the number of simulated trajectories.
    #[arg(short = 'n', long)]
    pub trajectories: Option<usize>,

    /// Override the number of transitions per trajectory.
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Override the exponent of the matrix-power method.
    #[arg(short, long)]
    pub power: Option<u32>,

    /// Draw start states proportional to `index + 1` instead of uniformly.
    #[arg(long)]
    pub index_weighted: bool,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}
