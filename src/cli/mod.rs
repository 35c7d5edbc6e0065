pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "genoclust",
    version,
    about = "Kernel K-Means clustering for labeled DNA sequences",
    long_about = "Genoclust groups intergenic, intron, and exon sequences into k clusters \
                  with a K-Means variant that scores similarity as a dot product over \
                  spectrum or mismatch k-mer feature vectors."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = all available)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub threads: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cluster a FASTA corpus with one parameter set
    Cluster(commands::cluster::ClusterArgs),

    /// Sweep kernel, k-mer size, and cluster count combinations
    Sweep(commands::sweep::SweepArgs),
}
