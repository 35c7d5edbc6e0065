use clap::Parser;
use colored::*;
use genoclust::cli::{Cli, Commands};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging with GENOCLUST_LOG environment variable support
    let log_level = std::env::var("GENOCLUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<genoclust::GenoclustError>() {
            Some(genoclust::GenoclustError::Config(_)) => 2,
            Some(genoclust::GenoclustError::Io(_)) => 3,
            Some(genoclust::GenoclustError::Parse(_))
            | Some(genoclust::GenoclustError::Label(_))
            | Some(genoclust::GenoclustError::Representation(_)) => 4,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let num_threads = if cli.threads == 0 {
        num_cpus::get()
    } else {
        cli.threads
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .expect("Failed to initialize thread pool");

    if cli.verbose > 0 {
        eprintln!("Using {} threads", num_threads);
    }

    match cli.command {
        Commands::Cluster(args) => genoclust::cli::commands::cluster::run(args),
        Commands::Sweep(args) => genoclust::cli::commands::sweep::run(args),
    }
}
