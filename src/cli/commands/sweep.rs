use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;

use crate::bio::fasta;
use crate::bio::sequence::Sequence;
use crate::bio::vocabulary::Vocabulary;
use crate::core::config::{self, KernelChoice, SweepConfig};
use crate::core::kernel::{Kernel, Mismatch, Spectrum};
use crate::core::kmeans::KMeans;
use crate::report;

#[derive(Args)]
pub struct SweepArgs {
    /// Input FASTA file with intergenic/intron/exon records
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Report file; every combination is appended to it
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Sweep parameters from a TOML config (defaults otherwise)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: SweepArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => SweepConfig::default(),
    };

    let corpus = fasta::parse_corpus(&args.input)?;
    info!(
        sequences = corpus.len(),
        combinations = config.combinations(),
        "starting sweep"
    );

    // Replace any report left by a previous sweep
    if args.output.exists() {
        std::fs::remove_file(&args.output)?;
    }

    let pb = ProgressBar::new(config.combinations() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    for &size in &config.kmer_sizes {
        let vocabulary = Vocabulary::from_corpus(&corpus, size);
        for &kernel in &config.kernels {
            for &k in &config.cluster_counts {
                pb.set_message(format!("{} KMER={} k={}", kernel, size, k));
                let report = match kernel {
                    KernelChoice::Spectrum => {
                        run_combination(corpus.clone(), Spectrum::new(vocabulary.clone()), k, &config)
                    }
                    KernelChoice::Mismatch => run_combination(
                        corpus.clone(),
                        Mismatch::new(vocabulary.clone(), config.mismatches),
                        k,
                        &config,
                    ),
                };
                report::append_report(&args.output, &report::render_text(&report))?;
                pb.inc(1);
            }
        }
    }

    pb.finish_with_message(format!("Report written to {}", args.output.display()));
    Ok(())
}

fn run_combination<K: Kernel>(
    corpus: Vec<Sequence>,
    kernel: K,
    k: usize,
    config: &SweepConfig,
) -> report::ClusterReport {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut kmeans = KMeans::new(corpus, kernel, k);
    kmeans.run(config.iteration_limit, &mut rng);
    kmeans.collect_report()
}
