use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::warn;

use crate::bio::fasta;
use crate::bio::sequence::Sequence;
use crate::bio::vocabulary::Vocabulary;
use crate::core::config::KernelChoice;
use crate::core::kernel::{Kernel, Mismatch, Spectrum};
use crate::core::kmeans::KMeans;
use crate::report::{self, ClusterReport};

#[derive(Args)]
pub struct ClusterArgs {
    /// Input FASTA file with intergenic/intron/exon records
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// K-mer size for decomposition and vocabulary
    #[arg(short = 's', long, default_value = "2")]
    pub kmer_size: usize,

    /// Kernel to score sequences with (spectrum, mismatch)
    #[arg(long, default_value = "spectrum")]
    pub kernel: String,

    /// Hamming-distance budget for the mismatch kernel
    #[arg(short, long, default_value = "1")]
    pub mismatches: u32,

    /// Number of clusters
    #[arg(short = 'k', long = "clusters", default_value = "2")]
    pub clusters: usize,

    /// Iteration cap for non-convergent runs
    #[arg(long, default_value = "1000")]
    pub limit: usize,

    /// Seed for centroid initialization
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Append the report to this file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

pub fn run(args: ClusterArgs) -> anyhow::Result<()> {
    let corpus = fasta::parse_corpus(&args.input)?;
    let kernel: KernelChoice = args.kernel.parse()?;
    let vocabulary = Vocabulary::from_corpus(&corpus, args.kmer_size);

    let report = match kernel {
        KernelChoice::Spectrum => cluster_corpus(corpus, Spectrum::new(vocabulary), &args),
        KernelChoice::Mismatch => {
            cluster_corpus(corpus, Mismatch::new(vocabulary, args.mismatches), &args)
        }
    };

    let rendered = match args.format.as_str() {
        "json" => report::render_json(&report)?,
        _ => report::render_text(&report),
    };

    match &args.output {
        Some(path) => report::append_report(path, &rendered)?,
        None => print!("{}", rendered),
    }

    Ok(())
}

fn cluster_corpus<K: Kernel>(
    corpus: Vec<Sequence>,
    kernel: K,
    args: &ClusterArgs,
) -> ClusterReport {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut kmeans = KMeans::new(corpus, kernel, args.clusters);
    let outcome = kmeans.run(args.limit, &mut rng);
    if !outcome.converged {
        warn!(
            limit = args.limit,
            "iteration cap reached before convergence"
        );
    }
    kmeans.collect_report()
}
