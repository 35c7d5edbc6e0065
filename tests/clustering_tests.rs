//! End-to-end clustering tests over the public API: corpus in, report out.

use genoclust::bio::fasta::parse_corpus_from_bytes;
use genoclust::bio::sequence::{Label, Sequence};
use genoclust::bio::vocabulary::Vocabulary;
use genoclust::core::kmeans::KMeans;
use genoclust::report::{append_report, render_text};
use genoclust::{Mismatch, Spectrum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

fn four_sequence_corpus() -> Vec<Sequence> {
    vec![
        Sequence::new("AAAA", Label::Exon),
        Sequence::new("AAAT", Label::Exon),
        Sequence::new("TTTT", Label::Intron),
        Sequence::new("TTTA", Label::Intergenic),
    ]
}

#[test]
fn test_spectrum_run_terminates_and_fractions_sum() {
    let corpus = four_sequence_corpus();
    let vocabulary = Vocabulary::from_corpus(&corpus, 1);
    assert_eq!(vocabulary.len(), 2);

    let mut kmeans = KMeans::new(corpus, Spectrum::new(vocabulary), 2);
    let outcome = kmeans.run(1000, &mut StdRng::seed_from_u64(42));
    assert!(outcome.iterations <= 1000);

    let report = kmeans.collect_report();
    assert_eq!(report.kernel, "SPECTRUM KERNEL");
    assert_eq!(report.kmer_size, 1);
    assert_eq!(report.clusters, 2);
    assert_eq!(report.cluster_stats.len(), 2);

    for stats in &report.cluster_stats {
        let total_members: usize = stats.iter().map(|s| s.count).sum();
        let fraction_sum: f64 = stats.iter().map(|s| s.fraction).sum();
        if total_members == 0 {
            assert_eq!(fraction_sum, 0.0);
        } else {
            assert!(
                (fraction_sum - 1.0).abs() <= 0.01,
                "fractions summed to {}",
                fraction_sum
            );
        }
    }

    // Every sequence is assigned to exactly one cluster
    let assigned: usize = report
        .cluster_stats
        .iter()
        .flat_map(|stats| stats.iter().map(|s| s.count))
        .sum();
    assert_eq!(assigned, 4);
}

#[test]
fn test_mismatch_run_terminates() {
    let corpus = four_sequence_corpus();
    let vocabulary = Vocabulary::from_corpus(&corpus, 2);
    let mut kmeans = KMeans::new(corpus, Mismatch::new(vocabulary, 1), 3);
    let outcome = kmeans.run(1000, &mut StdRng::seed_from_u64(42));
    assert!(outcome.converged || outcome.iterations == 1000);
    assert_eq!(kmeans.collect_report().cluster_stats.len(), 3);
}

#[test]
fn test_fasta_to_report_pipeline() {
    let fasta = b">exon\nAAAA\n>exon\nAAAT\n>intron\nTTTT\n>intergenic\nTTTA\n";
    let corpus = parse_corpus_from_bytes(fasta).unwrap();
    assert_eq!(corpus.len(), 4);

    let vocabulary = Vocabulary::from_corpus(&corpus, 1);
    let mut kmeans = KMeans::new(corpus, Spectrum::new(vocabulary), 2);
    kmeans.run(1000, &mut StdRng::seed_from_u64(42));

    let rendered = render_text(&kmeans.collect_report());
    assert!(rendered.starts_with("SPECTRUM KERNEL (KMER=1, CLUSTERS=2):\n"));
    assert!(rendered.contains("Cluster 1\n"));
    assert!(rendered.contains("Cluster 2\n"));
    assert!(rendered.contains("\tintergenic = "));
    assert!(rendered.contains("\tintron = "));
    assert!(rendered.contains("\texon = "));
}

#[test]
fn test_reports_append_to_one_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kmeans.txt");

    let corpus = four_sequence_corpus();
    let vocabulary = Vocabulary::from_corpus(&corpus, 1);
    let mut kmeans = KMeans::new(corpus, Spectrum::new(vocabulary), 2);
    kmeans.run(1000, &mut StdRng::seed_from_u64(42));
    let rendered = render_text(&kmeans.collect_report());

    append_report(&path, &rendered).unwrap();
    append_report(&path, &rendered).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.matches("SPECTRUM KERNEL").count(), 2);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = |seed: u64| {
        let corpus = four_sequence_corpus();
        let vocabulary = Vocabulary::from_corpus(&corpus, 1);
        let mut kmeans = KMeans::new(corpus, Spectrum::new(vocabulary), 2);
        kmeans.run(1000, &mut StdRng::seed_from_u64(seed));
        render_text(&kmeans.collect_report())
    };
    assert_eq!(run(9), run(9));
}
