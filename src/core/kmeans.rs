use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::bio::sequence::Sequence;
use crate::core::cluster::Cluster;
use crate::core::kernel::{dot_product, Kernel};
use crate::report::ClusterReport;

/// How a clustering run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// True when every centroid was unchanged from the prior iteration;
    /// false when the iteration cap cut the run short.
    pub converged: bool,
    pub iterations: usize,
}

/// K-Means orchestrator: owns the corpus, the kernel, and the clusters, and
/// drives the assign / update / converge loop.
pub struct KMeans<K: Kernel> {
    corpus: Vec<Sequence>,
    kernel: K,
    k: usize,
    clusters: Vec<Cluster>,
}

impl<K: Kernel> KMeans<K> {
    pub fn new(corpus: Vec<Sequence>, kernel: K, k: usize) -> Self {
        Self {
            corpus,
            kernel,
            k,
            clusters: Vec::new(),
        }
    }

    pub fn corpus(&self) -> &[Sequence] {
        &self.corpus
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Decompose every sequence at the kernel's k-mer size and compute its
    /// feature vector. Sequences are independent, so this fans out over the
    /// rayon pool.
    fn init_sequences(&mut self) {
        let size = self.kernel.kmer_size();
        let kernel = &self.kernel;
        self.corpus.par_iter_mut().for_each(|seq| {
            seq.decompose_kmers(size);
            let features = kernel.compute_feature_vector(seq.kmers());
            seq.set_features(features);
        });
    }

    fn init_clusters<R: Rng>(&mut self, rng: &mut R) {
        let dimension = self.kernel.vocabulary().len();
        self.clusters = (0..self.k)
            .map(|_| {
                let mut cluster = Cluster::new();
                cluster.seed(dimension, rng);
                cluster
            })
            .collect();
    }

    /// Winning cluster for one sequence: maximal dot product against the
    /// centroids, ties going to the highest cluster index.
    fn choose_cluster(&self, seq: &Sequence) -> usize {
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, cluster) in self.clusters.iter().enumerate() {
            let score = dot_product(seq.features(), cluster.centroid());
            if score >= best_score {
                best = i;
                best_score = score;
            }
        }
        best
    }

    /// Assign phase. Each sequence's choice reads only the centroids, so the
    /// choices are computed in parallel and merged into membership lists
    /// single-threaded afterwards.
    fn assign_sequences(&mut self) {
        let choices: Vec<usize> = self
            .corpus
            .par_iter()
            .map(|seq| self.choose_cluster(seq))
            .collect();
        for (index, choice) in choices.into_iter().enumerate() {
            self.clusters[choice].add_member(index);
        }
    }

    /// Update phase: every cluster logs its centroid, then recomputes it
    /// from the new membership. Runs after the whole assign phase finishes.
    fn update_clusters(&mut self) {
        for cluster in &mut self.clusters {
            cluster.record_centroid();
            cluster.recompute_centroid(&self.corpus);
        }
    }

    fn clear_clusters(&mut self) {
        for cluster in &mut self.clusters {
            cluster.clear_members();
        }
    }

    fn all_converged(&self) -> bool {
        self.clusters.iter().all(Cluster::has_converged)
    }

    /// Prepare sequences and seed `k` cluster centroids.
    pub fn init<R: Rng>(&mut self, rng: &mut R) {
        self.init_sequences();
        self.init_clusters(rng);
    }

    /// Run the clustering loop until every centroid holds still or the
    /// iteration cap is reached. The cap is a safety bound, not an error.
    pub fn run<R: Rng>(&mut self, limit: usize, rng: &mut R) -> RunOutcome {
        self.init(rng);
        let mut iterations = 0;
        while !self.all_converged() && iterations < limit {
            self.clear_clusters();
            self.assign_sequences();
            self.update_clusters();
            iterations += 1;
            debug!(iteration = iterations, "centroids updated");
        }
        let outcome = RunOutcome {
            converged: self.all_converged(),
            iterations,
        };
        info!(
            kernel = self.kernel.name(),
            k = self.k,
            iterations = outcome.iterations,
            converged = outcome.converged,
            "clustering finished"
        );
        outcome
    }

    /// Per-cluster label statistics plus kernel metadata, for the report
    /// formatters.
    pub fn collect_report(&self) -> ClusterReport {
        ClusterReport {
            kernel: self.kernel.name().to_string(),
            kmer_size: self.kernel.kmer_size(),
            clusters: self.k,
            cluster_stats: self
                .clusters
                .iter()
                .map(|c| c.membership_stats(&self.corpus))
                .collect(),
        }
    }
}
