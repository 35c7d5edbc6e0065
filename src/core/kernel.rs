use indexmap::IndexMap;

use crate::bio::vocabulary::Vocabulary;

pub const SPECTRUM_NAME: &str = "SPECTRUM KERNEL";
pub const MISMATCH_NAME: &str = "MISMATCH KERNEL";

/// Similarity kernel over k-mer feature vectors.
///
/// A kernel owns the vocabulary that fixes feature-vector dimensionality:
/// index `i` of every vector it produces scores `vocabulary[i]`. Only the
/// concrete variants ([`Spectrum`], [`Mismatch`]) are constructible.
pub trait Kernel: Send + Sync {
    fn name(&self) -> &str;

    fn vocabulary(&self) -> &Vocabulary;

    fn kmer_size(&self) -> usize {
        self.vocabulary().kmer_size()
    }

    /// Score every vocabulary entry against the given k-mer list. The result
    /// has one entry per vocabulary k-mer, in vocabulary order.
    fn compute_feature_vector(&self, kmers: &[String]) -> Vec<u32>;

    /// Pair each vocabulary entry with its score, in vocabulary order.
    fn feature_dict(&self, features: &[u32]) -> IndexMap<String, u32> {
        self.vocabulary()
            .iter()
            .map(String::from)
            .zip(features.iter().copied())
            .collect()
    }
}

/// Elementwise product sum of two equal-length vectors.
///
/// Raw dot product, not cosine similarity: the magnitude scales with
/// sequence length and k-mer redundancy.
pub fn dot_product<A, B>(v1: &[A], v2: &[B]) -> f64
where
    A: Copy + Into<f64>,
    B: Copy + Into<f64>,
{
    v1.iter()
        .zip(v2.iter())
        .map(|(&a, &b)| a.into() * b.into())
        .sum()
}

/// Exact-match kernel: each vocabulary entry scores its multiplicity in the
/// input k-mer list.
#[derive(Debug, Clone)]
pub struct Spectrum {
    vocabulary: Vocabulary,
}

impl Spectrum {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }
}

impl Kernel for Spectrum {
    fn name(&self) -> &str {
        SPECTRUM_NAME
    }

    fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn compute_feature_vector(&self, kmers: &[String]) -> Vec<u32> {
        let mut v = vec![0u32; self.vocabulary.len()];
        for kmer in kmers {
            if let Some(i) = self.vocabulary.index_of(kmer) {
                v[i] += 1;
            }
        }
        v
    }
}

/// Approximate-match kernel: each vocabulary entry scores the number of
/// input k-mers within `budget` mismatches of it.
#[derive(Debug, Clone)]
pub struct Mismatch {
    vocabulary: Vocabulary,
    budget: u32,
}

impl Mismatch {
    pub fn new(vocabulary: Vocabulary, budget: u32) -> Self {
        Self { vocabulary, budget }
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }
}

impl Kernel for Mismatch {
    fn name(&self) -> &str {
        MISMATCH_NAME
    }

    fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn compute_feature_vector(&self, kmers: &[String]) -> Vec<u32> {
        self.vocabulary
            .iter()
            .map(|entry| {
                kmers
                    .iter()
                    .filter(|kmer| {
                        kmer.len() == entry.len() && hamming_distance(kmer, entry) <= self.budget
                    })
                    .count() as u32
            })
            .collect()
    }
}

/// Position-wise character inequality count. Only meaningful for
/// equal-length strings; callers guard the lengths.
fn hamming_distance(a: &str, b: &str) -> u32 {
    a.bytes().zip(b.bytes()).filter(|(x, y)| x != y).count() as u32
}
