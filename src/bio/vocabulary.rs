use indexmap::IndexSet;

use crate::bio::sequence::{kmers_of, Sequence};

/// Ordered set of distinct k-mers across a corpus.
///
/// Entry `i` is the k-mer scored at index `i` of every feature vector built
/// against this vocabulary. Insertion order is first-seen order and stays
/// stable for the lifetime of the vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: IndexSet<String>,
    kmer_size: usize,
}

impl Vocabulary {
    /// Collect the distinct k-mers of the given size over a whole corpus.
    pub fn from_corpus(corpus: &[Sequence], kmer_size: usize) -> Self {
        let mut entries = IndexSet::new();
        for seq in corpus {
            for kmer in kmers_of(seq.raw(), kmer_size) {
                entries.insert(kmer);
            }
        }
        Self { entries, kmer_size }
    }

    pub fn from_kmers<I, S>(kmers: I, kmer_size: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: kmers.into_iter().map(Into::into).collect(),
            kmer_size,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn kmer_size(&self) -> usize {
        self.kmer_size
    }

    pub fn index_of(&self, kmer: &str) -> Option<usize> {
        self.entries.get_index_of(kmer)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get_index(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bio::sequence::Label;

    #[test]
    fn test_first_seen_order() {
        let corpus = vec![
            Sequence::new("ATTA", Label::Exon),
            Sequence::new("TAAT", Label::Intron),
        ];
        let vocab = Vocabulary::from_corpus(&corpus, 2);
        let entries: Vec<&str> = vocab.iter().collect();
        assert_eq!(entries, vec!["AT", "TT", "TA", "AA"]);
        assert_eq!(vocab.index_of("TA"), Some(2));
        assert_eq!(vocab.get(0), Some("AT"));
    }

    #[test]
    fn test_deduplicates_across_sequences() {
        let corpus = vec![
            Sequence::new("AAAA", Label::Exon),
            Sequence::new("AAAA", Label::Exon),
        ];
        let vocab = Vocabulary::from_corpus(&corpus, 2);
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_oversized_kmers_yield_empty_vocabulary() {
        let corpus = vec![Sequence::new("AT", Label::Exon)];
        let vocab = Vocabulary::from_corpus(&corpus, 5);
        assert!(vocab.is_empty());
    }
}
