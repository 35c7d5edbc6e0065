use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{GenoclustError, Result};

/// Ground-truth category of a genomic region, taken from the FASTA record id.
/// Used only for post-hoc cluster statistics, never for assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Intergenic,
    Intron,
    Exon,
}

impl Label {
    /// Label order used wherever statistics are reported.
    pub const ALL: [Label; 3] = [Label::Intergenic, Label::Intron, Label::Exon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Intergenic => "intergenic",
            Label::Intron => "intron",
            Label::Exon => "exon",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = GenoclustError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "intergenic" => Ok(Label::Intergenic),
            "intron" => Ok(Label::Intron),
            "exon" => Ok(Label::Exon),
            _ => Err(GenoclustError::Label(s.to_string())),
        }
    }
}

/// Textual renderings of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// The raw nucleotide string.
    Raw,
    /// Space-separated single nucleotides.
    Bases,
    /// Space-separated k-mers from the last decomposition.
    Kmers,
}

impl FromStr for Representation {
    type Err = GenoclustError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(Representation::Raw),
            "list" => Ok(Representation::Bases),
            "kmers" => Ok(Representation::Kmers),
            _ => Err(GenoclustError::Representation(s.to_string())),
        }
    }
}

/// One labeled nucleotide sequence and its derived k-mer decomposition and
/// feature vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub label: Label,
    raw: String,
    kmers: Vec<String>,
    features: Vec<u32>,
}

impl Sequence {
    pub fn new(raw: impl Into<String>, label: Label) -> Self {
        Self {
            label,
            raw: raw.into(),
            kmers: Vec::new(),
            features: Vec::new(),
        }
    }

    /// Construct from raw parts, parsing the label string.
    pub fn from_parts(raw: &str, label: &str) -> Result<Self> {
        Ok(Self::new(raw, label.parse()?))
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Nucleotide at `position`, or a bounds error past the end.
    pub fn base_at(&self, position: usize) -> Result<char> {
        self.raw
            .as_bytes()
            .get(position)
            .map(|&b| b as char)
            .ok_or(GenoclustError::OutOfRange {
                position,
                length: self.raw.len(),
            })
    }

    /// Slide a window of `size` over the sequence and store every substring.
    pub fn decompose_kmers(&mut self, size: usize) {
        self.kmers = kmers_of(&self.raw, size);
    }

    pub fn kmers(&self) -> &[String] {
        &self.kmers
    }

    pub fn set_features(&mut self, features: Vec<u32>) {
        self.features = features;
    }

    pub fn features(&self) -> &[u32] {
        &self.features
    }

    pub fn render(&self, rep: Representation) -> String {
        match rep {
            Representation::Raw => self.raw.clone(),
            Representation::Bases => {
                let bases: Vec<String> = self.raw.chars().map(String::from).collect();
                bases.join(" ")
            }
            Representation::Kmers => self.kmers.join(" "),
        }
    }
}

/// Every contiguous substring of length `size`, left to right. Empty when
/// `size` is zero or exceeds the sequence length.
pub fn kmers_of(seq: &str, size: usize) -> Vec<String> {
    if size == 0 || size > seq.len() {
        return Vec::new();
    }
    seq.as_bytes()
        .windows(size)
        .map(|w| String::from_utf8_lossy(w).into_owned())
        .collect()
}
