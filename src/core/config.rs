use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::{GenoclustError, Result};

/// Kernel selector shared by the CLI and the sweep config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelChoice {
    Spectrum,
    Mismatch,
}

impl fmt::Display for KernelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelChoice::Spectrum => f.write_str("spectrum"),
            KernelChoice::Mismatch => f.write_str("mismatch"),
        }
    }
}

impl FromStr for KernelChoice {
    type Err = GenoclustError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "spectrum" => Ok(KernelChoice::Spectrum),
            "mismatch" => Ok(KernelChoice::Mismatch),
            _ => Err(GenoclustError::Config(format!("Unknown kernel: {}", s))),
        }
    }
}

/// Parameter grid for a sweep run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub kmer_sizes: Vec<usize>,
    pub kernels: Vec<KernelChoice>,
    pub cluster_counts: Vec<usize>,
    pub mismatches: u32,
    pub iteration_limit: usize,
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            kmer_sizes: vec![2, 6],
            kernels: vec![KernelChoice::Spectrum, KernelChoice::Mismatch],
            cluster_counts: vec![2, 3, 5],
            mismatches: 1,
            iteration_limit: 1000,
            seed: 42,
        }
    }
}

impl SweepConfig {
    /// Number of parameter combinations the sweep will run.
    pub fn combinations(&self) -> usize {
        self.kmer_sizes.len() * self.kernels.len() * self.cluster_counts.len()
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SweepConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config: SweepConfig = toml::from_str(&contents)
        .map_err(|e| GenoclustError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &SweepConfig) -> Result<()> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| GenoclustError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_kernel_choice_parsing() {
        assert_eq!(
            "spectrum".parse::<KernelChoice>().unwrap(),
            KernelChoice::Spectrum
        );
        assert_eq!(
            "MISMATCH".parse::<KernelChoice>().unwrap(),
            KernelChoice::Mismatch
        );
        assert!("euclidean".parse::<KernelChoice>().is_err());
    }

    #[test]
    fn test_default_combinations() {
        assert_eq!(SweepConfig::default().combinations(), 12);
    }

    #[test]
    fn test_config_round_trip() {
        let file = NamedTempFile::new().unwrap();
        let config = SweepConfig {
            kmer_sizes: vec![3],
            kernels: vec![KernelChoice::Mismatch],
            cluster_counts: vec![4],
            mismatches: 2,
            iteration_limit: 50,
            seed: 7,
        };
        save_config(file.path(), &config).unwrap();
        let loaded = load_config(file.path()).unwrap();
        assert_eq!(loaded.kmer_sizes, vec![3]);
        assert_eq!(loaded.kernels, vec![KernelChoice::Mismatch]);
        assert_eq!(loaded.cluster_counts, vec![4]);
        assert_eq!(loaded.mismatches, 2);
        assert_eq!(loaded.iteration_limit, 50);
        assert_eq!(loaded.seed, 7);
    }
}
