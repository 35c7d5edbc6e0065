use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::core::cluster::LabelStat;
use crate::{GenoclustError, Result};

/// Per-cluster label statistics plus the kernel metadata that headed the
/// run. Produced by the orchestrator, consumed by the text/JSON formatters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterReport {
    pub kernel: String,
    pub kmer_size: usize,
    pub clusters: usize,
    pub cluster_stats: Vec<Vec<LabelStat>>,
}

/// Render the flat text format:
///
/// ```text
/// SPECTRUM KERNEL (KMER=2, CLUSTERS=2):
/// Cluster 1
///     intergenic = 0.5 (1)
///     ...
/// ```
pub fn render_text(report: &ClusterReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} (KMER={}, CLUSTERS={}):\n",
        report.kernel, report.kmer_size, report.clusters
    ));
    for (i, stats) in report.cluster_stats.iter().enumerate() {
        out.push_str(&format!("Cluster {}\n", i + 1));
        for stat in stats {
            out.push_str(&format!(
                "\t{} = {} ({})\n",
                stat.label,
                format_fraction(stat.fraction),
                stat.count
            ));
        }
    }
    out
}

pub fn render_json(report: &ClusterReport) -> Result<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| GenoclustError::Parse(format!("Failed to serialize report: {}", e)))
}

/// Append a rendered report to a file, creating it if needed. Sweeps stack
/// every parameter combination into one file this way.
pub fn append_report<P: AsRef<Path>>(path: P, rendered: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;
    file.write_all(rendered.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Fractions are already rounded to two decimals; print them without
/// trailing zeros but always with a decimal point (0.5, 0.33, 1.0).
fn format_fraction(fraction: f64) -> String {
    let s = format!("{:.2}", fraction);
    let trimmed = s.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bio::sequence::Label;
    use pretty_assertions::assert_eq;

    fn stat(label: Label, fraction: f64, count: usize) -> LabelStat {
        LabelStat {
            label,
            fraction,
            count,
        }
    }

    #[test]
    fn test_format_fraction() {
        assert_eq!(format_fraction(0.5), "0.5");
        assert_eq!(format_fraction(0.33), "0.33");
        assert_eq!(format_fraction(1.0), "1.0");
        assert_eq!(format_fraction(0.0), "0.0");
    }

    #[test]
    fn test_render_text_format() {
        let report = ClusterReport {
            kernel: "SPECTRUM KERNEL".to_string(),
            kmer_size: 2,
            clusters: 2,
            cluster_stats: vec![
                vec![
                    stat(Label::Intergenic, 0.0, 0),
                    stat(Label::Intron, 0.33, 1),
                    stat(Label::Exon, 0.67, 2),
                ],
                vec![
                    stat(Label::Intergenic, 1.0, 1),
                    stat(Label::Intron, 0.0, 0),
                    stat(Label::Exon, 0.0, 0),
                ],
            ],
        };
        let expected = "SPECTRUM KERNEL (KMER=2, CLUSTERS=2):\n\
                        Cluster 1\n\
                        \tintergenic = 0.0 (0)\n\
                        \tintron = 0.33 (1)\n\
                        \texon = 0.67 (2)\n\
                        Cluster 2\n\
                        \tintergenic = 1.0 (1)\n\
                        \tintron = 0.0 (0)\n\
                        \texon = 0.0 (0)\n";
        assert_eq!(render_text(&report), expected);
    }

    #[test]
    fn test_json_round_trip() {
        let report = ClusterReport {
            kernel: "MISMATCH KERNEL".to_string(),
            kmer_size: 3,
            clusters: 1,
            cluster_stats: vec![vec![stat(Label::Exon, 1.0, 4)]],
        };
        let json = render_json(&report).unwrap();
        let back: ClusterReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kernel, report.kernel);
        assert_eq!(back.cluster_stats.len(), 1);
        assert_eq!(back.cluster_stats[0][0].count, 4);
    }
}
