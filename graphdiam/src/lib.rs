//! # `graphdiam` - crate for unweighted graph diameter
//!
//! Graphs are built edge by edge into an [`AdjacencyGraph`], converted once
//! into a BFS-ordered compact [`Graph`], and then queried with a parallel
//! all-sources BFS. Includes utilities for reading and writing
//! whitespace-delimited plaintext edge lists.

use std::collections::HashMap;

use ordered_float::NotNan;

pub mod adjacency;
pub mod diameter;
mod error;
pub mod graph;
pub mod graphio;
pub mod queue;
pub mod reorder;
mod scanner;
pub mod symbols;

pub use adjacency::AdjacencyGraph;
pub use diameter::{diameter, eccentricities};
pub use error::Error;
pub use graph::{to_compact, Graph, Vertex};
pub use scanner::Scanner;
pub use symbols::{GraphBuilder, SymbolTable};

const NSTAT_PERCENTILES: usize = 11;
const STAT_PERCENTILES: [f64; NSTAT_PERCENTILES] = [
    0.0, 0.001, 0.01, 0.05, 0.10, 0.50, 0.90, 0.95, 0.99, 0.999, 1.0,
];

pub struct SummaryStats {
    mean: f64,
    percentiles: [f64; NSTAT_PERCENTILES],
}

impl SummaryStats {
    /// `None` if there are no non-NaN values to summarize.
    pub fn from(it: impl Iterator<Item = f64>) -> Option<Self> {
        let mut v: Vec<NotNan<f64>> = it.filter_map(|f| NotNan::new(f).ok()).collect();
        if v.is_empty() {
            return None;
        }
        v.sort_unstable();
        let mut stats = SummaryStats {
            mean: v.iter().map(|f| f.into_inner()).sum::<f64>() / v.len() as f64,
            percentiles: Default::default(),
        };
        STAT_PERCENTILES
            .iter()
            .copied()
            .map(|f| v[((v.len() - 1) as f64 * f) as usize].into_inner())
            .zip(stats.percentiles.iter_mut())
            .for_each(|(val, p)| *p = val);
        Some(stats)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn max(&self) -> f64 {
        self.percentiles[NSTAT_PERCENTILES - 1]
    }

    pub fn to_map(&self) -> HashMap<String, f64> {
        let mut map: HashMap<_, _> = STAT_PERCENTILES
            .iter()
            .map(|f| format!("p{:.3}", f))
            .zip(self.percentiles.iter().copied())
            .collect();
        map.insert("mean".to_string(), self.mean);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_stats() {
        let stats = SummaryStats::from((1..=5).map(f64::from)).unwrap();
        assert_eq!(stats.mean(), 3.0);
        assert_eq!(stats.max(), 5.0);
        let map = stats.to_map();
        assert_eq!(map["p0.000"], 1.0);
        assert_eq!(map["p0.500"], 3.0);
        assert_eq!(map["p1.000"], 5.0);
        assert_eq!(map["mean"], 3.0);
    }

    #[test]
    fn test_summary_stats_empty() {
        assert!(SummaryStats::from(std::iter::empty()).is_none());
        assert!(SummaryStats::from(std::iter::once(f64::NAN)).is_none());
    }
}
