//! Constellation edges: each star links to its nearest same-category star
//! within a fixed threshold; one edge per unordered pair.
//!
//! The neighbor search is O(n²) per category, fanned out across stars with
//! rayon. Deduplication runs sequentially in star order so the edge list is
//! deterministic.

use std::collections::HashSet;

use rayon::prelude::*;

use super::Star;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstellationEdge {
    /// Lower star index.
    pub a: usize,
    /// Higher star index.
    pub b: usize,
    /// Cluster both stars belong to (drives the line color).
    pub cluster: usize,
}

/// Nearest same-cluster neighbor of every star, if within `threshold`.
pub fn nearest_neighbors(stars: &[Star], threshold: f32) -> Vec<Option<usize>> {
    let limit = threshold * threshold;
    stars
        .par_iter()
        .enumerate()
        .map(|(i, star)| {
            stars
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && other.cluster == star.cluster)
                .map(|(j, other)| (j, star.position.distance_squared(other.position)))
                .filter(|&(_, d)| d <= limit)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(j, _)| j)
        })
        .collect()
}

pub fn link(stars: &[Star], threshold: f32) -> Vec<ConstellationEdge> {
    let nearest = nearest_neighbors(stars, threshold);
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for (i, neighbor) in nearest.into_iter().enumerate() {
        let Some(j) = neighbor else { continue };
        let key = (i.min(j), i.max(j));
        if seen.insert(key) {
            edges.push(ConstellationEdge {
                a: key.0,
                b: key.1,
                cluster: stars[i].cluster,
            });
        }
    }
    edges
}
