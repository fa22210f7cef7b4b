//! DBSCAN (density family)
//!
//! Works off the shared distance matrix. `min_samples` counts the point
//! itself. Clusters are numbered in discovery order; noise is `NOISE_LABEL`.

use super::metrics::DistanceMatrix;
use super::types::NOISE_LABEL;

#[derive(Debug, Clone, Copy)]
pub struct Dbscan {
    pub eps: f64,
    pub min_samples: usize,
}

impl Dbscan {
    pub fn new(eps: f64, min_samples: usize) -> Self {
        Self { eps, min_samples }
    }

    pub fn fit(&self, distances: &DistanceMatrix) -> Vec<i32> {
        let n = distances.len();
        let neighbours: Vec<Vec<usize>> = (0..n)
            .map(|i| (0..n).filter(|&j| distances.get(i, j) <= self.eps).collect())
            .collect();
        let is_core: Vec<bool> = neighbours.iter().map(|nb| nb.len() >= self.min_samples).collect();

        let mut labels = vec![NOISE_LABEL; n];
        let mut visited = vec![false; n];
        let mut cluster = 0;

        for start in 0..n {
            if visited[start] || !is_core[start] {
                continue;
            }

            visited[start] = true;
            labels[start] = cluster;
            let mut frontier = vec![start];

            while let Some(point) = frontier.pop() {
                for &next in &neighbours[point] {
                    if labels[next] == NOISE_LABEL {
                        labels[next] = cluster;
                    }
                    if !visited[next] && is_core[next] {
                        visited[next] = true;
                        frontier.push(next);
                    }
                }
            }

            cluster += 1;
        }

        labels
    }
}

/// Number of non-noise clusters in a labelling
pub fn cluster_count(labels: &[i32]) -> usize {
    let mut seen: Vec<i32> = labels.iter().copied().filter(|l| *l != NOISE_LABEL).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}
