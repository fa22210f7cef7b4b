//! Isolation Forest (upper tail)
//!
//! Each tree is a subsample plus a fixed run of random (feature, fraction)
//! levels. At a level whose threshold falls at or below the scored record,
//! every subsample member under the threshold is split away from it. A record
//! alone after fewer levels scores higher, so only risk above the bulk counts
//! as anomalous.
//!
//! The random draws never depend on the data, and each threshold is placed in
//! the range of the subsample plus the scored record. Raising a record's
//! features can therefore only shorten its path.
//!
//! Trees are independent: per-tree seeds are drawn up front from the master
//! seed, so sequential and parallel construction give identical forests.

use ndarray::{Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Euler-Mascheroni constant
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Average path length of an unsuccessful BST search over `n` points
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// One split level: feature and position inside that feature's range
#[derive(Debug, Clone, Copy)]
struct Level {
    feature: usize,
    fraction: f64,
}

#[derive(Debug, Clone)]
pub struct IsolationTree {
    /// Training rows in the subsample
    members: Vec<usize>,
    /// Member values, one row per member
    points: Array2<f64>,
    /// Per-feature (min, max) over the members
    bounds: Vec<(f64, f64)>,
    levels: Vec<Level>,
}

impl IsolationTree {
    fn fit(data: &Array2<f64>, members: Vec<usize>, height_limit: usize, rng: &mut StdRng) -> Self {
        let points = data.select(Axis(0), &members);
        let bounds = points
            .columns()
            .into_iter()
            .map(|column| {
                column
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)))
            })
            .collect();

        let d = data.ncols();
        let levels = if d == 0 {
            Vec::new()
        } else {
            (0..height_limit)
                .map(|_| Level {
                    feature: rng.gen_range(0..d),
                    fraction: rng.gen::<f64>(),
                })
                .collect()
        };

        Self {
            members,
            points,
            bounds,
            levels,
        }
    }

    /// Levels until `point` is alone, with the leaf-size correction at the
    /// height limit. `own_row` keeps a training row from shadowing itself.
    pub fn path_length(&self, point: ArrayView1<'_, f64>, own_row: Option<usize>) -> f64 {
        let mut company: Vec<usize> = (0..self.members.len())
            .filter(|m| Some(self.members[*m]) != own_row)
            .collect();

        for (depth, level) in self.levels.iter().enumerate() {
            if company.is_empty() {
                return depth as f64;
            }
            let j = level.feature;
            let value = point[j];
            let (lo, hi) = self.bounds[j];
            let (lo, hi) = (lo.min(value), hi.max(value));
            let threshold = (lo + level.fraction * (hi - lo)).min(hi);

            if value >= threshold {
                company.retain(|m| self.points[[*m, j]] >= threshold);
            }
        }

        let height = self.levels.len() as f64;
        if company.is_empty() {
            height
        } else {
            height + average_path_length(company.len() + 1)
        }
    }
}

// ============================================================================
// FOREST
// ============================================================================

#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    sample_size: usize,
    parallel: bool,
}

impl IsolationForest {
    /// Fit `n_estimators` trees on subsamples of `min(max_samples, n)` rows
    pub fn fit(
        data: &Array2<f64>,
        n_estimators: usize,
        max_samples: usize,
        seed: u64,
        parallel: bool,
    ) -> Self {
        let n = data.nrows();
        let sample_size = max_samples.min(n).max(1);
        let height_limit = (sample_size as f64).log2().ceil().max(1.0) as usize;

        let mut master = StdRng::seed_from_u64(seed);
        let tree_seeds: Vec<u64> = (0..n_estimators).map(|_| master.gen()).collect();

        let build = |tree_seed: &u64| {
            let mut rng = StdRng::seed_from_u64(*tree_seed);
            let members = if sample_size < n {
                sample(&mut rng, n, sample_size).into_vec()
            } else {
                (0..n).collect()
            };
            IsolationTree::fit(data, members, height_limit, &mut rng)
        };

        let trees = if parallel {
            tree_seeds.par_iter().map(build).collect()
        } else {
            tree_seeds.iter().map(build).collect()
        };

        Self {
            trees,
            sample_size,
            parallel,
        }
    }

    /// Anomaly score in (0, 1] of a point outside the training data
    pub fn score(&self, point: ArrayView1<'_, f64>) -> f64 {
        self.score_row(point, None)
    }

    /// Scores of the training rows, each against the other members
    pub fn score_all(&self, data: &Array2<f64>) -> Vec<f64> {
        let score = |i: usize| self.score_row(data.row(i), Some(i));
        if self.parallel {
            (0..data.nrows()).into_par_iter().map(score).collect()
        } else {
            (0..data.nrows()).map(score).collect()
        }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// 2^(-E[h(x)] / c(psi))
    fn score_row(&self, point: ArrayView1<'_, f64>, own_row: Option<usize>) -> f64 {
        if self.trees.is_empty() {
            return 0.5;
        }
        let mean_path = self.trees.iter().map(|t| t.path_length(point, own_row)).sum::<f64>()
            / self.trees.len() as f64;
        let norm = average_path_length(self.sample_size);
        if norm <= 0.0 {
            return 0.5;
        }
        2f64.powf(-mean_path / norm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_average_path_length() {
        assert_eq!(average_path_length(1), 0.0);
        assert_eq!(average_path_length(2), 1.0);
        assert!(average_path_length(256) > average_path_length(16));
    }

    #[test]
    fn test_outlier_scores_highest() {
        let data = array![
            [0.0, 0.0],
            [0.1, 0.0],
            [0.0, 0.1],
            [0.1, 0.1],
            [0.05, 0.05],
            [5.0, 5.0],
        ];
        let forest = IsolationForest::fit(&data, 100, 256, 42, false);
        let scores = forest.score_all(&data);

        let (argmax, _) = scores
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |best, (i, &s)| if s > best.1 { (i, s) } else { best });
        assert_eq!(argmax, 5);
        assert!(scores.iter().all(|s| *s > 0.0 && *s <= 1.0));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let data = array![[0.0, 1.0], [0.3, 0.2], [0.9, 0.4], [0.2, 0.8], [3.0, 3.0]];
        let seq = IsolationForest::fit(&data, 50, 256, 7, false).score_all(&data);
        let par = IsolationForest::fit(&data, 50, 256, 7, true).score_all(&data);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_identical_points_score_equally() {
        let data = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
        let scores = IsolationForest::fit(&data, 10, 256, 1, false).score_all(&data);
        assert!(scores.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_raising_a_row_never_lowers_its_score() {
        for seed in 0..25u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let data = Array2::from_shape_fn((12, 4), |_| rng.gen_range(0.0..1.0));
            let mut raised = data.clone();
            raised.row_mut(5).mapv_inplace(|v| v * 1.2 + 0.05);

            let before = IsolationForest::fit(&data, 50, 256, seed, false).score_all(&data);
            let after = IsolationForest::fit(&raised, 50, 256, seed, false).score_all(&raised);
            assert!(after[5] >= before[5], "seed {}: {} -> {}", seed, before[5], after[5]);
        }
    }

    #[test]
    fn test_new_point_above_the_data_scores_high() {
        let data = array![[0.1, 0.2], [0.2, 0.1], [0.15, 0.15], [0.2, 0.2], [0.1, 0.1]];
        let forest = IsolationForest::fit(&data, 100, 256, 11, false);
        let inliers = forest.score_all(&data);
        let outside = forest.score(array![3.0, 3.0].view());
        assert!(inliers.iter().all(|s| outside > *s));
    }

    #[test]
    fn test_low_outlier_is_not_escalated() {
        let data = array![[0.4, 0.5], [0.5, 0.4], [0.45, 0.45], [0.5, 0.5], [-5.0, -5.0]];
        let scores = IsolationForest::fit(&data, 100, 256, 3, false).score_all(&data);
        let top = scores.iter().copied().fold(f64::MIN, f64::max);
        assert!(scores[4] < top);
    }
}
