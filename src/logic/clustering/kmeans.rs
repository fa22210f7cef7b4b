//! K-Means (partition family)
//!
//! k-means++ seeding, Lloyd iterations, best-of-`n_init` by inertia.

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Relative convergence tolerance on centroid movement
const TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct KMeans {
    pub k: usize,
    pub n_init: usize,
    pub max_iter: usize,
    pub seed: u64,
}

#[derive(Debug, Clone)]
pub struct KMeansFit {
    pub labels: Vec<usize>,
    pub centroids: Array2<f64>,
    pub inertia: f64,
}

fn sq_dist(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

impl KMeans {
    pub fn new(k: usize, n_init: usize, max_iter: usize, seed: u64) -> Self {
        Self { k, n_init, max_iter, seed }
    }

    /// Caller guarantees 1 <= k <= n
    pub fn fit(&self, data: &Array2<f64>) -> KMeansFit {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let tol = TOLERANCE * mean_variance(data);

        let mut best: Option<KMeansFit> = None;
        for _ in 0..self.n_init.max(1) {
            let init = self.plus_plus(data, &mut rng);
            let fit = self.lloyd(data, init, tol);
            if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
                best = Some(fit);
            }
        }

        match best {
            Some(fit) => fit,
            None => self.lloyd(data, self.plus_plus(data, &mut rng), tol),
        }
    }

    fn plus_plus(&self, data: &Array2<f64>, rng: &mut StdRng) -> Array2<f64> {
        let n = data.nrows();
        let mut centroids = Array2::zeros((self.k, data.ncols()));

        let first = rng.gen_range(0..n);
        centroids.row_mut(0).assign(&data.row(first));

        let mut closest: Vec<f64> = (0..n).map(|i| sq_dist(data.row(i), data.row(first))).collect();

        for c in 1..self.k {
            let total: f64 = closest.iter().sum();
            let pick = if total > 0.0 {
                let target = rng.gen::<f64>() * total;
                let mut acc = 0.0;
                closest
                    .iter()
                    .position(|d| {
                        acc += d;
                        acc > target
                    })
                    .unwrap_or(n - 1)
            } else {
                rng.gen_range(0..n)
            };

            centroids.row_mut(c).assign(&data.row(pick));
            for (i, d) in closest.iter_mut().enumerate() {
                *d = d.min(sq_dist(data.row(i), data.row(pick)));
            }
        }

        centroids
    }

    fn lloyd(&self, data: &Array2<f64>, mut centroids: Array2<f64>, tol: f64) -> KMeansFit {
        let (n, d) = (data.nrows(), data.ncols());
        let mut labels = assign(data, &centroids);

        for _ in 0..self.max_iter {
            let mut sums = Array2::<f64>::zeros((self.k, d));
            let mut counts = vec![0usize; self.k];
            for (i, &l) in labels.iter().enumerate() {
                counts[l] += 1;
                let mut row = sums.row_mut(l);
                row += &data.row(i);
            }

            let mut updated = centroids.clone();
            let mut taken: Vec<usize> = Vec::new();
            for c in 0..self.k {
                if counts[c] > 0 {
                    let mut row = updated.row_mut(c);
                    row.assign(&sums.row(c));
                    row /= counts[c] as f64;
                } else {
                    // Empty cluster: move it to the point farthest from its centroid
                    let far = (0..n)
                        .filter(|i| !taken.contains(i))
                        .max_by(|&a, &b| {
                            let da = sq_dist(data.row(a), centroids.row(labels[a]));
                            let db = sq_dist(data.row(b), centroids.row(labels[b]));
                            da.total_cmp(&db).then(b.cmp(&a))
                        })
                        .unwrap_or(0);
                    taken.push(far);
                    updated.row_mut(c).assign(&data.row(far));
                }
            }

            let shift: f64 = (0..self.k)
                .map(|c| sq_dist(updated.row(c), centroids.row(c)))
                .sum();
            centroids = updated;
            let next = assign(data, &centroids);
            let stable = next == labels;
            labels = next;

            if stable || shift <= tol {
                break;
            }
        }

        let inertia = labels
            .iter()
            .enumerate()
            .map(|(i, &l)| sq_dist(data.row(i), centroids.row(l)))
            .sum();

        KMeansFit { labels, centroids, inertia }
    }
}

/// Nearest centroid per row; ties go to the lower index
pub fn assign(data: &Array2<f64>, centroids: &Array2<f64>) -> Vec<usize> {
    data.rows()
        .into_iter()
        .map(|row| {
            let mut best = (0, f64::INFINITY);
            for (c, centroid) in centroids.rows().into_iter().enumerate() {
                let d = sq_dist(row, centroid);
                if d < best.1 {
                    best = (c, d);
                }
            }
            best.0
        })
        .collect()
}

fn mean_variance(data: &Array2<f64>) -> f64 {
    let n = data.nrows().max(1) as f64;
    let d = data.ncols().max(1) as f64;
    data.columns()
        .into_iter()
        .map(|col| {
            let mean = col.sum() / n;
            col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
        })
        .sum::<f64>()
        / d
}
