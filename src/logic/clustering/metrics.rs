//! Cluster Quality Metrics
//!
//! Silhouette is the selection metric; Calinski-Harabasz is reported for
//! comparison. Both treat every distinct label (noise included) as a group.

use ndarray::Array2;

/// Pairwise Euclidean distances, computed once per batch
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    pub fn euclidean(data: &Array2<f64>) -> Self {
        let n = data.nrows();
        let mut values = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = data
                    .row(i)
                    .iter()
                    .zip(data.row(j).iter())
                    .map(|(a, b)| (a - b).powi(2))
                    .sum::<f64>()
                    .sqrt();
                values[i * n + j] = d;
                values[j * n + i] = d;
            }
        }
        Self { n, values }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Map arbitrary labels to 0..groups in order of first appearance
pub fn dense_labels(labels: &[i32]) -> (Vec<usize>, usize) {
    let mut seen: Vec<i32> = Vec::new();
    let dense = labels
        .iter()
        .map(|l| match seen.iter().position(|s| s == l) {
            Some(p) => p,
            None => {
                seen.push(*l);
                seen.len() - 1
            }
        })
        .collect();
    (dense, seen.len())
}

/// Mean silhouette coefficient.
///
/// `None` when undefined: fewer than 2 groups, or as many groups as points.
pub fn silhouette(labels: &[i32], distances: &DistanceMatrix) -> Option<f64> {
    let n = labels.len();
    let (dense, groups) = dense_labels(labels);
    if groups < 2 || groups >= n {
        return None;
    }

    let mut sizes = vec![0usize; groups];
    for g in &dense {
        sizes[*g] += 1;
    }

    let mut total = 0.0;
    let mut sums = vec![0.0; groups];
    for i in 0..n {
        sums.iter_mut().for_each(|s| *s = 0.0);
        for j in 0..n {
            if i != j {
                sums[dense[j]] += distances.get(i, j);
            }
        }

        let own = dense[i];
        if sizes[own] <= 1 {
            continue;
        }
        let a = sums[own] / (sizes[own] - 1) as f64;
        let b = (0..groups)
            .filter(|g| *g != own)
            .map(|g| sums[g] / sizes[g] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }

    Some(total / n as f64)
}

/// Variance-ratio criterion; 1.0 when within-group dispersion is zero
pub fn calinski_harabasz(data: &Array2<f64>, labels: &[i32]) -> f64 {
    let n = data.nrows();
    let d = data.ncols();
    let (dense, groups) = dense_labels(labels);
    if groups < 2 || groups >= n {
        return 0.0;
    }

    let mut sizes = vec![0usize; groups];
    let mut centroids = Array2::<f64>::zeros((groups, d));
    for (i, g) in dense.iter().enumerate() {
        sizes[*g] += 1;
        for j in 0..d {
            centroids[[*g, j]] += data[[i, j]];
        }
    }
    for g in 0..groups {
        for j in 0..d {
            centroids[[g, j]] /= sizes[g] as f64;
        }
    }

    let overall: Vec<f64> = (0..d).map(|j| data.column(j).sum() / n as f64).collect();

    let extra: f64 = (0..groups)
        .map(|g| sizes[g] as f64 * (0..d).map(|j| (centroids[[g, j]] - overall[j]).powi(2)).sum::<f64>())
        .sum();
    let intra: f64 = dense
        .iter()
        .enumerate()
        .map(|(i, g)| (0..d).map(|j| (data[[i, j]] - centroids[[*g, j]]).powi(2)).sum::<f64>())
        .sum();

    if intra == 0.0 {
        1.0
    } else {
        extra * (n - groups) as f64 / (intra * (groups - 1) as f64)
    }
}
