//! Gaussian Mixture (mixture family)
//!
//! Full-covariance EM. Responsibilities start from a seeded k-means
//! labelling; labels are the argmax responsibility after the last M-step.

use ndarray::{Array1, Array2, Axis};

use super::kmeans::KMeans;

/// Added to covariance diagonals to keep them positive definite
const REG_COVAR: f64 = 1e-6;
/// Convergence tolerance on the per-sample lower bound
const TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone)]
pub struct GaussianMixture {
    pub components: usize,
    pub max_iter: usize,
    pub seed: u64,
}

struct Params {
    log_weights: Vec<f64>,
    means: Array2<f64>,
    /// Lower Cholesky factor per component
    chol: Vec<Array2<f64>>,
}

impl GaussianMixture {
    pub fn new(components: usize, max_iter: usize, seed: u64) -> Self {
        Self { components, max_iter, seed }
    }

    /// `None` when a covariance stops being positive definite
    pub fn fit_predict(&self, data: &Array2<f64>) -> Option<Vec<usize>> {
        let n = data.nrows();
        let init = KMeans::new(self.components, 1, 300, self.seed).fit(data);

        let mut resp = Array2::<f64>::zeros((n, self.components));
        for (i, &l) in init.labels.iter().enumerate() {
            resp[[i, l]] = 1.0;
        }

        let mut params = m_step(data, &resp)?;
        let mut lower_bound = f64::NEG_INFINITY;
        let mut converged = false;

        for iter in 0..self.max_iter {
            let (log_resp, bound) = e_step(data, &params);
            params = m_step(data, &log_resp.mapv(f64::exp))?;

            if (bound - lower_bound).abs() < TOLERANCE {
                log::debug!("GMM k={} converged after {} iterations", self.components, iter + 1);
                converged = true;
                break;
            }
            lower_bound = bound;
        }

        if !converged {
            log::debug!("GMM k={} did not converge in {} iterations", self.components, self.max_iter);
        }

        let (log_resp, _) = e_step(data, &params);
        Some(
            log_resp
                .rows()
                .into_iter()
                .map(|row| argmax(row.iter().copied()))
                .collect(),
        )
    }
}

fn m_step(data: &Array2<f64>, resp: &Array2<f64>) -> Option<Params> {
    let (n, d) = (data.nrows(), data.ncols());
    let k = resp.ncols();

    let nk: Array1<f64> = resp.sum_axis(Axis(0)).mapv(|v| v + 10.0 * f64::EPSILON);
    let means = resp.t().dot(data) / &nk.view().insert_axis(Axis(1));

    let mut chol = Vec::with_capacity(k);
    for c in 0..k {
        let mut cov = Array2::<f64>::zeros((d, d));
        for i in 0..n {
            let w = resp[[i, c]];
            if w == 0.0 {
                continue;
            }
            for a in 0..d {
                let da = data[[i, a]] - means[[c, a]];
                for b in 0..=a {
                    cov[[a, b]] += w * da * (data[[i, b]] - means[[c, b]]);
                }
            }
        }
        for a in 0..d {
            for b in 0..=a {
                cov[[a, b]] /= nk[c];
                cov[[b, a]] = cov[[a, b]];
            }
            cov[[a, a]] += REG_COVAR;
        }
        chol.push(cholesky(&cov)?);
    }

    let log_weights = nk.iter().map(|v| (v / n as f64).ln()).collect();
    Some(Params { log_weights, means, chol })
}

/// Log responsibilities and mean log-likelihood
fn e_step(data: &Array2<f64>, params: &Params) -> (Array2<f64>, f64) {
    let (n, d) = (data.nrows(), data.ncols());
    let k = params.log_weights.len();
    let log_2pi = (2.0 * std::f64::consts::PI).ln();

    let mut log_prob = Array2::<f64>::zeros((n, k));
    for c in 0..k {
        let l = &params.chol[c];
        let log_det: f64 = (0..d).map(|a| l[[a, a]].ln()).sum::<f64>() * 2.0;
        for i in 0..n {
            // Forward substitution: L y = x - mu
            let mut y = vec![0.0; d];
            for a in 0..d {
                let mut v = data[[i, a]] - params.means[[c, a]];
                for b in 0..a {
                    v -= l[[a, b]] * y[b];
                }
                y[a] = v / l[[a, a]];
            }
            let maha: f64 = y.iter().map(|v| v * v).sum();
            log_prob[[i, c]] = params.log_weights[c] - 0.5 * (d as f64 * log_2pi + log_det + maha);
        }
    }

    let mut total = 0.0;
    for mut row in log_prob.rows_mut() {
        let norm = log_sum_exp(row.iter().copied());
        total += norm;
        row.mapv_inplace(|v| v - norm);
    }

    (log_prob, total / n.max(1) as f64)
}

/// Lower-triangular L with L L^T = m; `None` if not positive definite
pub fn cholesky(m: &Array2<f64>) -> Option<Array2<f64>> {
    let d = m.nrows();
    let mut l = Array2::<f64>::zeros((d, d));
    for i in 0..d {
        for j in 0..=i {
            let mut sum = m[[i, j]];
            for p in 0..j {
                sum -= l[[i, p]] * l[[j, p]];
            }
            if i == j {
                if sum <= 0.0 || !sum.is_finite() {
                    return None;
                }
                l[[i, i]] = sum.sqrt();
            } else {
                l[[i, j]] = sum / l[[j, j]];
            }
        }
    }
    Some(l)
}

fn log_sum_exp(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    max + values.map(|v| (v - max).exp()).sum::<f64>().ln()
}

/// First index of the maximum
fn argmax(values: impl Iterator<Item = f64>) -> usize {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, v) in values.enumerate() {
        if v > best.1 {
            best = (i, v);
        }
    }
    best.0
}
