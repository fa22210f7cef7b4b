//! 2-D Projection
//!
//! First two principal components of the standardized feature matrix, for
//! scatter-plot consumers. Power iteration with deflation; the start vector
//! is seeded so the output is reproducible.

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const COMPONENTS: usize = 2;

const MAX_ITER: usize = 500;
const TOLERANCE: f64 = 1e-10;
const MIN_EIGENVALUE: f64 = 1e-12;

/// Principal axes plus the projected coordinates of every record
#[derive(Debug, Clone)]
pub struct Projection {
    /// Unit vectors; a zero vector when the batch has no variance left
    pub axes: [Array1<f64>; COMPONENTS],
    pub explained_variance: [f64; COMPONENTS],
    pub coordinates: Vec<[f64; 2]>,
}

impl Projection {
    pub fn fit(standardized: &Array2<f64>, seed: u64) -> Self {
        let (n, d) = standardized.dim();
        let zero = || Array1::<f64>::zeros(d);

        if n == 0 || d == 0 {
            return Self {
                axes: [zero(), zero()],
                explained_variance: [0.0; COMPONENTS],
                coordinates: vec![[0.0; 2]; n],
            };
        }

        let mean = standardized.mean_axis(Axis(0)).unwrap_or_else(zero);
        let centered = standardized - &mean;
        let mut covariance = centered.t().dot(&centered) / n as f64;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut axes = [zero(), zero()];
        let mut explained_variance = [0.0; COMPONENTS];

        for component in 0..COMPONENTS {
            let (value, vector) = dominant_eigenpair(&covariance, &mut rng);
            if value <= MIN_EIGENVALUE {
                break;
            }

            // Deflate so the next pass finds the following component
            for i in 0..d {
                for j in 0..d {
                    covariance[[i, j]] -= value * vector[i] * vector[j];
                }
            }

            explained_variance[component] = value;
            axes[component] = vector;
        }

        let first = centered.dot(&axes[0]);
        let second = centered.dot(&axes[1]);
        let coordinates = first.iter().zip(second.iter()).map(|(x, y)| [*x, *y]).collect();

        Self {
            axes,
            explained_variance,
            coordinates,
        }
    }
}

/// Largest eigenvalue and its unit eigenvector of a symmetric matrix
fn dominant_eigenpair(matrix: &Array2<f64>, rng: &mut StdRng) -> (f64, Array1<f64>) {
    let d = matrix.nrows();
    let mut vector: Array1<f64> = (0..d).map(|_| rng.gen_range(-1.0..1.0)).collect();
    if !normalize(&mut vector) {
        return (0.0, Array1::zeros(d));
    }

    for _ in 0..MAX_ITER {
        let mut next = matrix.dot(&vector);
        if !normalize(&mut next) {
            return (0.0, Array1::zeros(d));
        }
        let delta = (&next - &vector).mapv(f64::abs).sum();
        vector = next;
        if delta < TOLERANCE {
            break;
        }
    }

    orient(&mut vector);
    let value = vector.dot(&matrix.dot(&vector));
    (value, vector)
}

fn normalize(vector: &mut Array1<f64>) -> bool {
    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if !norm.is_finite() || norm <= MIN_EIGENVALUE {
        return false;
    }
    vector.mapv_inplace(|v| v / norm);
    true
}

/// Largest-magnitude entry positive
fn orient(vector: &mut Array1<f64>) {
    let pivot = vector
        .iter()
        .copied()
        .fold(0.0_f64, |acc, v| if v.abs() > acc.abs() { v } else { acc });
    if pivot < 0.0 {
        vector.mapv_inplace(|v| -v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_points_on_a_line() {
        let data = array![[-2.0, -2.0], [-1.0, -1.0], [0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
        let p = Projection::fit(&data, 42);

        let axis = &p.axes[0];
        let expected = 1.0 / 2.0_f64.sqrt();
        assert!((axis[0] - expected).abs() < 1e-6);
        assert!((axis[1] - expected).abs() < 1e-6);
        assert!((p.explained_variance[0] - 4.0).abs() < 1e-6);
        assert!(p.coordinates.iter().all(|c| c[1].abs() < 1e-6));
        assert!(p.coordinates[4][0] > p.coordinates[0][0]);
    }

    #[test]
    fn test_zero_variance_projects_to_origin() {
        let data = Array2::<f64>::zeros((4, 3));
        let p = Projection::fit(&data, 7);
        assert_eq!(p.coordinates, vec![[0.0, 0.0]; 4]);
        assert_eq!(p.explained_variance, [0.0, 0.0]);
    }

    #[test]
    fn test_same_seed_same_coordinates() {
        let data = array![[1.0, 0.2, -0.5], [0.3, -1.0, 0.8], [-1.3, 0.8, -0.3], [0.0, 0.0, 0.0]];
        let a = Projection::fit(&data, 42);
        let b = Projection::fit(&data, 42);
        assert_eq!(a.coordinates, b.coordinates);
    }
}
