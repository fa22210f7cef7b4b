//! Ward Agglomerative Clustering (hierarchical family)
//!
//! The dendrogram is built once per batch with the nearest-neighbour chain
//! algorithm and then cut at every requested cluster count.

use ndarray::Array2;

#[derive(Debug, Clone, Copy)]
struct Merge {
    a: usize,
    b: usize,
    height: f64,
}

#[derive(Debug, Clone)]
pub struct WardDendrogram {
    n: usize,
    /// Sorted by height; ties keep discovery order
    merges: Vec<Merge>,
}

impl WardDendrogram {
    pub fn build(data: &Array2<f64>) -> Self {
        let n = data.nrows();

        // Lance-Williams Ward update runs on squared Euclidean distances
        let mut dist = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d: f64 = data
                    .row(i)
                    .iter()
                    .zip(data.row(j).iter())
                    .map(|(x, y)| (x - y).powi(2))
                    .sum();
                dist[i * n + j] = d;
                dist[j * n + i] = d;
            }
        }

        let mut size = vec![1usize; n];
        let mut active = vec![true; n];
        let mut remaining = n;
        let mut chain: Vec<usize> = Vec::with_capacity(n);
        let mut merges = Vec::with_capacity(n.saturating_sub(1));

        while remaining > 1 {
            if chain.is_empty() {
                if let Some(first) = active.iter().position(|a| *a) {
                    chain.push(first);
                }
            }

            let top = chain[chain.len() - 1];
            let prev = if chain.len() >= 2 { Some(chain[chain.len() - 2]) } else { None };

            // Prefer the previous chain element on ties so the chain terminates
            let mut nearest = prev;
            let mut best = prev.map_or(f64::INFINITY, |p| dist[top * n + p]);
            for j in 0..n {
                if active[j] && j != top && dist[top * n + j] < best {
                    best = dist[top * n + j];
                    nearest = Some(j);
                }
            }

            let nearest = match nearest {
                Some(j) => j,
                None => break,
            };

            if Some(nearest) == prev {
                chain.pop();
                chain.pop();

                let (keep, gone) = (top.min(nearest), top.max(nearest));
                let d_ab = dist[keep * n + gone];
                let (n_a, n_b) = (size[keep] as f64, size[gone] as f64);

                for k in 0..n {
                    if !active[k] || k == keep || k == gone {
                        continue;
                    }
                    let n_k = size[k] as f64;
                    let updated = ((n_a + n_k) * dist[k * n + keep] + (n_b + n_k) * dist[k * n + gone]
                        - n_k * d_ab)
                        / (n_a + n_b + n_k);
                    dist[k * n + keep] = updated;
                    dist[keep * n + k] = updated;
                }

                size[keep] += size[gone];
                active[gone] = false;
                remaining -= 1;
                merges.push(Merge { a: keep, b: gone, height: d_ab });
            } else {
                chain.push(nearest);
            }
        }

        merges.sort_by(|x, y| x.height.total_cmp(&y.height));

        Self { n, merges }
    }

    /// Flat labelling with `k` clusters, numbered by first appearance
    pub fn cut(&self, k: usize) -> Vec<usize> {
        let mut parent: Vec<usize> = (0..self.n).collect();

        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        let apply = self.n.saturating_sub(k.max(1)).min(self.merges.len());
        for merge in &self.merges[..apply] {
            let ra = find(&mut parent, merge.a);
            let rb = find(&mut parent, merge.b);
            if ra != rb {
                parent[rb.max(ra)] = ra.min(rb);
            }
        }

        let mut roots: Vec<usize> = Vec::new();
        (0..self.n)
            .map(|i| {
                let r = find(&mut parent, i);
                match roots.iter().position(|x| *x == r) {
                    Some(p) => p,
                    None => {
                        roots.push(r);
                        roots.len() - 1
                    }
                }
            })
            .collect()
    }
}
