use ndarray::Array2;

use super::selector::{fold_trials, ClusteringSelector, SelectorSettings};
use super::types::{
    ClusteringCandidate, ClusteringFamily, ClusteringTrial, DegenerateClustering, GridParameter,
};
use crate::error::HotspotError;

fn settings(parallel: bool) -> SelectorSettings {
    SelectorSettings {
        cluster_counts: (2..=10).collect(),
        dbscan_eps: vec![0.1, 0.3, 0.5, 0.7, 1.0],
        dbscan_min_samples: 5,
        kmeans_n_init: 10,
        max_iter: 300,
        gmm_max_iter: 100,
        seed: 42,
        parallel,
    }
}

/// Three tight groups of 10 in 3-D, centred far apart
fn three_blobs() -> Array2<f64> {
    let centres = [[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 10.0]];
    Array2::from_shape_fn((30, 3), |(i, j)| {
        let jitter = ((i * 7 + j * 3) % 5) as f64 * 0.02;
        centres[i / 10][j] + jitter
    })
}

fn candidate(family: ClusteringFamily, k: usize, silhouette: f64) -> ClusteringTrial {
    ClusteringTrial {
        family,
        parameter: GridParameter::Clusters(k),
        outcome: Ok(ClusteringCandidate {
            family,
            parameter: GridParameter::Clusters(k),
            labels: vec![0, 1],
            silhouette,
            calinski_harabasz: 1.0,
            n_clusters: 2,
            noise_points: 0,
        }),
    }
}

fn degenerate(family: ClusteringFamily, eps: f64) -> ClusteringTrial {
    ClusteringTrial {
        family,
        parameter: GridParameter::Radius(eps),
        outcome: Err(DegenerateClustering {
            family,
            parameter: GridParameter::Radius(eps),
            reason: "0 non-noise clusters".to_string(),
        }),
    }
}

#[test]
fn test_selects_three_blobs() {
    let data = three_blobs();
    let outcome = ClusteringSelector::new(settings(false)).unwrap().select(&data).unwrap();

    let labels = &outcome.selected.labels;
    assert_eq!(outcome.selected.n_clusters, 3);
    for blob in 0..3 {
        let first = labels[blob * 10];
        assert!(labels[blob * 10..blob * 10 + 10].iter().all(|l| *l == first));
    }
    assert!(outcome.selected.silhouette > 0.9);
    // k-means finds it and wins every tie
    assert_eq!(outcome.selected.family, ClusteringFamily::Partition);
    assert_eq!(outcome.trials_evaluated, 9 * 3 + 5);
}

#[test]
fn test_parallel_matches_sequential() {
    let data = three_blobs();
    let seq = ClusteringSelector::new(settings(false)).unwrap().select(&data).unwrap();
    let par = ClusteringSelector::new(settings(true)).unwrap().select(&data).unwrap();

    assert_eq!(seq.selected.labels, par.selected.labels);
    assert_eq!(seq.selected.silhouette, par.selected.silhouette);
    assert_eq!(seq.family_best.len(), par.family_best.len());
}

#[test]
fn test_single_record_is_insufficient() {
    let data = Array2::from_elem((1, 8), 0.5);
    let err = ClusteringSelector::new(settings(false)).unwrap().select(&data).unwrap_err();
    assert!(matches!(err, HotspotError::InsufficientData { records: 1, .. }));
}

#[test]
fn test_identical_records_are_insufficient() {
    let data = Array2::zeros((6, 8));
    let err = ClusteringSelector::new(settings(false)).unwrap().select(&data).unwrap_err();
    assert!(matches!(err, HotspotError::InsufficientData { records: 6, .. }));
}

#[test]
fn test_empty_grid_rejected() {
    let mut s = settings(false);
    s.cluster_counts.clear();
    let err = ClusteringSelector::new(s).unwrap_err();
    assert!(matches!(err, HotspotError::InvalidConfiguration { field: "cluster_counts", .. }));
}

#[test]
fn test_small_batch_discards_density_and_large_k() {
    let data = ndarray::array![[0.0, 0.0], [0.1, 0.0], [5.0, 5.0]];
    let outcome = ClusteringSelector::new(settings(false)).unwrap().select(&data).unwrap();

    assert!(outcome.best_for(ClusteringFamily::Density).is_none());
    assert_eq!(outcome.selected.family, ClusteringFamily::Partition);
    assert_eq!(outcome.selected.parameter, GridParameter::Clusters(2));
    assert_eq!(outcome.selected.labels[0], outcome.selected.labels[1]);
    assert_ne!(outcome.selected.labels[0], outcome.selected.labels[2]);
    // only k = 2 is usable for the three k-based families
    assert_eq!(outcome.trials_discarded, outcome.trials_evaluated - 3);
}

#[test]
fn test_tie_break_follows_family_priority() {
    let trials = vec![
        candidate(ClusteringFamily::Mixture, 2, 0.8),
        candidate(ClusteringFamily::Density, 3, 0.8),
        candidate(ClusteringFamily::Partition, 4, 0.8),
        candidate(ClusteringFamily::Hierarchical, 2, 0.8),
    ];
    let outcome = fold_trials(trials, 2).unwrap();
    assert_eq!(outcome.selected.family, ClusteringFamily::Partition);

    let trials = vec![
        candidate(ClusteringFamily::Mixture, 2, 0.8),
        candidate(ClusteringFamily::Hierarchical, 2, 0.8),
    ];
    assert_eq!(fold_trials(trials, 2).unwrap().selected.family, ClusteringFamily::Mixture);
}

#[test]
fn test_best_within_family_keeps_first_on_tie() {
    let trials = vec![
        candidate(ClusteringFamily::Partition, 2, 0.5),
        candidate(ClusteringFamily::Partition, 3, 0.7),
        candidate(ClusteringFamily::Partition, 4, 0.7),
    ];
    let outcome = fold_trials(trials, 2).unwrap();
    assert_eq!(outcome.selected.parameter, GridParameter::Clusters(3));
}

#[test]
fn test_all_degenerate_is_insufficient() {
    let trials = vec![
        degenerate(ClusteringFamily::Density, 0.1),
        degenerate(ClusteringFamily::Density, 0.3),
    ];
    let err = fold_trials(trials, 4).unwrap_err();
    assert!(matches!(err, HotspotError::InsufficientData { records: 4, .. }));
}
