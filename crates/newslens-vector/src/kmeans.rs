//! Seeded k-means (k-means++ initialisation, Lloyd iterations).
//!
//! Given the same points, `k` and seed the assignments are identical across
//! runs. Clusters may end up empty; an empty cluster keeps its previous
//! centroid and simply receives no members.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use newslens_core::error::{Error, Result};

pub const DEFAULT_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KMeans {
    k: usize,
    max_iterations: usize,
    seed: u64,
}

/// Result of one k-means run. `assignments[i]` is the cluster of point `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    pub assignments: Vec<usize>,
    pub centroids: Vec<Vec<f32>>,
    pub iterations: usize,
}

impl Clustering {
    /// Point indices per cluster, in cluster order. Empty groups are kept.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.centroids.len()];
        for (point, &cluster) in self.assignments.iter().enumerate() {
            groups[cluster].push(point);
        }
        groups
    }
}

impl KMeans {
    pub fn new(k: usize) -> Self {
        Self { k, max_iterations: DEFAULT_MAX_ITERATIONS, seed: DEFAULT_SEED }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    #[instrument(skip(points), fields(points = points.len()))]
    pub fn fit(&self, points: &[Vec<f32>]) -> Result<Clustering> {
        let dim = validate(points, self.k)?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centroids = self.initial_centroids(points, &mut rng);
        let mut assignments = vec![usize::MAX; points.len()];
        let mut iterations = 0;

        while iterations < self.max_iterations {
            iterations += 1;
            let mut changed = false;
            for (i, point) in points.iter().enumerate() {
                let nearest = nearest_centroid(point, &centroids);
                if assignments[i] != nearest {
                    assignments[i] = nearest;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
            update_centroids(points, &assignments, &mut centroids, dim);
        }

        debug!(k = self.k, iterations, "k-means finished");
        Ok(Clustering { assignments, centroids, iterations })
    }

    /// k-means++: the first centroid is uniform, each next one is drawn with
    /// probability proportional to its squared distance from the chosen set.
    fn initial_centroids(&self, points: &[Vec<f32>], rng: &mut StdRng) -> Vec<Vec<f32>> {
        let mut chosen = vec![rng.gen_range(0..points.len())];
        while chosen.len() < self.k {
            let distances: Vec<f64> = points
                .iter()
                .map(|p| {
                    chosen
                        .iter()
                        .map(|&c| squared_distance(p, &points[c]))
                        .fold(f64::INFINITY, f64::min)
                })
                .collect();
            let total: f64 = distances.iter().sum();
            let next = if total > 0.0 {
                let mut target = rng.gen::<f64>() * total;
                let mut pick = points.len() - 1;
                for (i, &d) in distances.iter().enumerate() {
                    if d <= 0.0 {
                        continue;
                    }
                    if target < d {
                        pick = i;
                        break;
                    }
                    target -= d;
                }
                pick
            } else {
                // every point coincides with a chosen centroid
                (0..points.len()).find(|i| !chosen.contains(i)).unwrap_or(0)
            };
            chosen.push(next);
        }
        chosen.into_iter().map(|i| points[i].clone()).collect()
    }
}

fn validate(points: &[Vec<f32>], k: usize) -> Result<usize> {
    let first = points
        .first()
        .ok_or_else(|| Error::Input("k-means needs at least one point".into()))?;
    if k == 0 || k > points.len() {
        return Err(Error::Input(format!("cannot form {k} clusters from {} points", points.len())));
    }
    let dim = first.len();
    if dim == 0 {
        return Err(Error::Computation("embedding vectors are empty".into()));
    }
    for (i, p) in points.iter().enumerate() {
        if p.len() != dim {
            return Err(Error::Computation(format!(
                "embedding {i} has {} dimensions, expected {dim}",
                p.len()
            )));
        }
        if p.iter().any(|x| !x.is_finite()) {
            return Err(Error::Computation(format!("embedding {i} contains a non-finite value")));
        }
    }
    Ok(dim)
}

fn squared_distance(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum()
}

/// Ties go to the lowest cluster index.
fn nearest_centroid(point: &[f32], centroids: &[Vec<f32>]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (c, centroid) in centroids.iter().enumerate() {
        let d = squared_distance(point, centroid);
        if d < best_distance {
            best = c;
            best_distance = d;
        }
    }
    best
}

fn update_centroids(points: &[Vec<f32>], assignments: &[usize], centroids: &mut [Vec<f32>], dim: usize) {
    let mut sums = vec![vec![0.0f64; dim]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];
    for (point, &cluster) in points.iter().zip(assignments) {
        counts[cluster] += 1;
        for (s, x) in sums[cluster].iter_mut().zip(point) {
            *s += f64::from(*x);
        }
    }
    for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(counts) {
        if count == 0 {
            continue;
        }
        for (c, s) in centroid.iter_mut().zip(sum) {
            *c = (s / count as f64) as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blobs() -> Vec<Vec<f32>> {
        vec![
            vec![0.0, 0.1],
            vec![10.0, 10.2],
            vec![0.2, 0.0],
            vec![9.8, 10.0],
            vec![0.1, 0.2],
            vec![10.1, 9.9],
        ]
    }

    #[test]
    fn separates_obvious_blobs() {
        let clustering = KMeans::new(2).fit(&two_blobs()).unwrap();
        let a = &clustering.assignments;
        assert_eq!(a[0], a[2]);
        assert_eq!(a[0], a[4]);
        assert_eq!(a[1], a[3]);
        assert_eq!(a[1], a[5]);
        assert_ne!(a[0], a[1]);
    }

    #[test]
    fn same_seed_same_assignments() {
        let points = two_blobs();
        let first = KMeans::new(2).with_seed(7).fit(&points).unwrap();
        let second = KMeans::new(2).with_seed(7).fit(&points).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn groups_partition_every_point() {
        let clustering = KMeans::new(3).fit(&two_blobs()).unwrap();
        let groups = clustering.groups();
        assert_eq!(groups.len(), 3);
        let mut members: Vec<usize> = groups.into_iter().flatten().collect();
        members.sort_unstable();
        assert_eq!(members, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn identical_points_still_produce_k_groups() {
        let points = vec![vec![1.0, 1.0]; 4];
        let clustering = KMeans::new(2).fit(&points).unwrap();
        let groups = clustering.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.iter().map(Vec::len).sum::<usize>(), 4);
    }

    #[test]
    fn rejects_bad_k() {
        let points = two_blobs();
        assert!(matches!(KMeans::new(0).fit(&points), Err(Error::Input(_))));
        assert!(matches!(KMeans::new(7).fit(&points), Err(Error::Input(_))));
        assert!(matches!(KMeans::new(1).fit(&[]), Err(Error::Input(_))));
    }

    #[test]
    fn rejects_ragged_or_non_finite_points() {
        let ragged = vec![vec![1.0, 2.0], vec![1.0]];
        assert!(matches!(KMeans::new(1).fit(&ragged), Err(Error::Computation(_))));
        let nan = vec![vec![1.0, f32::NAN], vec![1.0, 2.0]];
        assert!(matches!(KMeans::new(1).fit(&nan), Err(Error::Computation(_))));
    }

    #[test]
    fn single_cluster_holds_everything() {
        let clustering = KMeans::new(1).fit(&two_blobs()).unwrap();
        assert!(clustering.assignments.iter().all(|&c| c == 0));
    }
}
