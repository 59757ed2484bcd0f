//! Seeded k-means with elbow selection over standardized features.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAX_ITERATIONS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    pub k: usize,
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    pub inertia: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSummary {
    pub k: usize,
    pub sizes: Vec<usize>,
    pub inertia: f64,
    /// Share of total variance captured by the clustering.
    pub explained_variance: f64,
    /// Centroids expressed in the original feature units.
    pub centroids: Vec<Vec<f64>>,
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Z-score every feature; constant features collapse to zero.
///
/// Returns the scaled rows plus the per-feature means and scales.
pub fn standardize(rows: &[Vec<f64>]) -> (Vec<Vec<f64>>, Vec<f64>, Vec<f64>) {
    let width = rows.first().map_or(0, Vec::len);
    let n = rows.len().max(1) as f64;
    let means: Vec<f64> = (0..width)
        .map(|col| rows.iter().map(|row| row[col]).sum::<f64>() / n)
        .collect();
    let scales: Vec<f64> = (0..width)
        .map(|col| {
            let var = rows
                .iter()
                .map(|row| (row[col] - means[col]).powi(2))
                .sum::<f64>()
                / n;
            let std = var.sqrt();
            if std <= f64::EPSILON { 1.0 } else { std }
        })
        .collect();
    let scaled = rows
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(col, value)| (value - means[col]) / scales[col])
                .collect()
        })
        .collect();
    (scaled, means, scales)
}

/// Sum of squared distances to the overall mean.
pub fn total_inertia(points: &[Vec<f64>]) -> f64 {
    let width = points.first().map_or(0, Vec::len);
    let n = points.len().max(1) as f64;
    let center: Vec<f64> = (0..width)
        .map(|col| points.iter().map(|row| row[col]).sum::<f64>() / n)
        .collect();
    points
        .iter()
        .map(|point| squared_distance(point, &center))
        .sum()
}

fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    centroids
        .iter()
        .enumerate()
        .map(|(idx, centroid)| (idx, squared_distance(point, centroid)))
        .fold((0, f64::INFINITY), |best, candidate| {
            if candidate.1 < best.1 { candidate } else { best }
        })
}

fn seed_centroids(points: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let mut centroids = vec![points[rng.gen_range(0..points.len())].clone()];
    while centroids.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|point| nearest(point, &centroids).1)
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= f64::EPSILON {
            // Every point already coincides with a centroid.
            centroids.push(points[centroids.len() % points.len()].clone());
            continue;
        }
        let mut target = rng.r#gen::<f64>() * total;
        let mut chosen = points.len() - 1;
        for (idx, weight) in weights.iter().enumerate() {
            if target < *weight {
                chosen = idx;
                break;
            }
            target -= weight;
        }
        centroids.push(points[chosen].clone());
    }
    centroids
}

/// Lloyd iterations from a k-means++ start.
pub fn kmeans(points: &[Vec<f64>], k: usize, seed: u64) -> Option<KMeansFit> {
    if k == 0 || points.len() < k {
        return None;
    }
    let width = points[0].len();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids = seed_centroids(points, k, &mut rng);
    let mut labels = vec![usize::MAX; points.len()];
    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (idx, point) in points.iter().enumerate() {
            let (label, _) = nearest(point, &centroids);
            if labels[idx] != label {
                labels[idx] = label;
                changed = true;
            }
        }
        if !changed {
            break;
        }
        let mut sums = vec![vec![0.0; width]; k];
        let mut counts = vec![0usize; k];
        for (point, label) in points.iter().zip(&labels) {
            counts[*label] += 1;
            for (sum, value) in sums[*label].iter_mut().zip(point) {
                *sum += value;
            }
        }
        for (cluster, (sum, count)) in sums.into_iter().zip(&counts).enumerate() {
            // Empty clusters keep their previous centroid.
            if *count > 0 {
                centroids[cluster] = sum.into_iter().map(|value| value / *count as f64).collect();
            }
        }
    }
    let inertia = points
        .iter()
        .zip(&labels)
        .map(|(point, label)| squared_distance(point, &centroids[*label]))
        .sum();
    Some(KMeansFit {
        k,
        labels,
        centroids,
        inertia,
    })
}

/// Pick k at the point of the inertia curve farthest from its chord.
pub fn elbow_k(curve: &[(usize, f64)]) -> Option<usize> {
    let (first, last) = (curve.first()?, curve.last()?);
    if curve.len() < 3 {
        return Some(first.0);
    }
    let k_span = (last.0 - first.0) as f64;
    let inertia_span = first.1 - last.1;
    if k_span <= 0.0 || inertia_span <= f64::EPSILON {
        return Some(first.0);
    }
    let mut best = (first.0, f64::NEG_INFINITY);
    for (k, inertia) in curve {
        let x = (*k - first.0) as f64 / k_span;
        let y = (first.1 - inertia) / inertia_span;
        // Chord runs from (0, 0) to (1, 1) after normalization.
        let distance = (y - x) / std::f64::consts::SQRT_2;
        if distance > best.1 + 1e-12 {
            best = (*k, distance);
        }
    }
    Some(best.0)
}

/// Cluster rows of numeric features and describe the chosen segmentation.
pub fn cluster_rows(rows: &[Vec<f64>], max_k: usize, seed: u64) -> Option<ClusterSummary> {
    let max_k = max_k.min(rows.len() / 3);
    if max_k < 2 {
        return None;
    }
    let (scaled, means, scales) = standardize(rows);
    let baseline = total_inertia(&scaled);
    if baseline <= f64::EPSILON {
        return None;
    }
    let fits: Vec<KMeansFit> = (2..=max_k)
        .filter_map(|k| kmeans(&scaled, k, seed))
        .collect();
    let mut curve = vec![(1, baseline)];
    curve.extend(fits.iter().map(|fit| (fit.k, fit.inertia)));
    let chosen_k = elbow_k(&curve)?.max(2);
    let fit = fits.into_iter().find(|fit| fit.k == chosen_k)?;
    let mut sizes = vec![0usize; fit.k];
    for label in &fit.labels {
        sizes[*label] += 1;
    }
    let centroids = fit
        .centroids
        .iter()
        .map(|centroid| {
            centroid
                .iter()
                .enumerate()
                .map(|(col, value)| value * scales[col] + means[col])
                .collect()
        })
        .collect();
    Some(ClusterSummary {
        k: fit.k,
        sizes,
        inertia: fit.inertia,
        explained_variance: (1.0 - fit.inertia / baseline).clamp(0.0, 1.0),
        centroids,
    })
}
