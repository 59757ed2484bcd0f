//! Seeded uniform row sampling for large tables.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

/// Sorted row indices for a uniform sample of `size` rows out of `total`.
///
/// Returns every row when the table is already small enough. The same seed
/// always yields the same sample.
pub fn sample_row_indices(total: usize, size: usize, seed: u64) -> Vec<usize> {
    if total <= size {
        return (0..total).collect();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = index::sample(&mut rng, total, size).into_vec();
    picked.sort_unstable();
    picked
}

/// Row indices to use given a sampling threshold.
pub fn analysis_rows(total: usize, threshold: usize, size: usize, seed: u64) -> Vec<usize> {
    if total > threshold {
        sample_row_indices(total, size, seed)
    } else {
        (0..total).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_tables_are_not_sampled() {
        assert_eq!(sample_row_indices(5, 10, 1), vec![0, 1, 2, 3, 4]);
        assert_eq!(analysis_rows(50, 100, 10, 1).len(), 50);
    }

    #[test]
    fn sampling_is_seeded_and_sorted() {
        let first = sample_row_indices(10_000, 100, 42);
        let second = sample_row_indices(10_000, 100, 42);
        assert_eq!(first, second);
        assert_eq!(first.len(), 100);
        assert!(first.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(first.iter().all(|idx| *idx < 10_000));
    }
}
