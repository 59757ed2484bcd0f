//! Pearson correlation and its significance.

use crate::descriptive::mean;

/// Pearson coefficient over paired values, clamped to `[-1, 1]`.
///
/// `None` when fewer than three pairs exist or either side has no spread.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 3 {
        return None;
    }
    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x <= f64::EPSILON || var_y <= f64::EPSILON {
        return None;
    }
    let r = cov / (var_x.sqrt() * var_y.sqrt());
    if r.is_finite() { Some(r.clamp(-1.0, 1.0)) } else { None }
}

/// Pairwise-complete values for the given rows.
pub fn paired(xs: &[Option<f64>], ys: &[Option<f64>], rows: &[usize]) -> (Vec<f64>, Vec<f64>) {
    rows.iter()
        .filter_map(|&row| match (xs.get(row).copied().flatten(), ys.get(row).copied().flatten()) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        })
        .unzip()
}

/// Inverse of the standard normal CDF (Acklam's rational approximation).
pub fn normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const LOW: f64 = 0.024_25;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    if p < LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -normal_quantile(1.0 - p)
    }
}

/// Two-sided Fisher z test of `r` against zero.
pub fn is_significant(r: f64, n: usize, confidence_level: f64) -> bool {
    if n <= 3 {
        return false;
    }
    let bounded = r.clamp(-0.999_999, 0.999_999);
    let z = bounded.atanh() * ((n - 3) as f64).sqrt();
    let critical = normal_quantile(1.0 - (1.0 - confidence_level) / 2.0);
    z.abs() > critical
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_relationships_hit_the_bounds() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let up = [2.0, 4.0, 6.0, 8.0, 10.0];
        let down = [10.0, 8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&xs, &up).expect("r") - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &down).expect("r") + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_side_has_no_coefficient() {
        assert!(pearson(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).is_none());
        assert!(pearson(&[1.0, 2.0], &[1.0, 2.0]).is_none());
    }

    #[test]
    fn paired_drops_incomplete_rows() {
        let xs = [Some(1.0), None, Some(3.0), Some(4.0)];
        let ys = [Some(2.0), Some(5.0), None, Some(8.0)];
        let (px, py) = paired(&xs, &ys, &[0, 1, 2, 3]);
        assert_eq!(px, vec![1.0, 4.0]);
        assert_eq!(py, vec![2.0, 8.0]);
    }

    #[test]
    fn normal_quantile_matches_reference_points() {
        assert!((normal_quantile(0.975) - 1.959_964).abs() < 1e-4);
        assert!((normal_quantile(0.5)).abs() < 1e-9);
        assert!((normal_quantile(0.01) + 2.326_348).abs() < 1e-4);
    }

    #[test]
    fn significance_grows_with_sample_size() {
        assert!(!is_significant(0.3, 10, 0.95));
        assert!(is_significant(0.3, 200, 0.95));
        assert!(is_significant(-1.0, 5, 0.95));
    }
}
