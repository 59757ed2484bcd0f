//! Confidence scoring shared by every insight kind.

/// Saturating adequacy of a sample of `n` observations.
///
/// Zero for an empty sample, approaching one as `n` grows well past
/// `saturation`.
pub fn sample_adequacy(n: usize, saturation: f64) -> f64 {
    if saturation <= 0.0 {
        return 1.0;
    }
    1.0 - (-(n as f64) / saturation).exp()
}

/// Combine sample adequacy with a kind-specific consistency in `[0, 1]`.
pub fn confidence(n: usize, saturation: f64, consistency: f64) -> f64 {
    let consistency = if consistency.is_finite() {
        consistency.clamp(0.0, 1.0)
    } else {
        0.0
    };
    (sample_adequacy(n, saturation) * (0.5 + 0.5 * consistency)).clamp(0.0, 1.0)
}
