//! Similarity metrics used to judge how well a signal was recovered

/// Zero-lag normalized cross-correlation in [-1, 1].
///
/// Only the overlapping prefix is compared. Returns 0.0 when either side
/// carries no energy.
pub fn normalized_cross_correlation(a: &[f64], b: &[f64]) -> f64 {
    let (mut dot, mut energy_a, mut energy_b) = (0.0, 0.0, 0.0);
    for (&x, &y) in a.iter().zip(b) {
        dot += x * y;
        energy_a += x * x;
        energy_b += y * y;
    }

    let denom = (energy_a * energy_b).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

/// Root-mean-square level; 0.0 for an empty slice
pub fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64).sqrt()
}
