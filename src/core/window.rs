//! Hamming output window for overlap-add resynthesis.
//!
//! Only the first half of the window is stored; application mirrors it over
//! the segment. The matching half was applied by the analysis step that
//! produced the spectral file, so the resynthesis side windows each segment
//! exactly once.

use std::f64::consts::PI;

/// Hamming coefficients.
const HAMMING_A0: f64 = 0.54;
const HAMMING_A1: f64 = 0.46;

/// Generates the first half of a Hamming window of total length `window_len`,
/// inclusive of the center point (`window_len / 2 + 1` values).
pub fn hamming_half(window_len: usize) -> Vec<f32> {
    let n = window_len as f64;
    (0..=window_len / 2)
        .map(|i| (HAMMING_A0 - HAMMING_A1 * (2.0 * PI * i as f64 / n).cos()) as f32)
        .collect()
}

/// Applies the stored half-window to `segment`, mirrored around the center.
///
/// `half` must hold `segment.len() / 2 + 1` points.
#[inline]
pub fn apply_half_window(segment: &mut [f32], half: &[f32]) {
    let len = segment.len();
    debug_assert!(half.len() >= len / 2 + 1);
    for (j, sample) in segment.iter_mut().enumerate() {
        *sample *= half[j.min(len - j)];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_window_length_and_endpoints() {
        let half = hamming_half(256);
        assert_eq!(half.len(), 129);
        // Hamming edges sit at 0.08, the center at 1.0
        assert!((half[0] - 0.08).abs() < 1e-6);
        assert!((half[128] - 1.0).abs() < 1e-6);
        // Monotonically rising toward the center
        for i in 1..half.len() {
            assert!(half[i] >= half[i - 1]);
        }
    }

    #[test]
    fn applied_window_is_symmetric() {
        let half = hamming_half(256);
        let mut seg = vec![1.0f32; 256];
        apply_half_window(&mut seg, &half);
        assert!((seg[128] - 1.0).abs() < 1e-6);
        for j in 1..128 {
            assert!(
                (seg[j] - seg[256 - j]).abs() < 1e-6,
                "asymmetric at {}: {} vs {}",
                j,
                seg[j],
                seg[256 - j]
            );
        }
    }

    #[test]
    fn overlapped_halves_sum_constant() {
        // At 50% overlap two Hamming windows sum to a constant 1.08,
        // which is what keeps block-rate overlap-add click-free.
        let half = hamming_half(256);
        let mut a = vec![1.0f32; 256];
        apply_half_window(&mut a, &half);
        for j in 0..128 {
            let sum = a[j] + a[j + 128];
            assert!((sum - 1.08).abs() < 1e-4, "sum at {}: {}", j, sum);
        }
    }
}
