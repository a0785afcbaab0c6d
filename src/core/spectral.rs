//! Spectral-frame transforms: frequency-to-phase conversion, phase
//! accumulation across control periods, polar-to-rectangular conversion
//! with real-FFT mirroring, and amplitude-envelope pre-warping.
//!
//! Frames are `(amplitude, frequency)` pairs, one pair per bin. The phase
//! pipeline rewrites the frequency slots in place: first into per-period
//! phase increments, then into accumulated absolute phases.

use rustfft::num_complex::Complex;
use std::f32::consts::PI;

pub(crate) const TWO_PI: f32 = 2.0 * PI;

/// Wraps a phase value to [-PI, PI].
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    let p = phase + PI;
    p - (p / TWO_PI).floor() * TWO_PI - PI
}

/// Converts the frequency slots of `pairs` from Hz to phase increments.
///
/// `incr_samples` is the stretched control period (`pex * block_size`) in
/// analysis-rate samples. `fixup` is the window-centre realignment ratio
/// applied when the transposition changed since the previous call: it adds
/// a linear-in-bin phase ramp, which in the time domain shifts the segment
/// so the centres of the old and new stretched windows coincide.
pub fn freq_to_phase(pairs: &mut [f32], bins: usize, incr_samples: f32, analysis_rate: f32, fixup: f32) {
    let factor = incr_samples * TWO_PI / analysis_rate;
    for k in 0..bins {
        pairs[2 * k + 1] = pairs[2 * k + 1] * factor + TWO_PI * k as f32 * fixup;
    }
}

/// Accumulates the phase increments in `pairs` onto `last_phase`.
///
/// Phases accumulate across control periods rather than resetting to the
/// principal value each frame; this continuity is what keeps transposed
/// resynthesis click-free. The running phase is kept wrapped to ±PI so it
/// never loses float precision.
pub fn rewrap_phase(pairs: &mut [f32], bins: usize, last_phase: &mut [f32]) {
    for k in 0..bins {
        let p = wrap_phase(last_phase[k] + pairs[2 * k + 1]);
        last_phase[k] = p;
        pairs[2 * k + 1] = p;
    }
}

/// Converts `(amplitude, phase)` pairs to a full complex spectrum ready for
/// the inverse FFT.
///
/// The DC and Nyquist imaginary slots are zeroed per the real-FFT packing
/// convention, and negative frequencies are conjugate-mirrored.
pub fn polar_to_spectrum(pairs: &[f32], bins: usize, spectrum: &mut [Complex<f32>]) {
    let size = spectrum.len();
    debug_assert_eq!(size, (bins - 1) * 2);
    for k in 0..bins {
        spectrum[k] = Complex::from_polar(pairs[2 * k], pairs[2 * k + 1]);
    }
    spectrum[0].im = 0.0;
    spectrum[size / 2].im = 0.0;
    for k in 1..size / 2 {
        spectrum[size - k] = spectrum[k].conj();
    }
}

/// Warps the amplitude envelope by `warp` before the inverse transform.
///
/// Each bin takes the (linearly interpolated) amplitude from position
/// `bin * warp`, clamped at the top bin. Compensates spectral smearing
/// under extreme transposition; phases are left untouched.
pub fn prewarp_amplitudes(pairs: &mut [f32], bins: usize, warp: f32, scratch: &mut [f32]) {
    if warp <= 0.0 {
        return;
    }
    for k in 0..bins {
        let pos = k as f32 * warp;
        let i0 = pos as usize;
        scratch[k] = if i0 >= bins - 1 {
            pairs[2 * (bins - 1)]
        } else {
            let frac = pos - i0 as f32;
            pairs[2 * i0] * (1.0 - frac) + pairs[2 * (i0 + 1)] * frac
        };
    }
    for k in 0..bins {
        pairs[2 * k] = scratch[k];
    }
}
