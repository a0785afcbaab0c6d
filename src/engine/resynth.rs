//! Shared resynthesis state and pipeline for the interpolator and
//! cross-synthesizer: phase tracking, inverse transform, resampling,
//! windowing, and circular overlap-add.

use crate::core::overlap::OverlapAdd;
use crate::core::resample::{copy_centered, sinc_resample};
use crate::core::spectral::{freq_to_phase, polar_to_spectrum, rewrap_phase};
use crate::core::types::{MAX_FRAME_SIZE, MAX_WINDOW_POINTS, MIN_RESYNTH_FRAME, WINDOW_FACTOR};
use crate::core::window::{apply_half_window, hamming_half};
use crate::engine::params::EngineParams;
use crate::engine::resolve_frame_index;
use crate::error::PvocError;
use crate::io::pvoc_file::PvocFile;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Per-instance resynthesis core.
///
/// Owns every scratch buffer the per-call pipeline touches, so steady-state
/// processing allocates nothing. The live frame's `(amp, freq)` pairs pass
/// through `work`; consumers mix into it, then run the phase/inverse-FFT/
/// resample/window/overlap-add chain.
pub(crate) struct ResynthCore {
    file: Arc<PvocFile>,
    frame_size: usize,
    bins: usize,
    block_size: usize,
    window_len: usize,
    analysis_rate: f32,
    frames_per_second: f32,
    frames_per_block: f32,
    max_frame_index: usize,
    output_scale: f32,
    last_pex: f32,
    truncated: bool,
    work: Vec<f32>,
    last_phase: Vec<f32>,
    spectrum: Vec<Complex<f32>>,
    time_buf: Vec<f32>,
    segment: Vec<f32>,
    half_window: Vec<f32>,
    accum: OverlapAdd,
    ifft: Arc<dyn Fft<f32>>,
}

impl ResynthCore {
    /// Validates the file and engine parameters and sizes all buffers.
    ///
    /// Frame-size floor here is `MAX_FRAME_SIZE / 8`, stricter than the
    /// reader's 128 (the original engine's asymmetry, kept on purpose).
    pub(crate) fn new(file: Arc<PvocFile>, params: &EngineParams) -> Result<Self, PvocError> {
        file.check_frame_size(MIN_RESYNTH_FRAME)?;

        let block_size = params.block_size;
        let window_len = 2 * WINDOW_FACTOR * block_size;
        if window_len / 2 + 1 > MAX_WINDOW_POINTS {
            return Err(PvocError::InvalidFormat(format!(
                "control block of {} samples needs a {}-point window half, max is {} for {}",
                block_size,
                window_len / 2 + 1,
                MAX_WINDOW_POINTS,
                file.name()
            )));
        }
        if (file.sample_rate() - params.sample_rate).abs() > f32::EPSILON {
            log::warn!(
                "{}: analysis rate {:.0} Hz differs from engine rate {:.0} Hz",
                file.name(),
                file.sample_rate(),
                params.sample_rate
            );
        }

        let frame_size = file.frame_size();
        let bins = frame_size / 2 + 1;
        let increment = file.frame_increment() as f32;

        // 2*block/window_len compensates the window overlap; 1/frame_size
        // is the unnormalized inverse FFT's scale factor.
        let output_scale =
            2.0 * block_size as f32 / window_len as f32 / frame_size as f32;

        let mut planner = FftPlanner::new();
        let ifft = planner.plan_fft_inverse(frame_size);

        Ok(Self {
            frame_size,
            bins,
            block_size,
            window_len,
            analysis_rate: file.sample_rate(),
            frames_per_second: params.sample_rate / increment,
            frames_per_block: block_size as f32 / increment,
            max_frame_index: file.max_frame_index(),
            output_scale,
            last_pex: 1.0,
            truncated: false,
            work: vec![0.0; frame_size + 2],
            last_phase: vec![0.0; bins],
            spectrum: vec![Complex::new(0.0, 0.0); frame_size],
            time_buf: vec![0.0; frame_size],
            segment: vec![0.0; window_len],
            half_window: hamming_half(window_len),
            accum: OverlapAdd::new(MAX_FRAME_SIZE),
            ifft,
            file,
        })
    }

    #[inline]
    pub(crate) fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline]
    pub(crate) fn bins(&self) -> usize {
        self.bins
    }

    #[inline]
    pub(crate) fn frame_size(&self) -> usize {
        self.frame_size
    }

    #[inline]
    pub(crate) fn frames_per_block(&self) -> f32 {
        self.frames_per_block
    }

    #[inline]
    pub(crate) fn output_scale(&self) -> f32 {
        self.output_scale
    }

    #[inline]
    pub(crate) fn has_truncated(&self) -> bool {
        self.truncated
    }

    /// Mutable access to the live frame's `(amp, freq)` pairs for the
    /// consumer's mixing step.
    #[inline]
    pub(crate) fn work_mut(&mut self) -> &mut [f32] {
        &mut self.work
    }

    /// Bounds-checks the transposition exponent.
    ///
    /// `outlen = frame_size / pex` is the stretched segment length before
    /// squeezing to the output window; it must fit the scratch capacity
    /// (transpose floor) and cover at least two control blocks (transpose
    /// ceiling). Both exact boundaries are legal.
    pub(crate) fn check_transpose(&self, pex: f32) -> Result<usize, PvocError> {
        let outlen = (self.frame_size as f32 / pex) as usize;
        if outlen > MAX_FRAME_SIZE {
            return Err(PvocError::TransposeTooLow {
                outlen,
                max: MAX_FRAME_SIZE,
            });
        }
        if outlen < 2 * self.block_size {
            return Err(PvocError::TransposeTooHigh {
                outlen,
                min: 2 * self.block_size,
            });
        }
        Ok(outlen)
    }

    /// Fetches the live analysis frame at `time_index` into `work`, with
    /// the same clamp/warn-once semantics as the frame reader.
    pub(crate) fn fetch_live(&mut self, time_index: f32) -> Result<(), PvocError> {
        let index = resolve_frame_index(
            time_index,
            self.frames_per_second,
            self.max_frame_index,
            &mut self.truncated,
        )?;
        self.work.copy_from_slice(self.file.frame(index));
        Ok(())
    }

    /// Converts the mixed frequencies to accumulated phases.
    ///
    /// The window-centre fixup re-aligns phase when the transposition
    /// ratio changed since the previous call.
    pub(crate) fn advance_phase(&mut self, pex: f32) {
        let fixup = 0.5 * (pex / self.last_pex - 1.0);
        freq_to_phase(
            &mut self.work,
            self.bins,
            pex * self.block_size as f32,
            self.analysis_rate,
            fixup,
        );
        rewrap_phase(&mut self.work, self.bins, &mut self.last_phase);
    }

    /// Inverse-transforms `work` and squeezes the centered segment into
    /// the output window, optionally applying the analysis half-window.
    pub(crate) fn synthesize(&mut self, pex: f32, window: bool) {
        polar_to_spectrum(&self.work, self.bins, &mut self.spectrum);
        self.ifft.process(&mut self.spectrum);
        for (t, c) in self.time_buf.iter_mut().zip(self.spectrum.iter()) {
            *t = c.re;
        }

        let start = 0.5 * (self.frame_size as f32 - pex * self.window_len as f32);
        if pex == 1.0 {
            copy_centered(&self.time_buf, start as usize, &mut self.segment);
        } else {
            sinc_resample(&self.time_buf, start, pex, &mut self.segment);
        }
        if window {
            apply_half_window(&mut self.segment, &self.half_window);
        }
    }

    /// Replaces the pending segment with silence (throttled calls).
    pub(crate) fn silence(&mut self) {
        self.segment.iter_mut().for_each(|s| *s = 0.0);
    }

    /// Overlap-adds the pending segment, drains one control block into
    /// `out`, and records `pex` for the next call's phase fixup.
    pub(crate) fn commit(&mut self, pex: f32, out: &mut [f32]) {
        self.accum.commit(&self.segment, out);
        self.last_pex = pex;
    }
}
