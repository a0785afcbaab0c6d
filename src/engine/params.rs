//! Engine configuration and per-call control-rate inputs.
//!
//! All control values are read fresh each control period; nothing here is
//! persisted between calls beyond what the processing state itself tracks.

use serde::{Deserialize, Serialize};

/// Fixed engine parameters: the output sample rate and the control block
/// size driving the per-period scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineParams {
    /// Output sample rate in Hz.
    pub sample_rate: f32,
    /// Samples per control period.
    pub block_size: usize,
}

impl EngineParams {
    /// Creates engine parameters.
    pub fn new(sample_rate: f32, block_size: usize) -> Self {
        Self {
            sample_rate,
            block_size,
        }
    }
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            block_size: 64,
        }
    }
}

/// Per-call controls for [`FrameInterpolator`](crate::FrameInterpolator).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpControls {
    /// Time index into the live analysis stream, in seconds.
    pub time_index: f32,
    /// Time index the bound frame reader resolves, in seconds.
    pub reader_time_index: f32,
    /// Pitch/time transposition exponent.
    pub pitch: f32,
    /// Amplitude scale applied to the live stream's bins.
    pub amp_scale_live: f32,
    /// Amplitude scale applied to the buffered (reader) stream's bins.
    pub amp_scale_buffered: f32,
    /// Frequency scale applied to the live stream's bins.
    pub freq_scale_live: f32,
    /// Frequency scale applied to the buffered stream's bins.
    pub freq_scale_buffered: f32,
    /// Amplitude blend: 0.0 = live only, 1.0 = buffered only.
    pub amp_interp: f32,
    /// Frequency blend: 0.0 = live only, 1.0 = buffered only.
    pub freq_interp: f32,
}

impl InterpControls {
    /// Controls with unity scales, unity pitch, and no blending.
    pub fn new(time_index: f32, reader_time_index: f32) -> Self {
        Self {
            time_index,
            reader_time_index,
            pitch: 1.0,
            amp_scale_live: 1.0,
            amp_scale_buffered: 1.0,
            freq_scale_live: 1.0,
            freq_scale_buffered: 1.0,
            amp_interp: 0.0,
            freq_interp: 0.0,
        }
    }

    /// Sets the pitch/time exponent.
    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    /// Sets the amplitude and frequency blend factors.
    pub fn with_interp(mut self, amp: f32, freq: f32) -> Self {
        self.amp_interp = amp;
        self.freq_interp = freq;
        self
    }

    /// Sets the per-stream amplitude scales.
    pub fn with_amp_scales(mut self, live: f32, buffered: f32) -> Self {
        self.amp_scale_live = live;
        self.amp_scale_buffered = buffered;
        self
    }

    /// Sets the per-stream frequency scales.
    pub fn with_freq_scales(mut self, live: f32, buffered: f32) -> Self {
        self.freq_scale_live = live;
        self.freq_scale_buffered = buffered;
        self
    }
}

/// Spectral-warp selector for [`CrossSynthesizer`](crate::CrossSynthesizer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectralWarp {
    /// Resynthesize every control period normally.
    Off,
    /// Pre-warp the amplitude envelope before the inverse transform to
    /// compensate smearing under extreme transposition.
    Warp,
    /// Throttle mode: only every n-th call after activation resynthesizes;
    /// the rest commit a silent, correctly time-aligned segment.
    Throttle(u32),
}

/// Per-call controls for [`CrossSynthesizer`](crate::CrossSynthesizer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossControls {
    /// Time index into the live analysis stream, in seconds.
    pub time_index: f32,
    /// Time index the bound frame reader resolves, in seconds.
    pub reader_time_index: f32,
    /// Pitch/time transposition exponent.
    pub pitch: f32,
    /// Weight of the live stream's amplitudes.
    pub amp_scale_live: f32,
    /// Weight of the buffered stream's amplitudes.
    pub amp_scale_buffered: f32,
    /// Spectral-warp mode.
    pub warp: SpectralWarp,
}

impl CrossControls {
    /// Controls with unity pitch, unity weights, and warping off.
    pub fn new(time_index: f32, reader_time_index: f32) -> Self {
        Self {
            time_index,
            reader_time_index,
            pitch: 1.0,
            amp_scale_live: 1.0,
            amp_scale_buffered: 1.0,
            warp: SpectralWarp::Off,
        }
    }

    /// Sets the pitch/time exponent.
    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    /// Sets the per-stream amplitude weights.
    pub fn with_amp_scales(mut self, live: f32, buffered: f32) -> Self {
        self.amp_scale_live = live;
        self.amp_scale_buffered = buffered;
        self
    }

    /// Sets the spectral-warp mode.
    pub fn with_warp(mut self, warp: SpectralWarp) -> Self {
        self.warp = warp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interp_defaults_are_passthrough() {
        let c = InterpControls::new(0.5, 0.25);
        assert_eq!(c.pitch, 1.0);
        assert_eq!(c.amp_interp, 0.0);
        assert_eq!(c.amp_scale_live, 1.0);
        assert_eq!(c.time_index, 0.5);
        assert_eq!(c.reader_time_index, 0.25);
    }

    #[test]
    fn builders_chain() {
        let c = InterpControls::new(0.0, 0.0)
            .with_pitch(2.0)
            .with_interp(0.5, 1.0)
            .with_amp_scales(0.8, 0.2);
        assert_eq!(c.pitch, 2.0);
        assert_eq!(c.freq_interp, 1.0);
        assert_eq!(c.amp_scale_buffered, 0.2);

        let x = CrossControls::new(0.0, 0.0).with_warp(SpectralWarp::Throttle(3));
        assert_eq!(x.warp, SpectralWarp::Throttle(3));
    }
}
