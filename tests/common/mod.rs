//! Shared helpers: synthetic PVOC files and signal measurement.

#![allow(dead_code)]

use pvoc::{write_pvoc, PvocFile};

pub const FRAME_SIZE: usize = 1024;
pub const HOP: usize = 256;
pub const SR: f32 = 44100.0;
pub const BLOCK: usize = 128;

/// Installs the test logger so `RUST_LOG` gates the engine's warnings.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds an analysis file holding `frames` identical frames: every bin's
/// frequency slot carries its bin-centre frequency, and `bin` carries
/// amplitude `amp` (all other amplitudes zero). `amp = 0.0` gives silence
/// with realistic frequency tracks.
pub fn tone_file(name: &str, bin: usize, amp: f32, frames: usize) -> PvocFile {
    tone_file_sized(name, FRAME_SIZE, bin, amp, frames)
}

/// [`tone_file`] with an explicit frame size.
pub fn tone_file_sized(
    name: &str,
    frame_size: usize,
    bin: usize,
    amp: f32,
    frames: usize,
) -> PvocFile {
    let stride = frame_size + 2;
    let bins = frame_size / 2 + 1;
    let mut data = vec![0.0f32; stride * frames];
    for frame in data.chunks_mut(stride) {
        for k in 0..bins {
            frame[2 * k + 1] = k as f32 * SR / frame_size as f32;
        }
        frame[2 * bin] = amp;
    }
    let bytes = write_pvoc(SR, frame_size, HOP, &data);
    PvocFile::parse(name, &bytes).unwrap()
}

/// Root-mean-square level of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

/// Time index of control period `n` in seconds.
pub fn block_time(n: usize) -> f32 {
    n as f32 * BLOCK as f32 / SR
}
