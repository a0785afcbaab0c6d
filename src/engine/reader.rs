//! Frame reader: resolves a time index to the nearest stored analysis
//! frame and buffers it for the resynthesis consumers.

use crate::core::types::MIN_READER_FRAME;
use crate::engine::params::EngineParams;
use crate::engine::resolve_frame_index;
use crate::error::PvocError;
use crate::io::pvoc_file::PvocFile;
use std::sync::Arc;

/// Buffers one analysis frame per control period as the "secondary"
/// spectral stream consumed by [`FrameInterpolator`](crate::FrameInterpolator)
/// and [`CrossSynthesizer`](crate::CrossSynthesizer).
///
/// Consumers hold a shared handle to their reader, bound at construction,
/// and refresh it themselves at the top of each `process` call — the
/// reader-before-consumer ordering is a typed dependency, not a call-order
/// convention.
#[derive(Debug)]
pub struct FrameReader {
    file: Arc<PvocFile>,
    frame: Vec<f32>,
    frames_per_second: f32,
    frames_per_block: f32,
    max_frame_index: usize,
    truncated: bool,
}

impl FrameReader {
    /// Binds a reader to a loaded spectral file.
    ///
    /// Fails with `InvalidFormat` if the file's frame size is outside
    /// `[128, 8192]`.
    pub fn new(file: Arc<PvocFile>, params: &EngineParams) -> Result<Self, PvocError> {
        file.check_frame_size(MIN_READER_FRAME)?;
        if (file.sample_rate() - params.sample_rate).abs() > f32::EPSILON {
            log::warn!(
                "{}: analysis rate {:.0} Hz differs from engine rate {:.0} Hz",
                file.name(),
                file.sample_rate(),
                params.sample_rate
            );
        }
        let increment = file.frame_increment() as f32;
        Ok(Self {
            frame: vec![0.0; file.frame_len()],
            frames_per_second: params.sample_rate / increment,
            frames_per_block: params.block_size as f32 / increment,
            max_frame_index: file.max_frame_index(),
            truncated: false,
            file,
        })
    }

    /// Fetches the frame nearest `time_index` (seconds) into the private
    /// buffer. Direct floor-index fetch; no interpolation between stored
    /// frames. Called once per control period, before the bound consumer
    /// mixes.
    pub fn fetch(&mut self, time_index: f32) -> Result<(), PvocError> {
        let index = resolve_frame_index(
            time_index,
            self.frames_per_second,
            self.max_frame_index,
            &mut self.truncated,
        )?;
        self.frame.copy_from_slice(self.file.frame(index));
        Ok(())
    }

    /// The last-fetched `(amplitude, frequency)` pairs.
    #[inline]
    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    /// The file this reader is bound to.
    #[inline]
    pub fn file(&self) -> &Arc<PvocFile> {
        &self.file
    }

    /// Analysis frames spanned by one control period.
    #[inline]
    pub fn frames_per_block(&self) -> f32 {
        self.frames_per_block
    }

    /// Analysis frames per second of audio time.
    #[inline]
    pub fn frames_per_second(&self) -> f32 {
        self.frames_per_second
    }

    /// True once a fetch has been clamped past the last frame.
    #[inline]
    pub fn has_truncated(&self) -> bool {
        self.truncated
    }
}
