//! Cross-synthesizer: imposes the buffered stream's amplitudes onto the
//! live stream's frequencies, with an optional spectral-warp stage.

use crate::core::spectral::prewarp_amplitudes;
use crate::engine::params::{CrossControls, EngineParams, SpectralWarp};
use crate::engine::reader::FrameReader;
use crate::engine::resynth::ResynthCore;
use crate::error::PvocError;
use crate::io::pvoc_file::PvocFile;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Mixes the two streams' amplitudes as a direct weighted sum (frequencies
/// come from the live stream untouched) and resynthesizes one control block
/// per call.
///
/// The [`SpectralWarp`] selector adds an amplitude-envelope pre-warp, or a
/// throttle mode where only every n-th call resynthesizes while the
/// overlap-add bookkeeping keeps running so later calls stay time-aligned.
pub struct CrossSynthesizer {
    core: ResynthCore,
    reader: Rc<RefCell<FrameReader>>,
    warp_scratch: Vec<f32>,
    throttle_count: u32,
}

impl CrossSynthesizer {
    /// Binds a cross-synthesizer to its live file and its frame reader.
    ///
    /// Same validation as [`FrameInterpolator`](crate::FrameInterpolator):
    /// resynthesis frame-size floor, window capacity, and matching frame
    /// sizes across the two streams.
    pub fn new(
        file: Arc<PvocFile>,
        reader: Rc<RefCell<FrameReader>>,
        params: &EngineParams,
    ) -> Result<Self, PvocError> {
        let core = ResynthCore::new(file, params)?;
        {
            let r = reader.borrow();
            if r.file().frame_size() != core.frame_size() {
                return Err(PvocError::InvalidFormat(format!(
                    "frame size mismatch: live stream has {} points, reader {} has {}",
                    core.frame_size(),
                    r.file().name(),
                    r.file().frame_size()
                )));
            }
        }
        let bins = core.bins();
        Ok(Self {
            core,
            reader,
            warp_scratch: vec![0.0; bins],
            throttle_count: 0,
        })
    }

    /// Resynthesizes one control block into `out`.
    ///
    /// Phase tracking advances on every call, including throttled ones, so
    /// resuming resynthesis stays phase-continuous.
    ///
    /// # Panics
    /// Panics if `out.len()` differs from the configured block size.
    pub fn process(&mut self, controls: &CrossControls, out: &mut [f32]) -> Result<(), PvocError> {
        assert_eq!(
            out.len(),
            self.core.block_size(),
            "output slice must be one control block"
        );
        let pex = controls.pitch;
        self.core.check_transpose(pex)?;

        self.reader.borrow_mut().fetch(controls.reader_time_index)?;
        self.core.fetch_live(controls.time_index)?;

        {
            let reader = self.reader.borrow();
            let buffered = reader.frame();
            let scale = self.core.output_scale();
            let bins = self.core.bins();
            let work = self.core.work_mut();
            for k in 0..bins {
                let i = 2 * k;
                work[i] = (work[i] * controls.amp_scale_live
                    + buffered[i] * controls.amp_scale_buffered)
                    * scale;
            }
        }

        self.core.advance_phase(pex);

        match controls.warp {
            SpectralWarp::Off => {
                self.throttle_count = 0;
                self.core.synthesize(pex, true);
            }
            SpectralWarp::Warp => {
                self.throttle_count = 0;
                let bins = self.core.bins();
                prewarp_amplitudes(self.core.work_mut(), bins, pex, &mut self.warp_scratch);
                self.core.synthesize(pex, true);
            }
            SpectralWarp::Throttle(n) => {
                let n = n.max(1);
                self.throttle_count += 1;
                if self.throttle_count % n == 0 {
                    // Passed frames skip the output window, matching the
                    // original engine's throttle path.
                    self.core.synthesize(pex, false);
                } else {
                    self.core.silence();
                }
            }
        }

        self.core.commit(pex, out);
        Ok(())
    }

    /// Analysis frames spanned by one control period of the live stream.
    #[inline]
    pub fn frames_per_block(&self) -> f32 {
        self.core.frames_per_block()
    }

    /// Precomputed output normalization factor.
    #[inline]
    pub fn output_scale(&self) -> f32 {
        self.core.output_scale()
    }

    /// True once the live stream's time index has been clamped past the
    /// last analysis frame.
    #[inline]
    pub fn has_truncated(&self) -> bool {
        self.core.has_truncated()
    }
}
