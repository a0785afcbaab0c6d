//! Frame interpolator: blends two spectral streams bin by bin, then
//! pitch/time-transposes and resynthesizes the result.

use crate::engine::params::{EngineParams, InterpControls};
use crate::engine::reader::FrameReader;
use crate::engine::resynth::ResynthCore;
use crate::error::PvocError;
use crate::io::pvoc_file::PvocFile;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Linearly interpolates amplitude and frequency between the live analysis
/// stream and the bound [`FrameReader`]'s buffered stream, then resynthesizes
/// one control block per call through the shared phase-vocoder pipeline.
pub struct FrameInterpolator {
    core: ResynthCore,
    reader: Rc<RefCell<FrameReader>>,
}

impl FrameInterpolator {
    /// Binds an interpolator to its live file and its frame reader.
    ///
    /// The reader association is fixed for the instance's lifetime. Both
    /// streams must carry the same frame size so their bins line up.
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
        Ok(Self { core, reader })
    }

    /// Resynthesizes one control block into `out`.
    ///
    /// Refreshes the bound reader at `controls.reader_time_index`, fetches
    /// the live frame at `controls.time_index`, blends, and overlap-adds.
    /// Per-call errors leave `out` untouched and the instance usable.
    ///
    /// # Panics
    /// Panics if `out.len()` differs from the configured block size.
    pub fn process(&mut self, controls: &InterpControls, out: &mut [f32]) -> Result<(), PvocError> {
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
                let (i, j) = (2 * k, 2 * k + 1);
                let amp_live = work[i] * controls.amp_scale_live;
                let amp_buf = buffered[i] * controls.amp_scale_buffered;
                let freq_live = work[j] * controls.freq_scale_live;
                let freq_buf = buffered[j] * controls.freq_scale_buffered;
                work[i] = (amp_live + (amp_buf - amp_live) * controls.amp_interp) * scale;
                // The frequency term is not rescaled by the output scale.
                work[j] = freq_live + (freq_buf - freq_live) * controls.freq_interp;
            }
        }

        self.core.advance_phase(pex);
        self.core.synthesize(pex, true);
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
