//! The resynthesis engine: frame reader, interpolator, and cross-synthesizer.

pub mod cross;
pub mod interp;
pub mod params;
pub mod reader;
mod resynth;

pub use cross::CrossSynthesizer;
pub use interp::FrameInterpolator;
pub use reader::FrameReader;

use crate::error::PvocError;

/// Resolves a fractional time index to an analysis frame index.
///
/// Negative times are per-call errors; indices past the last frame clamp to
/// it, logging the truncation notice exactly once per instance (`truncated`
/// is the per-instance proceed flag).
pub(crate) fn resolve_frame_index(
    time_index: f32,
    frames_per_second: f32,
    max_frame_index: usize,
    truncated: &mut bool,
) -> Result<usize, PvocError> {
    let frame = time_index * frames_per_second;
    if frame < 0.0 {
        return Err(PvocError::NegativeTimeIndex(time_index));
    }
    if frame > max_frame_index as f32 {
        if !*truncated {
            *truncated = true;
            log::warn!(
                "PVOC time index {:.4}s truncated to last frame {}",
                time_index,
                max_frame_index
            );
        }
        return Ok(max_frame_index);
    }
    Ok(frame as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_time_is_an_error() {
        let mut truncated = false;
        let err = resolve_frame_index(-0.001, 100.0, 10, &mut truncated).unwrap_err();
        assert!(matches!(err, PvocError::NegativeTimeIndex(_)));
        assert!(!truncated);
    }

    #[test]
    fn over_range_clamps_and_latches() {
        let mut truncated = false;
        assert_eq!(resolve_frame_index(1.0, 100.0, 10, &mut truncated).unwrap(), 10);
        assert!(truncated);
        // Stays latched; further over-range calls keep clamping silently.
        assert_eq!(resolve_frame_index(2.0, 100.0, 10, &mut truncated).unwrap(), 10);
        assert!(truncated);
    }

    #[test]
    fn in_range_floors() {
        let mut truncated = false;
        assert_eq!(resolve_frame_index(0.057, 100.0, 10, &mut truncated).unwrap(), 5);
        assert!(!truncated);
    }
}
