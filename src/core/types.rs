//! Shared constants and type aliases for the resynthesis engine.

/// Magic tag identifying a PVOC spectral file.
pub const PV_MAGIC: u32 = 517730;

/// Data-format tag for 32-bit float analysis data, the only format the
/// engine consumes.
pub const PV_FORMAT_F32: u32 = 4;

/// Largest supported analysis frame (FFT points). Also the capacity of the
/// circular output accumulator and the resampling scratch.
pub const MAX_FRAME_SIZE: usize = 8192;

/// Capacity of the stored output-window half, in points.
pub const MAX_WINDOW_POINTS: usize = 4097;

/// Minimum analysis frame accepted by [`FrameReader`](crate::FrameReader).
pub const MIN_READER_FRAME: usize = 128;

/// Minimum analysis frame accepted by the resynthesis consumers.
///
/// The reader and the consumers use different floors; the asymmetry is
/// inherited from the original engine and preserved as-is.
pub const MIN_RESYNTH_FRAME: usize = MAX_FRAME_SIZE / 8;

/// Output window length as a multiple of `2 * block_size`.
pub const WINDOW_FACTOR: usize = 1;
