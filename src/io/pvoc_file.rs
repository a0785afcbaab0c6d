//! PVOC spectral-file format: a binary header followed by consecutive
//! analysis frames of interleaved `(amplitude, frequency)` bin pairs.
//!
//! The engine is a read-only consumer of files produced by an external
//! analysis step; the writer here exists for tooling and tests.

use crate::core::types::{MAX_FRAME_SIZE, PV_FORMAT_F32, PV_MAGIC};
use crate::error::PvocError;
use std::io::Read;

/// Size of the fixed header prefix in bytes.
pub const HEADER_SIZE: usize = 32;

/// Parsed PVOC file header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvocHeader {
    /// Format tag, must equal [`PV_MAGIC`].
    pub magic: u32,
    /// FFT point count; each frame holds `frame_size / 2 + 1` bin pairs.
    pub frame_size: u32,
    /// Analysis hop size in input samples.
    pub frame_increment: u32,
    /// Channel count, must equal 1.
    pub channels: u32,
    /// Sample rate of the analyzed audio.
    pub sample_rate: f32,
    /// Numeric layout of the frame data, must equal [`PV_FORMAT_F32`].
    pub data_format: u32,
    /// Byte offset where frame data begins.
    pub header_size: u32,
    /// Total frame-data bytes.
    pub data_size: u32,
}

/// An immutable, fully loaded spectral file.
///
/// Loaded once per distinct filename (see
/// [`SpectralCache`](crate::SpectralCache)) and shared by reference among
/// all readers of that file.
#[derive(Debug, Clone)]
pub struct PvocFile {
    name: String,
    header: PvocHeader,
    frames: Vec<f32>,
    max_frame_index: usize,
}

impl PvocFile {
    /// Parses and validates a PVOC file from raw bytes.
    ///
    /// `name` is used only for diagnostics. Structural violations (magic,
    /// data format, channel count, truncated or misaligned data) are fatal
    /// `InvalidFormat` errors. Frame-size floors are checked by consumers,
    /// which use different minimums.
    pub fn parse(name: &str, bytes: &[u8]) -> Result<Self, PvocError> {
        if bytes.len() < HEADER_SIZE {
            return Err(PvocError::InvalidFormat(format!(
                "{}: file shorter than the {}-byte header",
                name, HEADER_SIZE
            )));
        }
        let header = PvocHeader {
            magic: read_u32_le(bytes, 0),
            frame_size: read_u32_le(bytes, 4),
            frame_increment: read_u32_le(bytes, 8),
            channels: read_u32_le(bytes, 12),
            sample_rate: f32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]),
            data_format: read_u32_le(bytes, 20),
            header_size: read_u32_le(bytes, 24),
            data_size: read_u32_le(bytes, 28),
        };

        if header.magic != PV_MAGIC {
            return Err(PvocError::InvalidFormat(format!(
                "{} is not a PVOC file (magic {})",
                name, header.magic
            )));
        }
        if header.data_format != PV_FORMAT_F32 {
            return Err(PvocError::InvalidFormat(format!(
                "unsupported PVOC data format {} in {}",
                header.data_format, name
            )));
        }
        if header.channels != 1 {
            return Err(PvocError::InvalidFormat(format!(
                "{} channels (not 1) in PVOC file {}",
                header.channels, name
            )));
        }
        if header.frame_increment == 0 {
            return Err(PvocError::InvalidFormat(format!(
                "zero frame increment in {}",
                name
            )));
        }
        if (header.header_size as usize) < HEADER_SIZE {
            return Err(PvocError::InvalidFormat(format!(
                "header size {} too small in {}",
                header.header_size, name
            )));
        }

        let stride = header.frame_size as usize + 2;
        let stride_bytes = stride * 4;
        let data_size = header.data_size as usize;
        if data_size == 0 || !data_size.is_multiple_of(stride_bytes) {
            return Err(PvocError::InvalidFormat(format!(
                "data size {} is not a whole number of {}-float frames in {}",
                data_size, stride, name
            )));
        }
        let data_start = header.header_size as usize;
        if bytes.len() < data_start + data_size {
            return Err(PvocError::InvalidFormat(format!(
                "{} truncated: header promises {} data bytes",
                name, data_size
            )));
        }

        let float_count = data_size / 4;
        let mut frames = Vec::with_capacity(float_count);
        for i in 0..float_count {
            let o = data_start + i * 4;
            frames.push(f32::from_le_bytes([
                bytes[o],
                bytes[o + 1],
                bytes[o + 2],
                bytes[o + 3],
            ]));
        }

        Ok(Self {
            name: name.to_string(),
            header,
            frames,
            max_frame_index: float_count / stride - 1,
        })
    }

    /// Reads and parses a PVOC file from disk.
    pub fn open(path: &str) -> Result<Self, PvocError> {
        let mut file = std::fs::File::open(path)
            .map_err(|e| PvocError::Io(format!("{}: {}", path, e)))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| PvocError::Io(format!("{}: {}", path, e)))?;
        Self::parse(path, &bytes)
    }

    /// Diagnostic name the file was loaded under.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parsed header.
    #[inline]
    pub fn header(&self) -> &PvocHeader {
        &self.header
    }

    /// FFT point count.
    #[inline]
    pub fn frame_size(&self) -> usize {
        self.header.frame_size as usize
    }

    /// Analysis hop size in input samples.
    #[inline]
    pub fn frame_increment(&self) -> usize {
        self.header.frame_increment as usize
    }

    /// Sample rate of the analyzed audio.
    #[inline]
    pub fn sample_rate(&self) -> f32 {
        self.header.sample_rate
    }

    /// Number of floats per stored frame (`frame_size + 2`).
    #[inline]
    pub fn frame_len(&self) -> usize {
        self.frame_size() + 2
    }

    /// Highest valid frame index.
    #[inline]
    pub fn max_frame_index(&self) -> usize {
        self.max_frame_index
    }

    /// Borrows the `(amplitude, frequency)` pairs of frame `index`.
    ///
    /// # Panics
    /// Panics if `index` exceeds [`max_frame_index`](Self::max_frame_index);
    /// callers clamp before fetching.
    #[inline]
    pub fn frame(&self, index: usize) -> &[f32] {
        let stride = self.frame_len();
        &self.frames[index * stride..(index + 1) * stride]
    }

    /// Checks the frame size against a consumer-specific floor.
    ///
    /// The reader and the resynthesis consumers use different floors, an
    /// asymmetry inherited from the original engine.
    pub fn check_frame_size(&self, min: usize) -> Result<(), PvocError> {
        let size = self.frame_size();
        if size > MAX_FRAME_SIZE {
            return Err(PvocError::InvalidFormat(format!(
                "PVOC frame of {} points bigger than {} in {}",
                size, MAX_FRAME_SIZE, self.name
            )));
        }
        if size < min {
            return Err(PvocError::InvalidFormat(format!(
                "PVOC frame of {} points seems too small (minimum {}) in {}",
                size, min, self.name
            )));
        }
        Ok(())
    }
}

/// Serializes analysis frames into PVOC file bytes.
///
/// `frames` holds consecutive frames of `frame_size + 2` floats each.
/// Intended for analysis tooling and tests; the engine itself only reads.
pub fn write_pvoc(
    sample_rate: f32,
    frame_size: usize,
    frame_increment: usize,
    frames: &[f32],
) -> Vec<u8> {
    write_pvoc_with_channels(sample_rate, frame_size, frame_increment, 1, frames)
}

/// [`write_pvoc`] with an explicit channel count, for format tests.
pub fn write_pvoc_with_channels(
    sample_rate: f32,
    frame_size: usize,
    frame_increment: usize,
    channels: u32,
    frames: &[f32],
) -> Vec<u8> {
    let data_size = (frames.len() * 4) as u32;
    let mut out = Vec::with_capacity(HEADER_SIZE + frames.len() * 4);
    out.extend_from_slice(&PV_MAGIC.to_le_bytes());
    out.extend_from_slice(&(frame_size as u32).to_le_bytes());
    out.extend_from_slice(&(frame_increment as u32).to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&PV_FORMAT_F32.to_le_bytes());
    out.extend_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
    out.extend_from_slice(&data_size.to_le_bytes());
    for &value in frames {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

#[inline]
fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
