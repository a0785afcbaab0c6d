//! Error types for the pvoc crate.

use std::fmt;

/// Errors that can occur while loading spectral files or resynthesizing audio.
///
/// `Io` and `InvalidFormat` are fatal initialization errors: the owning
/// instance never becomes usable. The remaining variants are per-call
/// failures — the call produces no output, but the instance stays live and
/// the scheduler decides whether to mute the voice or abort the run.
#[derive(Debug, Clone, PartialEq)]
pub enum PvocError {
    /// I/O error while reading a spectral file.
    Io(String),
    /// Malformed or unsupported spectral file or analysis parameters.
    InvalidFormat(String),
    /// Negative time index requested from the analysis stream.
    NegativeTimeIndex(f32),
    /// Transposition ratio too low: the resynthesis segment would exceed
    /// the scratch buffer capacity.
    TransposeTooLow { outlen: usize, max: usize },
    /// Transposition ratio too high: the resynthesis segment would be
    /// shorter than the minimum post-squeeze window.
    TransposeTooHigh { outlen: usize, min: usize },
}

impl fmt::Display for PvocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PvocError::Io(msg) => write!(f, "I/O error: {}", msg),
            PvocError::InvalidFormat(msg) => write!(f, "invalid PVOC format: {}", msg),
            PvocError::NegativeTimeIndex(t) => {
                write!(f, "time index {} is negative", t)
            }
            PvocError::TransposeTooLow { outlen, max } => {
                write!(
                    f,
                    "transpose too low: segment of {} samples exceeds capacity {}",
                    outlen, max
                )
            }
            PvocError::TransposeTooHigh { outlen, min } => {
                write!(
                    f,
                    "transpose too high: segment of {} samples below minimum window {}",
                    outlen, min
                )
            }
        }
    }
}

impl std::error::Error for PvocError {}

impl From<std::io::Error> for PvocError {
    fn from(err: std::io::Error) -> Self {
        PvocError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = PvocError::TransposeTooHigh { outlen: 100, min: 256 };
        assert!(e.to_string().contains("transpose too high"));
        let e = PvocError::NegativeTimeIndex(-0.5);
        assert!(e.to_string().contains("negative"));
    }

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "pvoc.1");
        let e: PvocError = io.into();
        assert!(matches!(e, PvocError::Io(_)));
    }
}
