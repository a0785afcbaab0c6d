//! Spectral-file loading: the PVOC binary format and the process-wide cache.

pub mod cache;
pub mod pvoc_file;
