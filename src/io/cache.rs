//! Filename-keyed cache of loaded spectral files.
//!
//! Every opcode instance performs its own lookup-or-load at initialization
//! time, before real-time processing begins; the host runtime owns one
//! cache for the life of the run. Loaded files are immutable and handed
//! out as shared `Arc` references, so a file referenced by many voices is
//! read from disk exactly once.

use crate::error::PvocError;
use crate::io::pvoc_file::PvocFile;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves an instrument-relative numeric identifier to the conventional
/// `pvoc.N` filename.
pub fn numbered_name(n: u32) -> String {
    format!("pvoc.{}", n)
}

/// Process-wide spectral-file cache.
#[derive(Debug, Default)]
pub struct SpectralCache {
    files: HashMap<String, Arc<PvocFile>>,
}

impl SpectralCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached file for `path`, loading and validating it on
    /// first reference.
    ///
    /// Idempotent per filename: repeated loads return the same handle
    /// without touching the filesystem again.
    pub fn load(&mut self, path: &str) -> Result<Arc<PvocFile>, PvocError> {
        if let Some(file) = self.files.get(path) {
            return Ok(Arc::clone(file));
        }
        log::debug!("loading PVOC file {}", path);
        let file = Arc::new(PvocFile::open(path)?);
        self.files.insert(path.to_string(), Arc::clone(&file));
        Ok(file)
    }

    /// Loads the file named by a numeric instrument argument (`pvoc.N`).
    pub fn load_numbered(&mut self, n: u32) -> Result<Arc<PvocFile>, PvocError> {
        self.load(&numbered_name(n))
    }

    /// Registers an already-parsed file under `name`, returning the shared
    /// handle. Initialization-time API for embedded or generated analysis
    /// data; a file already cached under that name is replaced.
    pub fn insert(&mut self, name: &str, file: PvocFile) -> Arc<PvocFile> {
        let file = Arc::new(file);
        self.files.insert(name.to_string(), Arc::clone(&file));
        file
    }

    /// Returns the cached handle for `name`, if loaded.
    pub fn get(&self, name: &str) -> Option<Arc<PvocFile>> {
        self.files.get(name).cloned()
    }

    /// Number of cached files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::pvoc_file::write_pvoc;

    fn silent_file(frame_size: usize, frames: usize) -> PvocFile {
        let data = vec![0.0f32; (frame_size + 2) * frames];
        let bytes = write_pvoc(44100.0, frame_size, 256, &data);
        PvocFile::parse("mem", &bytes).unwrap()
    }

    #[test]
    fn numbered_names() {
        assert_eq!(numbered_name(3), "pvoc.3");
    }

    #[test]
    fn insert_and_get_share_one_handle() {
        let mut cache = SpectralCache::new();
        let a = cache.insert("pvoc.1", silent_file(1024, 2));
        let b = cache.get("pvoc.1").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut cache = SpectralCache::new();
        let err = cache.load("/nonexistent/pvoc.404").unwrap_err();
        assert!(matches!(err, PvocError::Io(_)));
        assert!(cache.is_empty());
    }
}
