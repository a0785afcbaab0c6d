#![forbid(unsafe_code)]
//! Phase-vocoder analysis-resynthesis engine for PVOC spectral files.
//!
//! `pvoc` consumes spectral recordings produced by an external phase-vocoder
//! analysis step — sequences of `(amplitude, frequency)` frames — and
//! resynthesizes audio from them in real time: time-stretching,
//! pitch-shifting, interpolating between two spectral streams
//! ([`FrameInterpolator`]), and cross-synthesizing one stream's amplitudes
//! with another's frequencies ([`CrossSynthesizer`]).
//!
//! The engine runs one [`process`](FrameInterpolator::process) call per
//! fixed-size control block inside the host's audio callback. All file I/O
//! happens at initialization through the [`SpectralCache`]; steady-state
//! calls are pure computation over per-instance buffers, so the real-time
//! path never blocks or allocates.
//!
//! # Quick start
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use pvoc::{
//!     write_pvoc, EngineParams, FrameInterpolator, FrameReader, InterpControls,
//!     PvocFile, SpectralCache,
//! };
//!
//! // Four silent analysis frames of a 1024-point transform.
//! let frame_size = 1024;
//! let frames = vec![0.0f32; (frame_size + 2) * 4];
//! let bytes = write_pvoc(44100.0, frame_size, 256, &frames);
//!
//! let mut cache = SpectralCache::new();
//! let file = cache.insert("pvoc.1", PvocFile::parse("pvoc.1", &bytes).unwrap());
//!
//! let params = EngineParams::new(44100.0, 128);
//! let reader = Rc::new(RefCell::new(FrameReader::new(file.clone(), &params).unwrap()));
//! let mut interp = FrameInterpolator::new(file, Rc::clone(&reader), &params).unwrap();
//!
//! // One control period: refresh the reader, blend, resynthesize a block.
//! let mut block = vec![0.0f32; 128];
//! interp.process(&InterpControls::new(0.0, 0.0), &mut block).unwrap();
//! assert!(block.iter().all(|s| s.abs() < 1e-6));
//! ```
//!
//! # Scheduling contract
//!
//! Each consumer instance is driven by exactly one logical voice, once per
//! control period, single-threaded. A consumer holds the [`FrameReader`] it
//! was constructed with and refreshes it itself at the top of `process`, so
//! the reader-before-consumer ordering cannot be violated by call order.
//! Truncation past the last analysis frame clamps and logs a `log::warn!`
//! once per instance; per-call errors ([`PvocError`]) abort only that
//! block's output.

pub mod core;
pub mod engine;
pub mod error;
pub mod io;

pub use engine::params::{CrossControls, EngineParams, InterpControls, SpectralWarp};
pub use engine::{CrossSynthesizer, FrameInterpolator, FrameReader};
pub use error::PvocError;
pub use io::cache::{numbered_name, SpectralCache};
pub use io::pvoc_file::{write_pvoc, PvocFile, PvocHeader};
