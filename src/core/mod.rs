//! DSP primitives shared by the resynthesis engine.

pub mod overlap;
pub mod resample;
pub mod spectral;
pub mod types;
pub mod window;
