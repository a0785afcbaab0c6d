//! Circular overlap-add accumulator for block-rate resynthesis.
//!
//! Each control period one windowed segment is mixed into the accumulator
//! and exactly one control block is drained from it. The buffer never
//! allocates after construction; the write position advances by the block
//! size and wraps modulo the fixed capacity.

/// Fixed-capacity circular accumulation buffer.
#[derive(Debug, Clone)]
pub struct OverlapAdd {
    data: Vec<f32>,
    pos: usize,
}

impl OverlapAdd {
    /// Creates an accumulator with fixed capacity, zero-filled.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity],
            pos: 0,
        }
    }

    /// Returns the fixed capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the current write position.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Zeroes the buffer and rewinds the write position.
    pub fn reset(&mut self) {
        self.data.iter_mut().for_each(|x| *x = 0.0);
        self.pos = 0;
    }

    /// Adds `segment` into the buffer starting at `start`, wrapping.
    fn mix_in(&mut self, segment: &[f32], start: usize) {
        let cap = self.data.len();
        for (i, &s) in segment.iter().enumerate() {
            self.data[(start + i) % cap] += s;
        }
    }

    /// Copies one block out of the buffer at `self.pos`, zeroing the
    /// copied slots so they can accumulate the next round of overlaps.
    fn drain(&mut self, out: &mut [f32]) {
        let cap = self.data.len();
        for (i, o) in out.iter_mut().enumerate() {
            let idx = (self.pos + i) % cap;
            *o = self.data[idx];
            self.data[idx] = 0.0;
        }
    }

    /// Performs one control period of overlap-add bookkeeping.
    ///
    /// Mixes the first `out.len()` samples of `segment` at the write
    /// position, drains one block into `out`, advances the position by the
    /// block size, then mixes the remainder of `segment` at the new
    /// position. Even an all-zero segment must be committed so the write
    /// position stays aligned with real time.
    pub fn commit(&mut self, segment: &[f32], out: &mut [f32]) {
        let block = out.len();
        debug_assert!(segment.len() >= block);
        let pos = self.pos;
        self.mix_in(&segment[..block], pos);
        self.drain(out);
        self.pos = (self.pos + block) % self.data.len();
        let pos = self.pos;
        self.mix_in(&segment[block..], pos);
    }
}
