//! `resample/ring.rs` — circular history of recent input frames.
//!
//! The convolver needs the last `window_size` input frames, oldest first.
//! Frames are stored interleaved (frame-major) in a fixed ring with a single
//! write cursor shared by all channels, so wraparound happens per frame and
//! the wrap logic stays out of the convolution maths.

/// Fixed-capacity ring of interleaved float frames.
pub struct HistoryRing {
    data: Vec<f32>,
    window_size: usize,
    channels: usize,
    /// Next frame slot to overwrite; also the oldest frame in the ring.
    next: usize,
}

impl HistoryRing {
    /// Create a zero-filled ring of `window_size` frames.
    pub fn new(window_size: usize, channels: usize) -> Self {
        Self {
            data: vec![0.0; window_size * channels],
            window_size,
            channels,
            next: 0,
        }
    }

    /// Pre-load the ring for stream start: `window_size/2 − 1` frames of
    /// leading silence, then real input frames (silence again once `frames`
    /// runs out). Leaves the write cursor on the oldest frame.
    pub fn prime<'a, I>(&mut self, frames: &mut I)
    where
        I: Iterator<Item = &'a [i16]>,
    {
        for slot in self.window_size / 2 - 1..self.window_size {
            let base = slot * self.channels;
            match frames.next() {
                Some(frame) => {
                    for (dst, &src) in self.data[base..base + self.channels].iter_mut().zip(frame) {
                        *dst = f32::from(src);
                    }
                }
                None => self.data[base..base + self.channels].fill(0.0),
            }
        }
        self.next = 0;
    }

    /// Overwrite the oldest frame and advance the cursor. `None` writes
    /// silence (input exhausted).
    pub fn push(&mut self, frame: Option<&[i16]>) {
        let base = self.next * self.channels;
        match frame {
            Some(frame) => {
                for (dst, &src) in self.data[base..base + self.channels].iter_mut().zip(frame) {
                    *dst = f32::from(src);
                }
            }
            None => self.data[base..base + self.channels].fill(0.0),
        }
        self.next = (self.next + 1) % self.window_size;
    }

    /// The ring contents split at the write cursor: `(older, newer)` where
    /// `older` starts at the oldest frame and `newer` wraps around to the
    /// newest. Concatenated they are the history in age order.
    #[inline]
    pub fn wrapped(&self) -> (&[f32], &[f32]) {
        let (newer, older) = self.data.split_at(self.next * self.channels);
        (older, newer)
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prime_pads_leading_silence() {
        let mut ring = HistoryRing::new(8, 1);
        let input: Vec<i16> = vec![10, 20, 30, 40, 50, 60];
        let mut frames = input.chunks_exact(1);
        ring.prime(&mut frames);

        let (older, newer) = ring.wrapped();
        assert!(newer.is_empty());
        // 8/2 - 1 = 3 zero frames, then 5 real frames.
        assert_eq!(older, &[0.0, 0.0, 0.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
        // One input frame left unconsumed.
        assert_eq!(frames.next(), Some(&[60][..]));
    }

    #[test]
    fn prime_short_input_falls_back_to_silence() {
        let mut ring = HistoryRing::new(8, 2);
        let input: Vec<i16> = vec![1, 2, 3, 4];
        let mut frames = input.chunks_exact(2);
        ring.prime(&mut frames);

        let (older, _) = ring.wrapped();
        assert_eq!(
            older,
            &[
                0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // padding
                1.0, 2.0, 3.0, 4.0, // real frames
                0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // exhausted
            ]
        );
    }

    #[test]
    fn push_wraps_cursor() {
        let mut ring = HistoryRing::new(4, 1);
        for v in 1..=5i16 {
            ring.push(Some(&[v]));
        }
        // Fifth push overwrote the first slot; cursor is on the oldest (2.0).
        let (older, newer) = ring.wrapped();
        assert_eq!(older, &[2.0, 3.0, 4.0]);
        assert_eq!(newer, &[5.0]);
    }

    #[test]
    fn push_none_writes_silence() {
        let mut ring = HistoryRing::new(2, 2);
        ring.push(Some(&[7, 8]));
        ring.push(None);
        // Cursor wrapped back to slot 0: oldest is the frame, newest silence.
        let (older, newer) = ring.wrapped();
        assert_eq!(older, &[7.0, 8.0, 0.0, 0.0]);
        assert!(newer.is_empty());
    }
}
