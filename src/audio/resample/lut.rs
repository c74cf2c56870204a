//! `resample/lut.rs` — precomputed filter tap table.
//!
//! Evaluating a windowed sinc per tap per output sample would put two
//! transcendentals on the hot path. Instead the kernel is sampled once into
//! `LUT_STEPS` phase rows of `window_size` taps each, and the convolver
//! blends linearly between adjacent rows. Each tap stores its value together
//! with the forward difference to the same tap in the next row, so the blend
//! is a single fused multiply-add: `value + delta * interp`.

use crate::audio::constants::LUT_STEPS;
use crate::audio::resample::window::{WindowKind, sinc};

/// One filter tap: the kernel value at this phase row plus the forward
/// difference to the next row. The last row's `delta` is zero by convention
/// (there is no wraparound interpolation).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterTap {
    pub value: f32,
    pub delta: f32,
}

/// A fully built `LUT_STEPS × window_size` tap table, row-major.
///
/// Owned by the caller and passed by reference into the convolution loop, so
/// concurrent resample calls each get their own table.
pub struct FilterTable {
    taps: Vec<FilterTap>,
    window_size: usize,
}

impl FilterTable {
    /// Sample the windowed sinc kernel into a phase-row table.
    ///
    /// `freq_adjust` (≤ 1.0) narrows the passband for anti-aliasing when
    /// downsampling; scaling both the sinc argument and its amplitude keeps
    /// DC gain at unity.
    pub fn build(window_size: usize, freq_adjust: f64, window: WindowKind) -> Self {
        debug_assert!(window_size.is_power_of_two());
        debug_assert!(freq_adjust > 0.0 && freq_adjust <= 1.0);

        // The window shape is phase-independent; evaluate it once per tap.
        let window_lut: Vec<f64> = (0..window_size)
            .map(|j| window.evaluate(j, window_size))
            .collect();

        let mut taps = vec![FilterTap::default(); LUT_STEPS * window_size];
        let half = (window_size / 2) as f64;

        for (row, chunk) in taps.chunks_exact_mut(window_size).enumerate() {
            let phase = row as f64 / (LUT_STEPS - 1) as f64;
            for (j, tap) in chunk.iter_mut().enumerate() {
                let npos = j as f64 - half + phase;
                tap.value = (sinc(npos * freq_adjust) * freq_adjust * window_lut[j]) as f32;
            }
        }

        // Forward differences between consecutive rows; the final row keeps
        // its default zero deltas.
        for row in 0..LUT_STEPS - 1 {
            let base = row * window_size;
            for j in 0..window_size {
                taps[base + j].delta = taps[base + window_size + j].value - taps[base + j].value;
            }
        }

        Self { taps, window_size }
    }

    /// Taps for one phase row.
    #[inline]
    pub fn row(&self, index: usize) -> &[FilterTap] {
        &self.taps[index * self.window_size..(index + 1) * self.window_size]
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn table() -> FilterTable {
        FilterTable::build(64, 1.0, WindowKind::BlackmanHarris)
    }

    #[test]
    fn interp_zero_reproduces_row_value() {
        let t = table();
        let row = t.row(17);
        for tap in row {
            assert_eq!(tap.value + tap.delta * 0.0, tap.value);
        }
    }

    #[test]
    fn interp_one_reaches_next_row() {
        let t = table();
        for row in 0..LUT_STEPS - 1 {
            let cur = t.row(row);
            let next = t.row(row + 1);
            for (a, b) in cur.iter().zip(next) {
                assert_abs_diff_eq!(a.value + a.delta * 1.0, b.value, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn last_row_delta_is_zero() {
        let t = table();
        for tap in t.row(LUT_STEPS - 1) {
            assert_eq!(tap.delta, 0.0);
        }
    }

    #[test]
    fn center_tap_dominates() {
        // At phase 0 the kernel is aligned on the tap grid: the center tap
        // holds sinc(0) scaled by the window, every other tap sits on a sinc
        // zero crossing.
        let t = table();
        let row = t.row(0);
        let center = 32;
        assert!(row[center].value > 0.9);
        for (j, tap) in row.iter().enumerate() {
            if j != center {
                assert_abs_diff_eq!(tap.value, 0.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn freq_adjust_preserves_dc_gain() {
        // Downsampling table: tap sum (DC response) should stay near unity.
        let t = FilterTable::build(256, 147.0 / 160.0, WindowKind::BlackmanHarris);
        let sum: f32 = t.row(0).iter().map(|tap| tap.value).sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 0.05);
    }
}
