//! `resample/convolve.rs` — the streaming convolution loop.
//!
//! Produces every output frame from a [`HistoryRing`] of recent input, a
//! [`FilterTable`] row picked by the fractional output phase, and an integer
//! phase accumulator stepping by the reduced rational ratio. Rounding error
//! is carried per channel as first-order error feedback (dither) so the
//! quantization noise stays decorrelated from the signal.

use crate::audio::constants::{INT16_MAX_F, INT16_MIN_F, LUT_STEPS};
use crate::audio::resample::lut::{FilterTable, FilterTap};
use crate::audio::resample::ratio::RationalRatio;
use crate::audio::resample::ring::HistoryRing;

/// Convolve `input` into `output` at the given reduced ratio.
///
/// Channel counts 1 and 2 are dispatched to dedicated monomorphizations so
/// the per-channel inner arithmetic vectorizes with a compile-time width;
/// anything else takes the runtime-width instantiation. All paths share one
/// loop body and produce bit-identical results for the same channel count.
pub fn convolve(
    output: &mut [i16],
    input: &[i16],
    channels: usize,
    ratio: RationalRatio,
    table: &FilterTable,
    dither: bool,
) {
    match channels {
        1 => run::<1>(output, input, 1, ratio, table, dither),
        2 => run::<2>(output, input, 2, ratio, table, dither),
        n => run::<0>(output, input, n, ratio, table, dither),
    }
}

/// One loop body, three instantiations: `CH = 0` reads the channel count at
/// runtime, any other value is a compile-time constant the optimizer can
/// unroll against.
fn run<const CH: usize>(
    output: &mut [i16],
    input: &[i16],
    channels: usize,
    ratio: RationalRatio,
    table: &FilterTable,
    dither: bool,
) {
    let ch = if CH == 0 { channels } else { CH };
    let window_size = table.window_size();
    let out_period = 1.0f32 / ratio.out_step as f32;

    let mut frames = input.chunks_exact(ch);
    let mut ring = HistoryRing::new(window_size, ch);
    ring.prime(&mut frames);

    let mut acc = vec![0.0f32; ch];
    let mut residual = vec![0.0f32; ch];
    let mut subpos: u32 = 0;

    for out_frame in output.chunks_exact_mut(ch) {
        // Fractional phase within the current output sample period, mapped
        // onto the LUT row range with a leftover blend weight.
        let offset = 1.0 - subpos as f32 * out_period;
        let scaled = offset * (LUT_STEPS - 1) as f32;
        let index = scaled as usize;
        let interp = scaled - index as f32;

        let row = table.row(index);
        acc.fill(0.0);

        // Walk the taps in ring age order: oldest frame gets tap 0.
        let (older, newer) = ring.wrapped();
        let (row_older, row_newer) = row.split_at(older.len() / ch);
        accumulate(&mut acc, older, row_older, interp, ch);
        accumulate(&mut acc, newer, row_newer, interp, ch);

        for c in 0..ch {
            let r = if dither {
                let r = (acc[c] + residual[c]).round();
                residual[c] += acc[c] - r;
                r
            } else {
                acc[c]
            };
            out_frame[c] = clamp_round(r);
        }

        subpos += ratio.in_step;
        while subpos >= ratio.out_step {
            subpos -= ratio.out_step;
            ring.push(frames.next());
        }
    }
}

/// Accumulate `weight(tap) × frame[c]` over one contiguous ring segment.
#[inline]
fn accumulate(acc: &mut [f32], segment: &[f32], taps: &[FilterTap], interp: f32, ch: usize) {
    for (frame, tap) in segment.chunks_exact(ch).zip(taps) {
        let scale = tap.value + tap.delta * interp;
        for (a, &s) in acc.iter_mut().zip(frame) {
            *a += s * scale;
        }
    }
}

/// Round to the nearest integer and clamp into the i16 range without
/// wrapping.
#[inline]
pub(crate) fn clamp_round(x: f32) -> i16 {
    x.round().clamp(INT16_MIN_F, INT16_MAX_F) as i16
}
