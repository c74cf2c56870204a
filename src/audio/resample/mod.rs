//! PCM resampling — windowed-sinc rate conversion for interleaved 16-bit
//! audio.
//!
//! The pipeline: reduce the rate pair to minimal integer steps
//! ([`RationalRatio`]), sample the windowed sinc kernel into a phase-row
//! look-up table ([`FilterTable`]), then stream the input through a circular
//! history ([`convolve`]) producing one output frame per phase-accumulator
//! step. Identical rates short-circuit to a plain copy.
//!
//! | Window | Quality | Notes |
//! |---|---|---|
//! | [`WindowKind::BlackmanHarris`] | ~92 dB sidelobes | default |
//! | [`WindowKind::Kaiser`] | tunable | sized from sidelobe/transition targets |

pub mod convolve;
pub mod lut;
pub mod ratio;
pub mod ring;
pub mod window;

pub use lut::{FilterTable, FilterTap};
pub use ratio::RationalRatio;
pub use ring::HistoryRing;
pub use window::WindowKind;

use crate::audio::constants::{
    DEFAULT_TRANSITION_WIDTH, MAX_SINC_WINDOW_BITS, MAX_SINC_WINDOW_SIZE,
};

/// Engine options. The default is the dithered Blackman-Harris variant.
#[derive(Debug, Clone, Copy)]
pub struct ResampleConfig {
    pub window: WindowKind,
    pub dither: bool,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            window: WindowKind::BlackmanHarris,
            dither: true,
        }
    }
}

/// A configured rate converter for one (input rate, output rate, channels)
/// triple. Stateless across [`process`](Self::process) calls; each call owns
/// its filter table and history, so concurrent converters never share
/// mutable state.
#[derive(Debug, Clone, Copy)]
pub struct SincResampler {
    in_rate: u32,
    out_rate: u32,
    channels: usize,
    config: ResampleConfig,
}

impl SincResampler {
    /// Converter with the default config (dithered Blackman-Harris).
    pub fn new(in_rate: u32, out_rate: u32, channels: usize) -> Self {
        Self {
            in_rate,
            out_rate,
            channels,
            config: ResampleConfig::default(),
        }
    }

    pub fn with_window(mut self, window: WindowKind) -> Self {
        self.config.window = window;
        self
    }

    pub fn with_dither(mut self, dither: bool) -> Self {
        self.config.dither = dither;
        self
    }

    /// Fill `output` with `input` resampled to the output rate.
    ///
    /// `output` must hold a whole number of frames; size it with
    /// [`output_len`]. A shorter buffer truncates the result, a longer one
    /// is padded from the filter tail (silence).
    pub fn process(&self, input: &[i16], output: &mut [i16]) {
        let ratio = RationalRatio::reduce(self.in_rate, self.out_rate);

        if ratio.is_identity() {
            let n = input.len().min(output.len());
            output[..n].copy_from_slice(&input[..n]);
            return;
        }

        let (window_size, freq_adjust) =
            design_filter(self.in_rate, self.out_rate, self.config.window);
        let table = FilterTable::build(window_size, freq_adjust, self.config.window);
        convolve::convolve(output, input, self.channels, ratio, &table, self.config.dither);
    }
}

/// One-shot convenience wrapper over [`SincResampler`].
pub fn resample(output: &mut [i16], out_rate: u32, input: &[i16], in_rate: u32, channels: usize) {
    SincResampler::new(in_rate, out_rate, channels).process(input, output);
}

/// Output buffer length (in samples) for a full conversion of `input_len`
/// samples, rounded down to a whole number of frames.
pub fn output_len(input_len: usize, in_rate: u32, out_rate: u32, channels: usize) -> usize {
    let ratio = RationalRatio::reduce(in_rate, out_rate);
    let in_frames = (input_len / channels) as u64;
    let out_frames = in_frames * u64::from(ratio.out_step) / u64::from(ratio.in_step);
    out_frames as usize * channels
}

/// Pick the tap count and passband scale for a rate pair.
///
/// Both heuristics are empirically tuned, not derived: the Kaiser path sizes
/// the window from the attenuation/transition-width product, the
/// Blackman-Harris path doubles the window per octave of downsampling.
/// Either way the result is rounded up to a power of two and capped.
fn design_filter(in_rate: u32, out_rate: u32, window: WindowKind) -> (usize, f64) {
    let (window_size, freq_adjust) = match window {
        WindowKind::Kaiser { sidelobe_db } => {
            let mut transition = DEFAULT_TRANSITION_WIDTH;
            let mut cutoff = f64::from(out_rate);
            if out_rate > in_rate {
                // Upsampling: the image band is the gap between the rates.
                transition = f64::from(out_rate - in_rate) / f64::from(out_rate);
            } else {
                // Downsampling: pull the cutoff below Nyquist by the
                // transition width.
                cutoff = f64::from(out_rate) * (1.0 - transition);
            }
            let size = (sidelobe_db - 8.0) / (2.285 * transition) + 1.0;
            let adjust = (cutoff / f64::from(in_rate)).min(1.0);
            (size as usize, adjust)
        }
        WindowKind::BlackmanHarris => {
            let ratio = (f64::from(out_rate) / f64::from(in_rate)).min(1.0);
            let size = (8.0 - 2.0 * ratio.log2()).round() as u32;
            let adjust = if out_rate < in_rate {
                f64::from(out_rate) / f64::from(in_rate)
            } else {
                1.0
            };
            (1usize << size.min(MAX_SINC_WINDOW_BITS), adjust)
        }
    };

    (
        window_size.next_power_of_two().min(MAX_SINC_WINDOW_SIZE),
        freq_adjust,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_a_copy() {
        let input: Vec<i16> = (0..64).map(|i| (i * 100 - 3_000) as i16).collect();
        let mut output = vec![0i16; 64];
        resample(&mut output, 44_100, &input, 44_100, 2);
        assert_eq!(output, input);
    }

    #[test]
    fn identity_truncates_to_shorter_buffer() {
        let input = [100i16, 200, 300, 400];
        let mut output = [0i16; 2];
        resample(&mut output, 8_000, &input, 8_000, 1);
        assert_eq!(output, [100, 200]);
    }

    #[test]
    fn output_len_follows_reduced_ratio() {
        // 44100 -> 48000 stereo: 147 frames in, 160 frames out.
        assert_eq!(output_len(147 * 2, 44_100, 48_000, 2), 160 * 2);
        // Rounds down to whole frames.
        assert_eq!(output_len(4, 8_000, 16_000, 1), 8);
    }

    #[test]
    fn window_size_is_power_of_two_and_capped() {
        for &(input, output) in &[(8_000u32, 192_000u32), (192_000, 8_000), (44_100, 48_000)] {
            for window in [
                WindowKind::BlackmanHarris,
                WindowKind::Kaiser { sidelobe_db: 96.0 },
            ] {
                let (size, adjust) = design_filter(input, output, window);
                assert!(size.is_power_of_two());
                assert!(size <= MAX_SINC_WINDOW_SIZE);
                assert!(adjust > 0.0 && adjust <= 1.0);
            }
        }
    }

    #[test]
    fn downsampling_narrows_the_passband() {
        let (_, adjust) = design_filter(48_000, 44_100, WindowKind::BlackmanHarris);
        assert!((adjust - 44_100.0 / 48_000.0).abs() < 1e-12);
        let (_, adjust) = design_filter(44_100, 48_000, WindowKind::BlackmanHarris);
        assert_eq!(adjust, 1.0);
    }

    #[test]
    fn upsample_short_mono_buffer() {
        // 4 samples at 8 kHz to 16 kHz: ~8 output samples whose energy stays
        // within the filter's overshoot margin of the input peak.
        let input = [1_000i16, -1_000, 1_000, -1_000];
        let out_len = output_len(input.len(), 8_000, 16_000, 1);
        assert_eq!(out_len, 8);

        let mut output = vec![0i16; out_len];
        resample(&mut output, 16_000, &input, 8_000, 1);
        assert!(output.iter().any(|&s| s != 0));
        for &s in &output {
            assert!(s.unsigned_abs() <= 1_300, "overshoot beyond margin: {s}");
        }
    }

    #[test]
    fn resample_is_deterministic() {
        let input: Vec<i16> = (0..1_000).map(|i| ((i * 331) % 8_000 - 4_000) as i16).collect();
        let out_len = output_len(input.len(), 48_000, 44_100, 2);
        let mut a = vec![0i16; out_len];
        let mut b = vec![0i16; out_len];
        resample(&mut a, 44_100, &input, 48_000, 2);
        resample(&mut b, 44_100, &input, 48_000, 2);
        assert_eq!(a, b);
    }

    #[test]
    fn kaiser_variant_runs_clean() {
        let input: Vec<i16> = (0..256).map(|i| ((i % 32) * 500 - 8_000) as i16).collect();
        let out_len = output_len(input.len(), 44_100, 22_050, 1);
        let mut output = vec![0i16; out_len];
        SincResampler::new(44_100, 22_050, 1)
            .with_window(WindowKind::Kaiser { sidelobe_db: 96.0 })
            .with_dither(false)
            .process(&input, &mut output);
    }
}
