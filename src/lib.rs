//! rateshift — windowed-sinc sample-rate conversion for 16-bit PCM audio.
//!
//! The engine precomputes a phase-indexed look-up table of windowed sinc
//! taps and streams interleaved input through a circular history buffer,
//! driven by an exact rational phase accumulator. See
//! [`audio::resample`] for the engine and [`audio::wav`] for the container
//! I/O the CLI uses around it.

pub mod audio;
pub mod common;

pub use audio::resample::{
    ResampleConfig, SincResampler, WindowKind, output_len, resample,
};
pub use audio::wav::{self, WavAudio};
pub use common::errors::WavError;
