pub mod constants;
pub mod resample;
pub mod wav;

pub use resample::{ResampleConfig, SincResampler, WindowKind, output_len, resample};
pub use wav::WavAudio;
