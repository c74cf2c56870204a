use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use rateshift::audio::constants::DEFAULT_SIDELOBE_DB;
use rateshift::{SincResampler, WindowKind, output_len, wav};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "rateshift")]
#[command(about = "Windowed-sinc WAV resampler", long_about = None)]
#[command(version)]
struct Cli {
    /// Input WAV file (16-bit PCM, mono or stereo)
    input: PathBuf,

    /// Output file path (defaults to output.wav)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output sample rate in Hz (defaults to 44100)
    #[arg(short = 'f', long = "frequency")]
    frequency: Option<u32>,

    /// Window function for the sinc kernel
    #[arg(long, value_enum, default_value = "blackman-harris")]
    window: WindowArg,

    /// Disable error-feedback dithering of the rounded output
    #[arg(long)]
    no_dither: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum WindowArg {
    Kaiser,
    BlackmanHarris,
}

impl From<WindowArg> for WindowKind {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Kaiser => WindowKind::Kaiser {
                sidelobe_db: DEFAULT_SIDELOBE_DB,
            },
            WindowArg::BlackmanHarris => WindowKind::BlackmanHarris,
        }
    }
}

const DEFAULT_OUTPUT_PATH: &str = "output.wav";
const DEFAULT_OUTPUT_RATE: u32 = 44_100;

/// Fill in omitted flags, announcing each substituted default.
fn resolve_output(cli: &Cli) -> (PathBuf, u32) {
    let output = cli.output.clone().unwrap_or_else(|| {
        info!("defaulting output file to {DEFAULT_OUTPUT_PATH}");
        PathBuf::from(DEFAULT_OUTPUT_PATH)
    });
    let frequency = cli.frequency.unwrap_or_else(|| {
        info!("defaulting output frequency to {DEFAULT_OUTPUT_RATE}");
        DEFAULT_OUTPUT_RATE
    });
    (output, frequency)
}

fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let (output_path, frequency) = resolve_output(&cli);

    let input = match wav::load(&cli.input) {
        Ok(input) => input,
        Err(e) => {
            error!("error opening {}: {e}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };

    if input.channels == 0 || input.channels > 2 {
        error!(
            "channels = {}, only 1 or 2 supported (for now)",
            input.channels
        );
        return ExitCode::FAILURE;
    }

    if input.bits_per_sample != 16 {
        error!(
            "bits = {}, only 16 supported (for now)",
            input.bits_per_sample
        );
        return ExitCode::FAILURE;
    }

    if frequency == 0 {
        error!("output frequency must be positive");
        return ExitCode::FAILURE;
    }

    let channels = usize::from(input.channels);
    let samples = input.samples_i16();

    info!(
        "converting {} from {} Hz to {} Hz ({} ch)",
        cli.input.display(),
        input.sample_rate,
        frequency,
        channels
    );

    let out_len = output_len(samples.len(), input.sample_rate, frequency, channels);
    let mut output = vec![0i16; out_len];

    let started = Instant::now();
    SincResampler::new(input.sample_rate, frequency, channels)
        .with_window(cli.window.into())
        .with_dither(!cli.no_dither)
        .process(&samples, &mut output);
    let elapsed = started.elapsed().as_secs_f64();

    if let Err(e) = wav::save(&output_path, &output, input.channels, frequency) {
        error!("error writing {}: {e}", output_path.display());
        return ExitCode::FAILURE;
    }

    let input_seconds = samples.len() as f64 / channels as f64 / f64::from(input.sample_rate);
    info!(
        "wrote {} — done in {:.3} s, x{:.1} realtime",
        output_path.display(),
        elapsed,
        input_seconds / elapsed.max(1e-9)
    );

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn omitted_flags_parse_as_none() {
        let cli = Cli::parse_from(["rateshift", "in.wav"]);
        assert!(cli.output.is_none());
        assert!(cli.frequency.is_none());
    }

    #[test]
    fn omitted_flags_resolve_to_announced_defaults() {
        let cli = Cli::parse_from(["rateshift", "in.wav"]);
        let (output, frequency) = resolve_output(&cli);
        assert_eq!(output, Path::new(DEFAULT_OUTPUT_PATH));
        assert_eq!(frequency, DEFAULT_OUTPUT_RATE);
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let cli = Cli::parse_from(["rateshift", "in.wav", "-o", "out.wav", "-f", "48000"]);
        let (output, frequency) = resolve_output(&cli);
        assert_eq!(output, Path::new("out.wav"));
        assert_eq!(frequency, 48_000);
    }

    #[test]
    fn duplicate_flags_are_rejected() {
        let dup_freq = ["rateshift", "in.wav", "-f", "8000", "-f", "9000"];
        let dup_out = ["rateshift", "in.wav", "-o", "a.wav", "-o", "b.wav"];
        assert!(Cli::try_parse_from(dup_freq).is_err());
        assert!(Cli::try_parse_from(dup_out).is_err());
        assert!(Cli::try_parse_from(["rateshift", "a.wav", "b.wav"]).is_err());
    }
}
