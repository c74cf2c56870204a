//! Central constants for the resampling engine.
//!
//! All magic numbers in `src/audio/**` live here so they can be tuned in one
//! place and remain consistent across modules.

// ── Sinc window ──────────────────────────────────────────────────────────────

/// Upper bound on the sinc window size, as a power of two.
pub const MAX_SINC_WINDOW_BITS: u32 = 12;

/// Largest number of taps a single output sample may convolve over (4096).
pub const MAX_SINC_WINDOW_SIZE: usize = 1 << MAX_SINC_WINDOW_BITS;

/// Phase rows in the filter look-up table, covering phase `[0, 1)` of one
/// output sample period. Sub-row phases are linearly interpolated.
pub const LUT_STEPS: usize = 256;

// ── Filter design defaults ───────────────────────────────────────────────────

/// Target stop-band sidelobe attenuation for the Kaiser design (dB).
pub const DEFAULT_SIDELOBE_DB: f64 = 96.0;

/// Default normalized transition-band width for the Kaiser design.
pub const DEFAULT_TRANSITION_WIDTH: f64 = 1.0 / 16.0;

// ── i16 PCM clip boundaries ──────────────────────────────────────────────────

pub const INT16_MAX_F: f32 = 32_767.0;
pub const INT16_MIN_F: f32 = -32_768.0;
