//! `resample/ratio.rs` — exact rational rate conversion steps.
//!
//! Dividing both rates by their greatest common divisor yields the smallest
//! integer step pair for the phase accumulator. Stepping by integers keeps
//! input/output timing exact over arbitrarily long buffers, where a floating
//! ratio would drift after millions of samples.

/// A sample-rate pair reduced to lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RationalRatio {
    /// Input frames consumed per `out_step` output frames.
    pub in_step: u32,
    /// Output frames produced per `in_step` input frames.
    pub out_step: u32,
}

impl RationalRatio {
    /// Reduce `(in_rate, out_rate)` by their GCD. Rates must be positive.
    pub fn reduce(in_rate: u32, out_rate: u32) -> Self {
        let g = gcd(in_rate, out_rate);
        Self {
            in_step: in_rate / g,
            out_step: out_rate / g,
        }
    }

    /// `true` when no rate conversion is needed.
    pub fn is_identity(&self) -> bool {
        self.in_step == self.out_step
    }
}

/// Euclidean greatest common divisor.
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_of_common_rates() {
        assert_eq!(gcd(48_000, 44_100), 300);
        assert_eq!(gcd(48_000, 96_000), 48_000);
        assert_eq!(gcd(44_100, 22_050), 22_050);
    }

    #[test]
    fn reduce_cd_to_dat() {
        let r = RationalRatio::reduce(48_000, 44_100);
        assert_eq!(r.in_step, 160);
        assert_eq!(r.out_step, 147);
    }

    #[test]
    fn identity_ratio() {
        assert!(RationalRatio::reduce(44_100, 44_100).is_identity());
        assert!(!RationalRatio::reduce(44_100, 48_000).is_identity());
    }
}
