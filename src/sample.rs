use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::ClockTime;
use crate::range::{NumberRange, TimeRange};

/// One value drawn from a [`NumberRange`].
///
/// Precision-0 ranges produce genuinely integer-typed values, not floats
/// that happen to be whole, so downstream formatting never shows `90.0`
/// where the card needs `90`. The converse holds too: a decimal draw
/// landing on a whole number keeps one fractional digit (`3.0`, never
/// bare `3`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    Integer(i64),
    Decimal(f64),
}

impl Sample {
    pub fn as_f64(self) -> f64 {
        match self {
            Sample::Integer(n) => n as f64,
            Sample::Decimal(x) => x,
        }
    }
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sample::Integer(n) => write!(f, "{n}"),
            Sample::Decimal(x) => {
                let s = x.to_string();
                if s.contains('.') {
                    f.write_str(&s)
                } else {
                    write!(f, "{s}.0")
                }
            }
        }
    }
}

/// Draws values from configured ranges.
///
/// The random source is injected: `seeded` gives reproducible draws for
/// tests and `--seed` runs, `new` takes OS entropy.
pub struct Sampler<R = StdRng> {
    rng: R,
}

impl Sampler<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for Sampler<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Sampler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform draw over `[low, high]`, rounded to the range's precision.
    pub fn number(&mut self, range: &NumberRange) -> Sample {
        let raw = self.rng.random_range(range.low..=range.high);
        let factor = 10f64.powi(range.precision as i32);
        let rounded = (raw * factor).round() / factor;
        if range.precision == 0 {
            Sample::Integer(rounded as i64)
        } else {
            Sample::Decimal(rounded)
        }
    }

    /// Uniform draw over the inclusive second span of `range`.
    ///
    /// A zero-length range always returns `start`.
    pub fn time(&mut self, range: &TimeRange) -> ClockTime {
        let span = range.span_seconds();
        if span == 0 {
            return range.start;
        }
        let offset = self.rng.random_range(0.0..=f64::from(span)).round() as u32;
        range.at_offset(offset)
    }
}
