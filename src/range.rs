use crate::clock::ClockTime;
use crate::error::{StridecardError, StridecardResult};

/// Closed numeric interval a metric is drawn from.
///
/// `precision` is the number of decimal digits kept after sampling;
/// precision 0 means the metric is integer-valued.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumberRange {
    pub low: f64,
    pub high: f64,
    pub precision: u32,
}

impl NumberRange {
    pub fn new(low: f64, high: f64, precision: u32) -> StridecardResult<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(StridecardError::validation(
                "NumberRange bounds must be finite",
            ));
        }
        if low > high {
            return Err(StridecardError::validation(format!(
                "NumberRange low must be <= high (got {low} > {high})"
            )));
        }
        Ok(Self {
            low,
            high,
            precision,
        })
    }

    pub fn span(self) -> f64 {
        self.high - self.low
    }
}

/// Closed time-of-day interval on one nominal day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeRange {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeRange {
    pub fn new(start: ClockTime, end: ClockTime) -> StridecardResult<Self> {
        if start > end {
            return Err(StridecardError::validation(format!(
                "TimeRange start must be <= end (got {start} > {end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Inclusive span in whole seconds.
    pub fn span_seconds(self) -> u32 {
        self.end.as_seconds() - self.start.as_seconds()
    }

    /// Time at `secs` past `start`, clamped to `end`.
    pub fn at_offset(self, secs: u32) -> ClockTime {
        ClockTime(
            (self.start.as_seconds() + secs.min(self.span_seconds()))
                .min(self.end.as_seconds()),
        )
    }
}
