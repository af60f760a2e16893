use crate::error::{StridecardError, StridecardResult};

/// Seconds in one nominal day.
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Time of day in whole seconds since midnight, `0..=86_399`.
///
/// Also carries durations up to one day (a workout length is the same
/// arithmetic domain as a wall-clock reading).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime(pub(crate) u32);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Construct from raw seconds since midnight.
    pub fn from_seconds(secs: u32) -> StridecardResult<Self> {
        if secs >= SECONDS_PER_DAY {
            return Err(StridecardError::validation(format!(
                "clock time {secs}s is past the end of the day"
            )));
        }
        Ok(Self(secs))
    }

    /// Parse `"H:M"` or `"H:M:S"`, zero-padded or not.
    pub fn parse(text: &str) -> StridecardResult<Self> {
        let invalid = || StridecardError::validation(format!("invalid clock time '{text}'"));

        let mut fields = [0u32; 3];
        let mut n = 0usize;
        for part in text.split(':') {
            if n == 3 {
                return Err(invalid());
            }
            fields[n] = part.trim().parse::<u32>().map_err(|_| invalid())?;
            n += 1;
        }
        if n < 2 {
            return Err(invalid());
        }

        let (h, m, s) = (fields[0], fields[1], fields[2]);
        if h >= 24 || m >= 60 || s >= 60 {
            return Err(invalid());
        }
        Ok(Self(h * 3600 + m * 60 + s))
    }

    /// Parse like [`ClockTime::parse`], then drop the seconds field.
    ///
    /// Wall-clock end times are published at minute precision; durations
    /// keep their seconds.
    pub fn parse_minutes(text: &str) -> StridecardResult<Self> {
        Ok(Self::parse(text)?.truncate_to_minute())
    }

    pub fn truncate_to_minute(self) -> Self {
        Self(self.0 / 60 * 60)
    }

    pub fn as_seconds(self) -> u32 {
        self.0
    }

    /// Subtract a duration, failing rather than wrapping past midnight.
    pub fn checked_sub(self, duration: ClockTime) -> StridecardResult<Self> {
        self.0
            .checked_sub(duration.0)
            .map(Self)
            .ok_or_else(|| {
                StridecardError::validation(format!(
                    "duration {duration} reaches past midnight before {self}"
                ))
            })
    }

    /// Zero-padded `HH:MM` short form.
    pub fn hhmm(self) -> String {
        let (h, m, _) = self.hms();
        format!("{h:02}:{m:02}")
    }

    fn hms(self) -> (u32, u32, u32) {
        (self.0 / 3600, self.0 / 60 % 60, self.0 % 60)
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (h, m, s) = self.hms();
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}
