//! Quantities derived from sampled values: start time, pace, calorie cost.

use crate::clock::ClockTime;
use crate::error::{StridecardError, StridecardResult};

/// Workout start = published end time minus total duration.
///
/// The end time is parsed at minute precision (a trailing seconds field is
/// ignored); the duration keeps its seconds. Subtraction never wraps: a
/// duration reaching past midnight is an error.
pub fn start_time(end: &str, total_duration: ClockTime) -> StridecardResult<ClockTime> {
    ClockTime::parse_minutes(end)?.checked_sub(total_duration)
}

/// Render seconds-per-km as `MM'SS''`.
///
/// Minutes are zero-padded but not capped at 59; an hour-plus pace renders
/// as `60'05''`.
pub fn format_pace(total_seconds: u32) -> String {
    format!("{:02}'{:02}''", total_seconds / 60, total_seconds % 60)
}

/// Average pace over the workout, nearest whole second per km.
pub fn pace(distance_km: f64, duration: ClockTime) -> StridecardResult<String> {
    if distance_km.is_nan() || distance_km <= 0.0 {
        return Err(StridecardError::validation(format!(
            "pace needs a positive distance (got {distance_km})"
        )));
    }
    let secs_per_km = (f64::from(duration.as_seconds()) / distance_km).round();
    Ok(format_pace(secs_per_km as u32))
}

/// Calorie estimate: 700 kcal per hour of workout, rounded to nearest.
pub fn cost(duration: ClockTime) -> i64 {
    (700.0 * f64::from(duration.as_seconds()) / 3600.0).round() as i64
}
