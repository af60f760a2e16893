use rand::Rng;

use crate::clock::ClockTime;
use crate::config::{Configuration, DATE_TODAY, END_TIME_NOW};
use crate::error::StridecardResult;
use crate::metrics;
use crate::sample::{Sample, Sampler};

/// Fully sampled, fully derived presentation values for one render.
///
/// Built fresh per render and never cached; two scenes from the same
/// configuration differ wherever the ranges have width.
#[derive(Clone, Debug)]
pub struct Scene {
    /// `YYYY/MM/DD` as drawn on the card.
    pub date: String,
    /// Published workout end, minute precision.
    pub end_time: ClockTime,
    /// Derived: end minus total duration.
    pub start_time: ClockTime,
    /// Active-movement duration.
    pub sport_time: ClockTime,
    /// Wall-clock duration of the whole session.
    pub total_time: ClockTime,
    pub total_km: Sample,
    /// `MM'SS''` per km, derived from distance and sport time.
    pub pace: String,
    /// Calories, derived from total time.
    pub cost: i64,
    pub cumulative_climb: Sample,
    pub average_cadence: Sample,
    pub exercise_load: Sample,
}

impl Scene {
    /// Sample every configured range once and derive the dependent values.
    ///
    /// The independent sport/total draws are repaired when they cross:
    /// active movement can never exceed the session it happened in.
    pub fn generate<R: Rng>(
        config: &Configuration,
        sampler: &mut Sampler<R>,
    ) -> StridecardResult<Self> {
        let date = if config.date == DATE_TODAY {
            chrono::Local::now().format("%Y/%m/%d").to_string()
        } else {
            config.date.clone()
        };
        let end_text = if config.end_time == END_TIME_NOW {
            chrono::Local::now().format("%H:%M:%S").to_string()
        } else {
            config.end_time.clone()
        };

        let total_time = sampler.time(&config.total_time);
        let mut sport_time = sampler.time(&config.sport_time);
        if sport_time > total_time {
            sport_time = total_time;
        }

        let end_time = ClockTime::parse_minutes(&end_text)?;
        let start_time = metrics::start_time(&end_text, total_time)?;
        let total_km = sampler.number(&config.total_km);
        let pace = metrics::pace(total_km.as_f64(), sport_time)?;
        let cost = metrics::cost(total_time);

        let scene = Self {
            date,
            end_time,
            start_time,
            sport_time,
            total_time,
            total_km,
            pace,
            cost,
            cumulative_climb: sampler.number(&config.cumulative_climb),
            average_cadence: sampler.number(&config.average_cadence),
            exercise_load: sampler.number(&config.exercise_load),
        };
        tracing::debug!(
            date = %scene.date,
            end = %scene.end_time,
            start = %scene.start_time,
            sport = %scene.sport_time,
            total = %scene.total_time,
            km = %scene.total_km,
            pace = %scene.pace,
            cost = scene.cost,
            climb = %scene.cumulative_climb,
            cadence = %scene.average_cadence,
            load = %scene.exercise_load,
            "scene generated"
        );
        Ok(scene)
    }

    /// The line under the username: `"{date} {start} - {end}"`, times in
    /// `HH:MM` short form.
    pub fn date_line(&self) -> String {
        format!(
            "{} {} - {}",
            self.date,
            self.start_time.hhmm(),
            self.end_time.hhmm()
        )
    }
}
