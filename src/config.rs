use std::path::{Path, PathBuf};

use crate::clock::ClockTime;
use crate::error::{StridecardError, StridecardResult};
use crate::range::{NumberRange, TimeRange};

/// Decimal digits kept for sampled distances.
pub const DISTANCE_PRECISION: u32 = 2;

/// Date value that resolves to the current date at render time.
pub const DATE_TODAY: &str = "today";

/// End-time value that resolves to the current clock time at render time.
pub const END_TIME_NOW: &str = "now";

/// Typed configuration for one card.
///
/// Always valid in memory: every constructor validates, and edits replace
/// whole ranges rather than mutating bounds in place. Asset paths are
/// checked lazily at render time.
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    pub template: PathBuf,
    /// Reserved for the template's map region; the current pipeline does
    /// not draw it.
    pub map: PathBuf,
    /// Empty means "no avatar".
    pub avatar: PathBuf,
    pub username: String,
    /// `YYYY/MM/DD`, or [`DATE_TODAY`].
    pub date: String,
    /// `HH:MM[:SS]`, or [`END_TIME_NOW`].
    pub end_time: String,
    pub total_km: NumberRange,
    pub sport_time: TimeRange,
    pub total_time: TimeRange,
    pub cumulative_climb: NumberRange,
    pub average_cadence: NumberRange,
    pub exercise_load: NumberRange,
}

const fn hms(h: u32, m: u32, s: u32) -> ClockTime {
    ClockTime(h * 3600 + m * 60 + s)
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            template: PathBuf::from("scr/template.png"),
            map: PathBuf::from("scr/map.png"),
            avatar: PathBuf::new(),
            username: String::new(),
            date: DATE_TODAY.to_string(),
            end_time: END_TIME_NOW.to_string(),
            total_km: NumberRange {
                low: 3.02,
                high: 3.30,
                precision: DISTANCE_PRECISION,
            },
            sport_time: TimeRange {
                start: hms(0, 21, 0),
                end: hms(0, 23, 0),
            },
            total_time: TimeRange {
                start: hms(0, 34, 0),
                end: hms(0, 39, 0),
            },
            cumulative_climb: NumberRange {
                low: 90.0,
                high: 96.0,
                precision: 0,
            },
            average_cadence: NumberRange {
                low: 76.0,
                high: 81.0,
                precision: 0,
            },
            exercise_load: NumberRange {
                low: 48.0,
                high: 51.0,
                precision: 0,
            },
        }
    }
}

/// Persisted JSON shape of a [`Configuration`].
///
/// Ranges serialize as two-element arrays; times as `HH:MM:SS` strings.
/// Whole-number bounds write back as JSON integers (`[90, 96]`),
/// fractional ones as decimals (`[3.02, 3.3]`). Precision is a property
/// of the field, not the document, and is reapplied on decode. Missing
/// keys fall back to the reference defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConfigDoc {
    pub template: String,
    pub map: String,
    pub avatar: String,
    pub username: String,
    pub date: String,
    pub end_time: String,
    #[serde(serialize_with = "number_bounds")]
    pub total_km: [f64; 2],
    pub sport_time: [String; 2],
    pub total_time: [String; 2],
    #[serde(serialize_with = "number_bounds")]
    pub cumulative_climb: [f64; 2],
    #[serde(serialize_with = "number_bounds")]
    pub average_cadence: [f64; 2],
    #[serde(serialize_with = "number_bounds")]
    pub exercise_load: [f64; 2],
}

fn number_bounds<S: serde::Serializer>(pair: &[f64; 2], ser: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeTuple;

    let mut tup = ser.serialize_tuple(2)?;
    for &x in pair {
        if x == (x as i64) as f64 {
            tup.serialize_element(&(x as i64))?;
        } else {
            tup.serialize_element(&x)?;
        }
    }
    tup.end()
}

impl Default for ConfigDoc {
    fn default() -> Self {
        Configuration::default().to_doc()
    }
}

impl Configuration {
    pub fn from_doc(doc: &ConfigDoc) -> StridecardResult<Self> {
        Ok(Self {
            template: PathBuf::from(&doc.template),
            map: PathBuf::from(&doc.map),
            avatar: PathBuf::from(&doc.avatar),
            username: doc.username.clone(),
            date: doc.date.clone(),
            end_time: doc.end_time.clone(),
            total_km: number_range("total_km", &doc.total_km, DISTANCE_PRECISION)?,
            sport_time: time_range("sport_time", &doc.sport_time)?,
            total_time: time_range("total_time", &doc.total_time)?,
            cumulative_climb: number_range("cumulative_climb", &doc.cumulative_climb, 0)?,
            average_cadence: number_range("average_cadence", &doc.average_cadence, 0)?,
            exercise_load: number_range("exercise_load", &doc.exercise_load, 0)?,
        })
    }

    pub fn to_doc(&self) -> ConfigDoc {
        ConfigDoc {
            template: self.template.display().to_string(),
            map: self.map.display().to_string(),
            avatar: self.avatar.display().to_string(),
            username: self.username.clone(),
            date: self.date.clone(),
            end_time: self.end_time.clone(),
            total_km: [self.total_km.low, self.total_km.high],
            sport_time: [
                self.sport_time.start.to_string(),
                self.sport_time.end.to_string(),
            ],
            total_time: [
                self.total_time.start.to_string(),
                self.total_time.end.to_string(),
            ],
            cumulative_climb: [self.cumulative_climb.low, self.cumulative_climb.high],
            average_cadence: [self.average_cadence.low, self.average_cadence.high],
            exercise_load: [self.exercise_load.low, self.exercise_load.high],
        }
    }

    pub fn load(path: &Path) -> StridecardResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StridecardError::config(format!("read config '{}': {e}", path.display()))
        })?;
        let doc: ConfigDoc = serde_json::from_str(&text).map_err(|e| {
            StridecardError::config(format!("parse config '{}': {e}", path.display()))
        })?;
        Self::from_doc(&doc)
    }

    pub fn save(&self, path: &Path) -> StridecardResult<()> {
        let json = serde_json::to_string_pretty(&self.to_doc()).map_err(|e| {
            StridecardError::config(format!("serialize config: {e}"))
        })?;
        std::fs::write(path, json).map_err(|e| {
            StridecardError::config(format!("write config '{}': {e}", path.display()))
        })
    }
}

fn number_range(field: &str, pair: &[f64; 2], precision: u32) -> StridecardResult<NumberRange> {
    NumberRange::new(pair[0], pair[1], precision).map_err(|_| {
        StridecardError::config(format!(
            "{field}: expected low <= high, got [{}, {}]",
            pair[0], pair[1]
        ))
    })
}

fn time_range(field: &str, pair: &[String; 2]) -> StridecardResult<TimeRange> {
    let parse = |s: &str| {
        ClockTime::parse(s)
            .map_err(|_| StridecardError::config(format!("{field}: invalid clock time '{s}'")))
    };
    let (start, end) = (parse(&pair[0])?, parse(&pair[1])?);
    TimeRange::new(start, end).map_err(|_| {
        StridecardError::config(format!(
            "{field}: expected start <= end, got [{}, {}]",
            pair[0], pair[1]
        ))
    })
}
