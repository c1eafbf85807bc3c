//! Per-activity presentation: display strings and calendar-ready fields.
//!
//! One [`ActivityView`] wraps a raw activity together with its resolved
//! category, zone and unit preference. Every field is derived on demand by a
//! single function that switches on the category.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::data::{Category, MeasurementSystem, RawActivity};
use crate::export::ExportError;
use crate::format;

pub const WEB_BASE_URI: &str = "https://connect.garmin.com/modern";

const PLACEHOLDER: &str = "---";
const DEFAULT_NAME: &str = "Other";
const START_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Start or end of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    Zoned(DateTime<Tz>),
    /// Local wall-clock time with an unknown zone.
    Floating(NaiveDateTime),
}

impl EventTime {
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            EventTime::Zoned(dt) => dt.naive_local(),
            EventTime::Floating(naive) => *naive,
        }
    }

    pub fn timezone(&self) -> Option<Tz> {
        match self {
            EventTime::Zoned(dt) => Some(dt.timezone()),
            EventTime::Floating(_) => None,
        }
    }

    /// `None` when the result falls outside chrono's date range.
    pub fn plus_seconds(&self, seconds: i64) -> Option<EventTime> {
        let delta = Duration::try_seconds(seconds)?;
        match self {
            EventTime::Zoned(dt) => dt.checked_add_signed(delta).map(EventTime::Zoned),
            EventTime::Floating(naive) => naive.checked_add_signed(delta).map(EventTime::Floating),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ActivityView<'a> {
    raw: &'a RawActivity,
    category: Category,
    timezone: Option<Tz>,
    system: MeasurementSystem,
}

impl<'a> ActivityView<'a> {
    pub fn new(
        raw: &'a RawActivity,
        category: Category,
        timezone: Option<Tz>,
        system: MeasurementSystem,
    ) -> Self {
        Self {
            raw,
            category,
            timezone,
            system,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn raw(&self) -> &'a RawActivity {
        self.raw
    }

    pub fn name(&self) -> &'a str {
        match self.raw.activity_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_NAME,
        }
    }

    pub fn duration(&self) -> String {
        self.raw
            .duration
            .map_or_else(placeholder, format::time)
    }

    pub fn distance(&self) -> String {
        let Some(metres) = self.raw.distance else {
            return placeholder();
        };
        match (self.category, self.system) {
            (Category::Swimming, _) => format::distance_metres(metres),
            (_, MeasurementSystem::Metric) => format::distance_kilometers(metres),
            (_, MeasurementSystem::Imperial) => format::distance_miles(metres),
        }
    }

    pub fn average_speed(&self) -> String {
        let Some(speed) = self.raw.average_speed else {
            return placeholder();
        };
        match (self.category, self.system) {
            (Category::Running | Category::Swimming, _) if !is_moving(speed) => placeholder(),
            (Category::Running, MeasurementSystem::Metric) => {
                format::speed_minutes_per_kilometer(speed)
            }
            (Category::Running, MeasurementSystem::Imperial) => format::speed_minutes_per_mile(speed),
            (Category::Swimming, _) => format::speed_minutes_per_100_metres(speed),
            (_, MeasurementSystem::Metric) => format::speed_kmph(speed),
            (_, MeasurementSystem::Imperial) => format::speed_mph(speed),
        }
    }

    /// One-line calendar title.
    pub fn summary(&self) -> String {
        let name = self.name();
        match self.category {
            Category::Running | Category::Cycling | Category::Swimming => {
                format!("{name} ({}, {})", self.distance(), self.average_speed())
            }
            Category::Multisport => format!("{name} ({}, {})", self.duration(), self.distance()),
            Category::FitnessEquipment => format!("{name} ({})", self.duration()),
            Category::Hiking | Category::Walking | Category::WinterSports | Category::Other => {
                format!("{name} ({}, {})", self.distance(), self.duration())
            }
        }
    }

    pub fn uid(&self) -> String {
        format!("activity-{}-{}", self.raw.owner_id, self.raw.activity_id)
    }

    pub fn detail_link(&self) -> String {
        format!("{WEB_BASE_URI}/activity/{}", self.raw.activity_id)
    }

    pub fn start_time(&self) -> Result<EventTime, ExportError> {
        let naive = parse_start_time(&self.raw.start_time_local).ok_or_else(|| {
            ExportError::InvalidStartTime {
                activity_id: self.raw.activity_id,
                value: self.raw.start_time_local.clone(),
            }
        })?;

        Ok(match self.timezone {
            Some(tz) => EventTime::Zoned(localize(tz, naive)),
            None => EventTime::Floating(naive),
        })
    }

    /// Start plus the rounded duration. `elapsedDuration` stands in when
    /// `duration` is missing; with neither the event is instantaneous.
    pub fn end_time(&self) -> Result<EventTime, ExportError> {
        let seconds = match (self.raw.duration, self.raw.elapsed_duration) {
            (Some(duration), _) => duration,
            (None, Some(elapsed)) => {
                tracing::debug!(
                    activity_id = self.raw.activity_id,
                    "duration missing, using elapsed duration for end time"
                );
                elapsed
            }
            (None, None) => 0.0,
        };
        let start = self.start_time()?;
        whole_seconds(seconds)
            .and_then(|secs| start.plus_seconds(secs))
            .ok_or(ExportError::InvalidDuration {
                activity_id: self.raw.activity_id,
                value: seconds,
            })
    }
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

fn whole_seconds(seconds: f64) -> Option<i64> {
    let rounded = seconds.round_ties_even();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    (rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64)
        .then_some(rounded as i64)
}

fn is_moving(speed: f64) -> bool {
    speed.is_finite() && speed > 0.0
}

fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Attaches `tz` to a wall-clock time. Folds pick the earlier instant; gaps
/// use the offset in force the day before.
fn localize(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(&(naive - Duration::days(1)))
                .fix();
            let utc = naive - Duration::seconds(i64::from(before.local_minus_utc()));
            tz.from_utc_datetime(&utc)
        }
    }
}
