//! Turns raw activities and reference data into a calendar.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::str::FromStr;

use crate::activity::ActivityView;
use crate::api::GarminApi;
use crate::classify::{resolve_category, ActivityTypeIndex};
use crate::data::{ActivityFilter, ActivityTypeRecord, MeasurementSystem, RawActivity, TimezoneRecord};
use crate::ical::{Calendar, Event};
use crate::timezone::TimezoneTable;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Activity {activity_id} has an unreadable start time: {value:?}")]
    InvalidStartTime { activity_id: i64, value: String },
    #[error("Activity {activity_id} has a duration that does not fit a calendar: {value}")]
    InvalidDuration { activity_id: i64, value: f64 },
}

/// Where the unit system comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementPreference {
    Fixed(MeasurementSystem),
    /// Whatever the account's user settings say.
    Account,
}

impl Default for MeasurementPreference {
    fn default() -> Self {
        MeasurementPreference::Fixed(MeasurementSystem::Metric)
    }
}

impl FromStr for MeasurementPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "account" => Ok(MeasurementPreference::Account),
            other => other.parse().map(MeasurementPreference::Fixed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub limit: u32,
    pub filter: ActivityFilter,
    pub measurement: MeasurementPreference,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            limit: 10_000,
            filter: ActivityFilter::All,
            measurement: MeasurementPreference::default(),
        }
    }
}

/// Lookup tables shared read-only by every activity of one run.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub types: ActivityTypeIndex,
    pub timezones: TimezoneTable,
    pub measurement_system: MeasurementSystem,
}

impl ReferenceData {
    pub fn new(
        types: &[ActivityTypeRecord],
        timezones: &[TimezoneRecord],
        measurement_system: MeasurementSystem,
    ) -> Self {
        Self {
            types: ActivityTypeIndex::new(types),
            timezones: TimezoneTable::new(timezones),
            measurement_system,
        }
    }

    pub fn view<'a>(&self, raw: &'a RawActivity) -> ActivityView<'a> {
        ActivityView::new(
            raw,
            resolve_category(&raw.activity_type, &self.types),
            self.timezones.resolve(raw.time_zone_id),
            self.measurement_system,
        )
    }
}

pub fn event_from_view(view: &ActivityView<'_>, stamp: DateTime<Utc>) -> Result<Event, ExportError> {
    Ok(Event {
        uid: view.uid(),
        summary: view.summary(),
        start: view.start_time()?,
        end: view.end_time()?,
        description: view.detail_link(),
        stamp,
    })
}

/// One event per activity, in input order. Duplicate activities stay
/// duplicated.
pub fn build_calendar(
    activities: &[RawActivity],
    refs: &ReferenceData,
    stamp: DateTime<Utc>,
) -> Result<Calendar, ExportError> {
    let mut calendar = Calendar::new();
    for raw in activities {
        let view = refs.view(raw);
        tracing::debug!(
            activity_id = raw.activity_id,
            category = %view.category(),
            "converting activity"
        );
        calendar.push(event_from_view(&view, stamp)?);
    }
    Ok(calendar)
}

/// Fetches everything one export needs and assembles the calendar.
pub async fn run(api: &GarminApi, options: &ExportOptions, stamp: DateTime<Utc>) -> Result<Calendar> {
    let activities = api
        .activities(options.limit, options.filter)
        .await
        .context("Failed to fetch activities")?;
    let types = api
        .activity_types()
        .await
        .context("Failed to fetch activity types")?;
    let timezones = api
        .timezones()
        .await
        .context("Failed to fetch timezones")?;

    let measurement_system = match options.measurement {
        MeasurementPreference::Fixed(system) => system,
        MeasurementPreference::Account => api
            .user_settings()
            .await
            .context("Failed to fetch user settings")?
            .measurement_system(),
    };

    let refs = ReferenceData::new(types, timezones, measurement_system);
    tracing::debug!(
        activity_types = refs.types.len(),
        timezones = timezones.len(),
        ?measurement_system,
        "reference data loaded"
    );
    if refs.types.is_empty() {
        tracing::warn!("no activity types returned, every activity will be categorized as Other");
    }
    let calendar = build_calendar(&activities, &refs, stamp)?;
    tracing::info!(events = calendar.events().len(), "calendar assembled");
    Ok(calendar)
}

/// Writes the document to `target`, or to stdout when there is none.
pub fn write_calendar(text: &str, target: Option<&Path>) -> Result<()> {
    match target {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "calendar written");
        }
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_preference_parses_cli_values() {
        assert_eq!(
            "metric".parse::<MeasurementPreference>(),
            Ok(MeasurementPreference::Fixed(MeasurementSystem::Metric))
        );
        assert_eq!(
            "imperial".parse::<MeasurementPreference>(),
            Ok(MeasurementPreference::Fixed(MeasurementSystem::Imperial))
        );
        assert_eq!(
            "account".parse::<MeasurementPreference>(),
            Ok(MeasurementPreference::Account)
        );
        assert!("furlongs".parse::<MeasurementPreference>().is_err());
    }

    #[test]
    fn default_options_match_cli_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.limit, 10_000);
        assert_eq!(options.filter, ActivityFilter::All);
        assert_eq!(
            options.measurement,
            MeasurementPreference::Fixed(MeasurementSystem::Metric)
        );
    }
}
