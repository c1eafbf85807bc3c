use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parent id carried by the top-level activity types.
pub const ROOT_ACTIVITY_TYPE_ID: i64 = 17;

// ── Activity ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivity {
    pub activity_id: i64,
    pub owner_id: i64,
    #[serde(default)]
    pub activity_name: Option<String>,
    pub activity_type: ActivityTypeRecord,
    /// metres per second
    #[serde(default)]
    pub average_speed: Option<f64>,
    /// metres
    #[serde(default)]
    pub distance: Option<f64>,
    /// seconds
    #[serde(default)]
    pub duration: Option<f64>,
    /// seconds, including pauses
    #[serde(default)]
    pub elapsed_duration: Option<f64>,
    pub start_time_local: String,
    pub time_zone_id: i64,
}

// ── Reference data ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTypeRecord {
    pub type_id: i64,
    pub type_key: String,
    pub parent_type_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneRecord {
    pub unit_id: i64,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub measurement_system: Option<String>,
}

impl UserSettings {
    /// `metric` keeps metric units; `statute_us`, `statute_uk` and anything
    /// else the service invents are shown in miles.
    pub fn measurement_system(&self) -> MeasurementSystem {
        match self.measurement_system.as_deref() {
            None | Some("metric") => MeasurementSystem::Metric,
            Some(_) => MeasurementSystem::Imperial,
        }
    }
}

// ── Category ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Running,
    Cycling,
    Swimming,
    Multisport,
    FitnessEquipment,
    Hiking,
    Walking,
    WinterSports,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Running,
        Category::Cycling,
        Category::Swimming,
        Category::Multisport,
        Category::FitnessEquipment,
        Category::Hiking,
        Category::Walking,
        Category::WinterSports,
        Category::Other,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Category::Running => "running",
            Category::Cycling => "cycling",
            Category::Swimming => "swimming",
            Category::Multisport => "multi_sport",
            Category::FitnessEquipment => "fitness_equipment",
            Category::Hiking => "hiking",
            Category::Walking => "walking",
            Category::WinterSports => "winter_sports",
            Category::Other => "other",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.tag() == tag)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ── Measurement system ──────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MeasurementSystem {
    #[default]
    Metric,
    Imperial,
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(MeasurementSystem::Metric),
            "imperial" => Ok(MeasurementSystem::Imperial),
            other => Err(format!("unknown measurement system: {other}")),
        }
    }
}

// ── Activity filter ─────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivityFilter {
    #[default]
    All,
    Only(Category),
}

impl ActivityFilter {
    /// Value of the `activityType` query parameter, if any.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            ActivityFilter::All => None,
            ActivityFilter::Only(category) => Some(category.tag()),
        }
    }
}

impl FromStr for ActivityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(ActivityFilter::All);
        }
        Category::from_tag(s)
            .map(ActivityFilter::Only)
            .ok_or_else(|| format!("unknown activity type: {s}"))
    }
}
