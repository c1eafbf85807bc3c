use chrono::{DateTime, TimeZone, Utc};
use garmin_ical_export::data::{ActivityTypeRecord, RawActivity, TimezoneRecord};
use std::fs;
use std::path::Path;

#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

#[allow(dead_code)]
pub fn activities() -> Vec<RawActivity> {
    serde_json::from_str(&fixture("activities.json")).expect("Failed to parse activities fixture")
}

#[allow(dead_code)]
pub fn activity_types() -> Vec<ActivityTypeRecord> {
    serde_json::from_str(&fixture("activity_types.json")).expect("Failed to parse types fixture")
}

#[allow(dead_code)]
pub fn timezones() -> Vec<TimezoneRecord> {
    serde_json::from_str(&fixture("timezones.json")).expect("Failed to parse timezones fixture")
}

#[allow(dead_code)]
pub fn stamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap()
}
