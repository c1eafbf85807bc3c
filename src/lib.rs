//! Export Garmin Connect activities as an iCalendar document.
//!
//! Each activity becomes one event titled with a sport-specific summary
//! such as `Morning Run (5.0 km, 5:00 min/km)`, spanning the activity's
//! start and duration, and linking back to the activity page.

pub mod activity;
pub mod api;
pub mod auth;
pub mod classify;
pub mod config;
pub mod data;
pub mod export;
pub mod format;
pub mod ical;
pub mod timezone;
