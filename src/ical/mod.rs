//! iCalendar (RFC 5545) output.
//!
//! - `escape`: TEXT and parameter value escaping
//! - `fold`: 75-octet content line folding
//! - `serializer`: component tree and rendering
//! - `vtimezone`: zone definitions for the zones events refer to

mod escape;
mod fold;
mod serializer;
mod vtimezone;

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

use crate::activity::EventTime;

pub use escape::{escape_param_value, escape_text};
pub use fold::fold_line;
pub use serializer::{serialize_component, serialize_property, Component, Parameter, Property};

pub const PRODUCT_ID: &str = "-//garmin-ical-export//EN";

pub(crate) const LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";
const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub uid: String,
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
    pub description: String,
    pub stamp: DateTime<Utc>,
}

impl Event {
    pub fn to_component(&self) -> Component {
        let mut component = Component::new("VEVENT");
        component.push_property(Property::text("UID", &self.uid));
        component.push_property(Property::raw("DTSTAMP", self.stamp.format(UTC_FORMAT).to_string()));
        component.push_property(date_time_property("DTSTART", &self.start));
        component.push_property(date_time_property("DTEND", &self.end));
        component.push_property(Property::text("SUMMARY", &self.summary));
        component.push_property(Property::text("DESCRIPTION", &self.description));
        component
    }
}

/// Event collection rendered as one `VCALENDAR`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    events: Vec<Event>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn to_component(&self) -> Component {
        let mut calendar = Component::new("VCALENDAR");
        calendar.push_property(Property::raw("VERSION", "2.0"));
        calendar.push_property(Property::text("PRODID", PRODUCT_ID));

        for (tz, years) in self.zone_years() {
            calendar.push_child(vtimezone::build(tz, years.0.saturating_sub(1)..=years.1));
        }
        for event in &self.events {
            calendar.push_child(event.to_component());
        }
        calendar
    }

    pub fn serialize(&self) -> String {
        serialize_component(&self.to_component())
    }

    /// Zones referenced by events with the first and last year they appear
    /// in, ordered by zone name.
    fn zone_years(&self) -> Vec<(Tz, (i32, i32))> {
        let mut zones: BTreeMap<&'static str, (Tz, i32, i32)> = BTreeMap::new();
        for time in self.events.iter().flat_map(|e| [&e.start, &e.end]) {
            let Some(tz) = time.timezone() else {
                continue;
            };
            let year = time.naive_local().year();
            zones
                .entry(tz.name())
                .and_modify(|(_, first, last)| {
                    *first = (*first).min(year);
                    *last = (*last).max(year);
                })
                .or_insert((tz, year, year));
        }
        zones
            .into_values()
            .map(|(tz, first, last)| (tz, (first, last)))
            .collect()
    }
}

fn date_time_property(name: &str, time: &EventTime) -> Property {
    let value = time.naive_local().format(LOCAL_FORMAT).to_string();
    match time.timezone() {
        Some(tz) => Property::raw(name, value).with_param("TZID", tz.name()),
        None => Property::raw(name, value),
    }
}
