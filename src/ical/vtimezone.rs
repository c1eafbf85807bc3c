//! `VTIMEZONE` components derived from the chrono-tz database.
//!
//! Observances are found by sampling the zone's UTC offset once a day and
//! bisecting each change down to the second.

use std::ops::RangeInclusive;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::{OffsetComponents, Tz, TzOffset};

use super::serializer::{Component, Property};
use super::LOCAL_FORMAT;

const DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy)]
struct Transition {
    /// UTC seconds of the first instant in the new offset.
    at: i64,
    from: TzOffset,
    to: TzOffset,
}

/// Builds the `VTIMEZONE` for `tz` covering the given calendar years.
pub fn build(tz: Tz, years: RangeInclusive<i32>) -> Component {
    let start = year_start(*years.start());
    let end = year_start(years.end().saturating_add(1));

    let mut component = Component::new("VTIMEZONE");
    component.push_property(Property::text("TZID", tz.name()));

    let found = transitions(tz, start, end);
    if found.is_empty() {
        let offset = offset_at(tz, start);
        component.push_child(observance(offset, offset, NaiveDateTime::default()));
    } else {
        for transition in found {
            let local = utc_naive(transition.at)
                + chrono::Duration::seconds(i64::from(seconds_east(&transition.from)));
            component.push_child(observance(transition.from, transition.to, local));
        }
    }

    component
}

fn observance(from: TzOffset, to: TzOffset, local_start: NaiveDateTime) -> Component {
    let kind = if to.dst_offset().num_seconds() != 0 {
        "DAYLIGHT"
    } else {
        "STANDARD"
    };
    let mut component = Component::new(kind);
    component.push_property(Property::raw(
        "DTSTART",
        local_start.format(LOCAL_FORMAT).to_string(),
    ));
    component.push_property(Property::raw("TZOFFSETFROM", utc_offset(seconds_east(&from))));
    component.push_property(Property::raw("TZOFFSETTO", utc_offset(seconds_east(&to))));
    component.push_property(Property::text("TZNAME", &to.to_string()));
    component
}

fn transitions(tz: Tz, start: i64, end: i64) -> Vec<Transition> {
    let mut found = Vec::new();
    let mut t = start;
    while t < end {
        let next = (t + DAY).min(end);
        if key(&offset_at(tz, t)) != key(&offset_at(tz, next)) {
            let at = bisect(tz, t, next);
            found.push(Transition {
                at,
                from: offset_at(tz, at - 1),
                to: offset_at(tz, at),
            });
        }
        t = next;
    }
    found
}

/// First second in `(lo, hi]` whose offset differs from the one at `lo`.
fn bisect(tz: Tz, mut lo: i64, mut hi: i64) -> i64 {
    let before = key(&offset_at(tz, lo));
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if key(&offset_at(tz, mid)) == before {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}

fn key(offset: &TzOffset) -> (i32, i64) {
    (seconds_east(offset), offset.dst_offset().num_seconds())
}

fn seconds_east(offset: &TzOffset) -> i32 {
    offset.fix().local_minus_utc()
}

fn offset_at(tz: Tz, utc_seconds: i64) -> TzOffset {
    tz.offset_from_utc_datetime(&utc_naive(utc_seconds))
}

fn utc_naive(utc_seconds: i64) -> NaiveDateTime {
    DateTime::from_timestamp(utc_seconds, 0)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default()
}

fn year_start(year: i32) -> i64 {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
        .and_utc()
        .timestamp()
}

/// `±HHMM`, or `±HHMMSS` when the offset has seconds.
fn utc_offset(seconds_east: i32) -> String {
    let sign = if seconds_east < 0 { '-' } else { '+' };
    let abs = seconds_east.unsigned_abs();
    let (hours, minutes, seconds) = (abs / 3600, (abs % 3600) / 60, abs % 60);
    if seconds == 0 {
        format!("{sign}{hours:02}{minutes:02}")
    } else {
        format!("{sign}{hours:02}{minutes:02}{seconds:02}")
    }
}
