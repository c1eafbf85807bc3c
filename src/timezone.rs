use std::collections::HashMap;

use chrono_tz::Tz;

use crate::data::TimezoneRecord;

fn parse_zone(record: &TimezoneRecord) -> Option<Tz> {
    match record.time_zone.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            tracing::warn!(
                unit_id = record.unit_id,
                time_zone = %record.time_zone,
                "unknown time zone name, leaving times zone-naive"
            );
            None
        }
    }
}

/// Finds the zone for a Garmin timezone unit id.
///
/// Returns `None` when no record matches or the record names a zone that
/// chrono-tz does not know; event times then stay zone-naive.
pub fn resolve_timezone(time_zone_id: i64, records: &[TimezoneRecord]) -> Option<Tz> {
    let record = records.iter().find(|r| r.unit_id == time_zone_id)?;
    parse_zone(record)
}

/// [`resolve_timezone`] answers for every id in the catalog, computed once
/// per run.
#[derive(Debug, Default, Clone)]
pub struct TimezoneTable {
    zones: HashMap<i64, Option<Tz>>,
}

impl TimezoneTable {
    pub fn new(records: &[TimezoneRecord]) -> Self {
        let mut zones = HashMap::with_capacity(records.len());
        for record in records {
            zones
                .entry(record.unit_id)
                .or_insert_with(|| resolve_timezone(record.unit_id, records));
        }
        Self { zones }
    }

    pub fn resolve(&self, time_zone_id: i64) -> Option<Tz> {
        self.zones.get(&time_zone_id).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<TimezoneRecord> {
        vec![
            TimezoneRecord {
                unit_id: 1,
                time_zone: "Europe/Prague".to_string(),
            },
            TimezoneRecord {
                unit_id: 2,
                time_zone: "America/New_York".to_string(),
            },
            TimezoneRecord {
                unit_id: 3,
                time_zone: "Mars/Olympus_Mons".to_string(),
            },
            TimezoneRecord {
                unit_id: 1,
                time_zone: "Asia/Tokyo".to_string(),
            },
        ]
    }

    #[test]
    fn first_matching_record_wins() {
        let table = TimezoneTable::new(&records());
        assert_eq!(table.resolve(1), Some(chrono_tz::Europe::Prague));
        assert_eq!(table.resolve(2), Some(chrono_tz::America::New_York));
    }

    #[test]
    fn unknown_id_or_zone_is_none() {
        let table = TimezoneTable::new(&records());
        assert_eq!(table.resolve(99), None);
        assert_eq!(table.resolve(3), None);
        assert_eq!(TimezoneTable::new(&[]).resolve(1), None);
    }

    #[test]
    fn linear_search_takes_first_match() {
        assert_eq!(resolve_timezone(1, &records()), Some(chrono_tz::Europe::Prague));
        assert_eq!(resolve_timezone(3, &records()), None);
        assert_eq!(resolve_timezone(99, &records()), None);
    }
}
