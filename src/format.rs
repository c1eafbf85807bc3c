//! Display formatting for raw activity measurements.
//!
//! Inputs are the units the API reports: seconds, metres and metres per
//! second. Rounding is half-to-even and decimals are printed in their
//! shortest form with at least one fractional digit, so 1500 m reads
//! `1.5 km` and 5 m/s reads `18.0 km/h`.

/// Miles per kilometre.
pub const MILES_PER_KILOMETER: f64 = 0.62137;

const METRES_PER_KILOMETER: f64 = 1000.0;
const KMPH_PER_MPS: f64 = 3.6;

/// `HH:MM:SS`, rounded to the nearest second.
pub fn time(seconds: f64) -> String {
    let total = seconds.round_ties_even() as i64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

pub fn distance_metres(metres: f64) -> String {
    format!("{} m", metres.round_ties_even() as i64)
}

pub fn distance_kilometers(metres: f64) -> String {
    format!("{} km", decimal(metres / METRES_PER_KILOMETER, 2))
}

pub fn distance_miles(metres: f64) -> String {
    let miles = metres / METRES_PER_KILOMETER * MILES_PER_KILOMETER;
    format!("{} mi", decimal(miles, 2))
}

pub fn speed_kmph(metres_per_second: f64) -> String {
    format!("{} km/h", decimal(metres_per_second * KMPH_PER_MPS, 1))
}

pub fn speed_mph(metres_per_second: f64) -> String {
    let mph = metres_per_second * KMPH_PER_MPS * MILES_PER_KILOMETER;
    format!("{} mi/h", decimal(mph, 1))
}

/// Pace over 100 m. The caller must pass a positive speed.
pub fn speed_minutes_per_100_metres(metres_per_second: f64) -> String {
    format!("{} min/100m", pace(100.0, metres_per_second))
}

/// Pace over 1 km. The caller must pass a positive speed.
pub fn speed_minutes_per_kilometer(metres_per_second: f64) -> String {
    format!("{} min/km", pace(METRES_PER_KILOMETER, metres_per_second))
}

/// Pace over 1 mi. The caller must pass a positive speed.
pub fn speed_minutes_per_mile(metres_per_second: f64) -> String {
    let metres_per_mile = METRES_PER_KILOMETER / MILES_PER_KILOMETER;
    format!("{} min/mi", pace(metres_per_mile, metres_per_second))
}

/// `M:SS` to cover `metres`. Minutes are truncated and seconds rounded; a
/// rounded 60 carries into the minutes.
fn pace(metres: f64, metres_per_second: f64) -> String {
    debug_assert!(metres_per_second > 0.0, "pace needs a positive speed");

    let total = metres / metres_per_second;
    let mut minutes = (total / 60.0).floor() as i64;
    let mut seconds = total.rem_euclid(60.0).round_ties_even() as i64;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }
    format!("{minutes}:{seconds:02}")
}

fn decimal(value: f64, places: i32) -> String {
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round_ties_even() / factor;
    format!("{rounded:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_is_zero_padded() {
        assert_eq!(time(3725.0), "01:02:05");
        assert_eq!(time(0.0), "00:00:00");
        assert_eq!(time(59.6), "00:01:00");
        assert_eq!(time(36_000.0), "10:00:00");
    }

    #[test]
    fn distances() {
        assert_eq!(distance_metres(1234.4), "1234 m");
        assert_eq!(distance_kilometers(1500.0), "1.5 km");
        assert_eq!(distance_kilometers(5000.0), "5.0 km");
        assert_eq!(distance_kilometers(10_123.0), "10.12 km");
        assert_eq!(distance_miles(1609.34), "1.0 mi");
        assert_eq!(distance_miles(42_195.0), "26.22 mi");
    }

    #[test]
    fn speeds() {
        assert_eq!(speed_kmph(5.0), "18.0 km/h");
        assert_eq!(speed_kmph(8.25), "29.7 km/h");
        assert_eq!(speed_mph(5.0), "11.2 mi/h");
    }

    #[test]
    fn paces_truncate_minutes_and_round_seconds() {
        assert_eq!(speed_minutes_per_kilometer(3.33), "5:00 min/km");
        assert_eq!(speed_minutes_per_kilometer(3.0), "5:33 min/km");
        assert_eq!(speed_minutes_per_100_metres(1.0), "1:40 min/100m");
        assert_eq!(speed_minutes_per_100_metres(2.0), "0:50 min/100m");
        assert_eq!(speed_minutes_per_mile(3.0), "8:56 min/mi");
    }

    #[test]
    fn pace_carries_rounded_minute() {
        // 1000 / 2.78 = 359.71 s
        assert_eq!(speed_minutes_per_kilometer(2.78), "6:00 min/km");
    }
}
