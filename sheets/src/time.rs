//! Second-granularity conversions between stored timestamps and the wire.
//!
//! Storage keeps sub-second precision; the API exposes whole Unix seconds.

use chrono::{DateTime, NaiveDateTime};

/// Stored timestamp → Unix seconds, floored.
pub fn to_unix_time(at: NaiveDateTime) -> i64 {
    at.and_utc().timestamp()
}

/// Nullable variant used for `deletedAt`.
pub fn to_unix_time_opt(at: Option<NaiveDateTime>) -> Option<i64> {
    at.map(to_unix_time)
}

/// Unix seconds → point in time. `None` in, or out of range, gives `None`.
pub fn from_unix_time(secs: Option<i64>) -> Option<NaiveDateTime> {
    secs.and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_milli_opt(15, 9, 26, ms)
            .unwrap()
    }

    #[test]
    fn truncates_sub_second_precision() {
        let base = to_unix_time(at(0));
        assert_eq!(to_unix_time(at(999)), base);
        assert_eq!(to_unix_time(at(535)), at(535).and_utc().timestamp_millis() / 1000);
    }

    #[test]
    fn floors_before_epoch() {
        let before = DateTime::from_timestamp_millis(-1500).unwrap().naive_utc();
        assert_eq!(to_unix_time(before), -2);
    }

    #[test]
    fn reconstructs_at_second_granularity() {
        let secs = to_unix_time(at(750));
        let back = from_unix_time(Some(secs)).unwrap();
        assert_eq!(back, at(0));
        assert_eq!(from_unix_time(None), None);
    }
}
