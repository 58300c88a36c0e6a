use chrono::prelude::*;
use chrono::{DateTime, Duration, FixedOffset};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_TIMESPAN_DAYS: i64 = 40;

/// Half open interval `[start_ts, end_ts)` in millis since epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSpan {
    start_ts: i64,
    end_ts: i64,
}

#[derive(Error, Debug, PartialEq)]
#[error("Provided timespan start_ts: {0} and end_ts: {1} is invalid. It should be between 1 millisecond and 40 days.")]
pub struct InvalidTimeSpanError(pub i64, pub i64);

impl TimeSpan {
    pub fn create(start_ts: i64, end_ts: i64) -> Result<Self, InvalidTimeSpanError> {
        let max_timespan = 1000 * 60 * 60 * 24 * MAX_TIMESPAN_DAYS;
        let delta = end_ts - start_ts;

        if delta > max_timespan || delta <= 0 {
            Err(InvalidTimeSpanError(start_ts, end_ts))
        } else {
            Ok(Self { start_ts, end_ts })
        }
    }

    /// The window in which appointments are fetched: from the start of the
    /// current day in `tz` through the start of the day `days` later.
    pub fn lookahead(now_ts: i64, tz: &Tz, days: i64) -> Result<Self, InvalidTimeSpanError> {
        let now = match tz.timestamp_millis_opt(now_ts).single() {
            Some(now) => now,
            None => return Err(InvalidTimeSpanError(now_ts, now_ts)),
        };
        let offset = now.offset().fix();
        let today = now.date_naive();

        let start = local_midnight(today, tz, offset);
        let end = local_midnight(today + Duration::days(days), tz, offset);
        Self::create(start.timestamp_millis(), end.timestamp_millis())
    }

    pub fn contains(&self, ts: i64) -> bool {
        self.start_ts <= ts && ts < self.end_ts
    }

    pub fn as_datetime(&self, tz: &Tz) -> Option<TimeSpanDateTime> {
        Some(TimeSpanDateTime {
            start: tz.timestamp_millis_opt(self.start_ts).single()?,
            end: tz.timestamp_millis_opt(self.end_ts).single()?,
        })
    }

    pub fn get_start(&self) -> i64 {
        self.start_ts
    }

    pub fn get_end(&self) -> i64 {
        self.end_ts
    }
}

// Midnight does not exist on some DST transition days, in that case the
// offset observed at `now` is used instead.
fn local_midnight(date: NaiveDate, tz: &Tz, fallback: FixedOffset) -> DateTime<FixedOffset> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive).earliest() {
        Some(midnight) => midnight.with_timezone(&midnight.offset().fix()),
        None => fallback
            .from_local_datetime(&naive)
            .single()
            .unwrap_or_else(|| fallback.from_utc_datetime(&naive)),
    }
}

#[derive(Debug)]
pub struct TimeSpanDateTime {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_rejects_invalid_timespans() {
        assert!(TimeSpan::create(10, 10).is_err());
        assert!(TimeSpan::create(10, 5).is_err());
        assert!(TimeSpan::create(0, 1000 * 60 * 60 * 24 * 41).is_err());
        assert!(TimeSpan::create(0, 1000 * 60 * 60 * 24 * 40).is_ok());
    }

    #[test]
    fn lookahead_starts_at_local_midnight() {
        // 2021-02-20T22:30:00Z is already 2021-02-21 01:30 in Istanbul (UTC+3)
        let now = Utc.with_ymd_and_hms(2021, 2, 20, 22, 30, 0).unwrap();
        let span =
            TimeSpan::lookahead(now.timestamp_millis(), &chrono_tz::Europe::Istanbul, 2).unwrap();

        let expected_start = Utc.with_ymd_and_hms(2021, 2, 20, 21, 0, 0).unwrap();
        let expected_end = Utc.with_ymd_and_hms(2021, 2, 22, 21, 0, 0).unwrap();
        assert_eq!(span.get_start(), expected_start.timestamp_millis());
        assert_eq!(span.get_end(), expected_end.timestamp_millis());
        assert!(span.contains(now.timestamp_millis()));
    }

    #[test]
    fn lookahead_in_utc() {
        let now = Utc.with_ymd_and_hms(2021, 2, 20, 10, 0, 0).unwrap();
        let span = TimeSpan::lookahead(now.timestamp_millis(), &Tz::UTC, 2).unwrap();
        let start = Utc.with_ymd_and_hms(2021, 2, 20, 0, 0, 0).unwrap();
        assert_eq!(span.get_start(), start.timestamp_millis());
        assert_eq!(span.get_end() - span.get_start(), 1000 * 60 * 60 * 48);
        assert!(!span.contains(span.get_end()));
    }

    #[test]
    fn lookahead_spans_dst_change() {
        // Europe/Oslo switches to summer time on 2021-03-28
        let now = Utc.with_ymd_and_hms(2021, 3, 27, 12, 0, 0).unwrap();
        let span = TimeSpan::lookahead(now.timestamp_millis(), &chrono_tz::Europe::Oslo, 2).unwrap();
        assert_eq!(span.get_end() - span.get_start(), 1000 * 60 * 60 * 47);
    }
}
