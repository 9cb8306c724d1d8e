//! Time utilities: wall-clock parsing and timezone-aware "today".

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::error::{PlanError, PlanResult};

/// Parse "HH:MM" (24h) into a time of day. `label` names the field in errors.
pub fn parse_clock_time(value: &str, label: &str) -> PlanResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| PlanError::InvalidTime {
        label: label.to_string(),
        value: value.to_string(),
    })
}

/// Parse "HH:MM" and pin it to `day`.
pub fn clock_on(day: NaiveDate, value: &str, label: &str) -> PlanResult<NaiveDateTime> {
    Ok(day.and_time(parse_clock_time(value, label)?))
}

/// The calendar date at `now` in an IANA timezone like "America/Chicago".
pub fn local_date(now: DateTime<Utc>, tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// Today's date in `tz`.
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    local_date(Utc::now(), tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn parses_clock_times() {
        let t = parse_clock_time("07:15", "start time").unwrap();
        assert_eq!((t.hour(), t.minute()), (7, 15));
        assert!(parse_clock_time(" 18:00 ", "end time").is_ok());
    }

    #[test]
    fn rejects_malformed_clock_times() {
        let err = parse_clock_time("7-15", "start time").unwrap_err();
        assert!(err.to_string().contains("HH:MM"));
        assert!(err.to_string().contains("start time"));
        assert!(parse_clock_time("25:00", "end time").is_err());
        assert!(parse_clock_time("", "end time").is_err());
    }

    #[test]
    fn clock_on_keeps_the_day() {
        let day = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();
        let dt = clock_on(day, "09:30", "start time").unwrap();
        assert_eq!(dt.date(), day);
        assert_eq!(dt.time(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn local_date_crosses_midnight() {
        // 03:00 UTC on the 21st is still the 20th in Chicago (UTC-6 in Feb).
        let now = Utc.with_ymd_and_hms(2026, 2, 21, 3, 0, 0).unwrap();
        let d = local_date(now, "America/Chicago").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
        assert!(local_date(now, "Mars/Olympus").is_err());
    }
}
