//! Daily run schedule expressed as a restricted cron expression.

use chrono::{DateTime, Days, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::errors::{Error, Result};
use crate::utils::time_utils::{local_date, local_to_utc};

/// A once-a-day wall-clock time, parsed from `"<minute> <hour> * * *"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    pub minute: u32,
    pub hour: u32,
}

impl DailySchedule {
    /// Accepts five cron fields with a fixed minute and hour and `*` elsewhere.
    pub fn parse(expr: &str) -> Result<Self> {
        let fields: Vec<&str> = expr.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(Error::Config(format!(
                "Expected 5 cron fields, got {} in '{}'",
                fields.len(),
                expr
            )));
        }
        if let Some(field) = fields[2..].iter().find(|f| **f != "*") {
            return Err(Error::Config(format!(
                "Only '*' is supported for day, month and weekday fields, got '{}'",
                field
            )));
        }
        Ok(Self {
            minute: parse_field(fields[0], 59, "minute")?,
            hour: parse_field(fields[1], 23, "hour")?,
        })
    }

    fn time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0)
    }

    /// Next occurrence strictly after `now`, in local time of `tz`.
    pub fn next_after(&self, now: DateTime<Utc>, tz: Tz) -> Option<DateTime<Utc>> {
        let time = self.time()?;
        let today = local_date(now, tz);
        (0..=2)
            .filter_map(|offset| today.checked_add_days(Days::new(offset)))
            .map(|date| local_to_utc(date.and_time(time), tz))
            .find(|candidate| *candidate > now)
    }
}

fn parse_field(field: &str, max: u32, name: &str) -> Result<u32> {
    let value: u32 = field
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {} value '{}'", name, field)))?;
    if value > max {
        return Err(Error::Config(format!(
            "{} value {} out of range 0-{}",
            name, value, max
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_default_expression() {
        let schedule = DailySchedule::parse("0 20 * * *").unwrap();
        assert_eq!(schedule, DailySchedule { minute: 0, hour: 20 });
    }

    #[test]
    fn rejects_unsupported_expressions() {
        assert!(DailySchedule::parse("0 20 * *").is_err());
        assert!(DailySchedule::parse("*/5 20 * * *").is_err());
        assert!(DailySchedule::parse("0 24 * * *").is_err());
        assert!(DailySchedule::parse("0 20 1 * *").is_err());
    }

    #[test]
    fn next_run_is_later_today_or_tomorrow() {
        let schedule = DailySchedule::parse("0 20 * * *").unwrap();
        let morning = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        assert_eq!(
            schedule.next_after(morning, chrono_tz::UTC),
            Some(Utc.with_ymd_and_hms(2026, 10, 19, 20, 0, 0).unwrap())
        );

        let exactly = Utc.with_ymd_and_hms(2026, 10, 19, 20, 0, 0).unwrap();
        assert_eq!(
            schedule.next_after(exactly, chrono_tz::UTC),
            Some(Utc.with_ymd_and_hms(2026, 10, 20, 20, 0, 0).unwrap())
        );
    }

    #[test]
    fn next_run_follows_local_time() {
        let schedule = DailySchedule::parse("30 20 * * *").unwrap();
        let tz: Tz = "Africa/Lagos".parse().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 19, 0, 0).unwrap();
        // 20:30 in Lagos (UTC+1) is 19:30 UTC.
        assert_eq!(
            schedule.next_after(now, tz),
            Some(Utc.with_ymd_and_hms(2026, 10, 19, 19, 30, 0).unwrap())
        );
    }
}
