use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc,
};
use chrono_tz::Tz;

/// Default timezone for wall-clock computations.
pub const DEFAULT_TZ: Tz = chrono_tz::UTC;

/// Inclusive time window `[start, end]` expressed in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// Converts a local wall-clock time in `tz` to a UTC instant.
///
/// Ambiguous times (DST fold) resolve to the earliest instant. Times that do
/// not exist (DST gap) resolve to the first valid local time after them.
pub fn local_to_utc(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => (1..=12)
            .map(|step| naive + Duration::minutes(15 * step))
            .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}

/// UTC instant of local midnight starting `date` in `tz`.
pub fn start_of_local_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    local_to_utc(date.and_time(NaiveTime::MIN), tz)
}

/// Calendar date of `instant` as seen in `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Local day containing `now`: `[00:00:00.000, 23:59:59.999]`.
pub fn day_window(now: DateTime<Utc>, tz: Tz) -> Period {
    let today = local_date(now, tz);
    let start = start_of_local_day(today, tz);
    let next = start_of_local_day(today + Days::new(1), tz);
    Period {
        start,
        end: next - Duration::milliseconds(1),
    }
}

/// Local calendar month containing `now`: first day 00:00:00.000 to last day 23:59:59.999.
pub fn month_window(now: DateTime<Utc>, tz: Tz) -> Period {
    let today = local_date(now, tz);
    let first_day = today - Days::new(u64::from(today.day0()));
    let next_first_day = first_day + Months::new(1);
    let start = start_of_local_day(first_day, tz);
    let next = start_of_local_day(next_first_day, tz);
    Period {
        start,
        end: next - Duration::milliseconds(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn month_window_in_utc() {
        let window = month_window(utc(2026, 10, 19, 15, 30, 0), DEFAULT_TZ);
        assert_eq!(window.start, utc(2026, 10, 1, 0, 0, 0));
        assert_eq!(
            window.end,
            utc(2026, 10, 31, 23, 59, 59) + Duration::milliseconds(999)
        );
    }

    #[test]
    fn month_window_handles_december_and_february() {
        let december = month_window(utc(2026, 12, 31, 23, 0, 0), DEFAULT_TZ);
        assert_eq!(december.start, utc(2026, 12, 1, 0, 0, 0));
        assert_eq!(
            december.end,
            utc(2026, 12, 31, 23, 59, 59) + Duration::milliseconds(999)
        );

        let february = month_window(utc(2028, 2, 10, 8, 0, 0), DEFAULT_TZ);
        assert_eq!(
            february.end,
            utc(2028, 2, 29, 23, 59, 59) + Duration::milliseconds(999)
        );
    }

    #[test]
    fn day_window_uses_local_calendar() {
        // 23:30 UTC on the 19th is already the 20th in Paris (UTC+2 in October).
        let tz: Tz = "Europe/Paris".parse().unwrap();
        let window = day_window(utc(2026, 10, 19, 23, 30, 0), tz);
        assert_eq!(window.start, utc(2026, 10, 19, 22, 0, 0));
        assert_eq!(
            window.end,
            utc(2026, 10, 20, 21, 59, 59) + Duration::milliseconds(999)
        );
        assert!(window.contains(utc(2026, 10, 20, 12, 0, 0)));
        assert!(!window.contains(utc(2026, 10, 20, 22, 0, 0)));
    }

    #[test]
    fn gap_midnight_resolves_forward() {
        // Santiago skips from 00:00 to 01:00 on 2026-09-06.
        let tz: Tz = "America/Santiago".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 9, 6).unwrap();
        let start = start_of_local_day(date, tz);
        assert_eq!(start.with_timezone(&tz).date_naive(), date);
        assert_eq!(start, utc(2026, 9, 6, 4, 0, 0));
    }
}
