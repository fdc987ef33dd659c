//! Week boundaries and timezone-aware "today".

use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Which weekday opens a week. Defaults to Monday, the span pandas'
/// weekly periods use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRule {
    pub start: Weekday,
}

impl Default for WeekRule {
    fn default() -> Self {
        Self {
            start: Weekday::Mon,
        }
    }
}

impl WeekRule {
    pub fn starting_on(start: Weekday) -> Self {
        Self { start }
    }

    /// First day of the week containing `date`
    pub fn week_start(&self, date: NaiveDate) -> NaiveDate {
        let offset =
            (7 + date.weekday().num_days_from_monday() - self.start.num_days_from_monday()) % 7;
        date - Duration::days(i64::from(offset))
    }

    pub fn same_week(&self, a: NaiveDate, b: NaiveDate) -> bool {
        self.week_start(a) == self.week_start(b)
    }
}

/// Current calendar date in an IANA tz like "Asia/Dubai".
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_monday_start() {
        let rule = WeekRule::default();
        // 2026-02-18 is a Wednesday
        assert_eq!(rule.week_start(d(2026, 2, 18)), d(2026, 2, 16));
        assert_eq!(rule.week_start(d(2026, 2, 16)), d(2026, 2, 16));
        assert_eq!(rule.week_start(d(2026, 2, 22)), d(2026, 2, 16));
        assert_eq!(rule.week_start(d(2026, 2, 23)), d(2026, 2, 23));
    }

    #[test]
    fn test_sunday_start_crosses_year() {
        let rule = WeekRule::starting_on(Weekday::Sun);
        // 2026-01-01 is a Thursday; the week opened on Sunday 2025-12-28
        assert_eq!(rule.week_start(d(2026, 1, 1)), d(2025, 12, 28));
        assert!(rule.same_week(d(2025, 12, 31), d(2026, 1, 3)));
        assert!(!rule.same_week(d(2026, 1, 3), d(2026, 1, 4)));
    }

    #[test]
    fn test_today_rejects_bad_timezone() {
        assert!(today_in("Mars/Olympus").is_err());
        assert!(today_in("Asia/Dubai").is_ok());
    }
}
