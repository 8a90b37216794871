//! UTC calendar dates without timezone dependencies.
//!
//! Only what the sitemap needs: today's date in UTC, printed as
//! `YYYY-MM-DD`.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A proleptic Gregorian calendar date in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateUtc {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl DateUtc {
    /// Current date in UTC. Clocks before 1970 read as 1970-01-01.
    pub fn today() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_unix_days(i64::try_from(secs / 86_400).unwrap_or(0))
    }

    /// Date `days` days after 1970-01-01.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // month/day are in range
    pub const fn from_unix_days(days: i64) -> Self {
        // Shift the epoch to 0000-03-01 so leap days fall at the end of a year
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
        let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };

        Self {
            year: year as i32,
            month,
            day,
        }
    }
}

impl fmt::Display for DateUtc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        assert_eq!(DateUtc::from_unix_days(0).to_string(), "1970-01-01");
    }

    #[test]
    fn test_known_dates() {
        assert_eq!(DateUtc::from_unix_days(10_957).to_string(), "2000-01-01");
        assert_eq!(DateUtc::from_unix_days(11_016).to_string(), "2000-02-29");
        assert_eq!(DateUtc::from_unix_days(19_782).to_string(), "2024-02-29");
        assert_eq!(DateUtc::from_unix_days(20_089).to_string(), "2025-01-01");
        assert_eq!(DateUtc::from_unix_days(-1).to_string(), "1969-12-31");
    }

    #[test]
    fn test_consecutive_days_increase() {
        let mut prev = DateUtc::from_unix_days(18_000);
        for days in 18_001..18_800 {
            let next = DateUtc::from_unix_days(days);
            assert!(next > prev, "{next} after {prev}");
            prev = next;
        }
    }

    #[test]
    fn test_today_format() {
        let today = DateUtc::today().to_string();
        assert_eq!(today.len(), 10);
        assert_eq!(today.as_bytes()[4], b'-');
        assert_eq!(today.as_bytes()[7], b'-');
    }
}
