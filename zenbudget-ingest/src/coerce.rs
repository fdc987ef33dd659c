//! Cell coercion for amount and date columns.
//!
//! Anything that does not coerce cleanly becomes `None`; callers drop the
//! row instead of failing the load. Amounts must be plain numbers: a
//! currency marker or thousands separator makes the cell unparseable.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

// Two-digit-year formats come first: "%Y" would happily read "26" as year 26.
const DAY_FIRST_DATETIME: &[&str] = &[
    "%d/%m/%y %H:%M:%S",
    "%d/%m/%y %H:%M",
    "%d-%m-%y %H:%M:%S",
    "%d-%m-%y %H:%M",
    "%d.%m.%y %H:%M:%S",
    "%d.%m.%y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DAY_FIRST_DATE: &[&str] = &[
    "%d/%m/%y", "%d-%m-%y", "%d.%m.%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y",
];

const ISO_DATETIME: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Compiled coercion rules, built once per load
pub struct Coercer {
    amount_re: Regex,
}

impl Coercer {
    pub fn new() -> Result<Self> {
        // Plain decimal or exponent notation only; no currency markers or
        // grouping separators
        let amount_re = Regex::new(r"^[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?$")?;
        Ok(Self { amount_re })
    }

    /// "42", " -3.5 ", ".5", "1e3" -> Some; "1,250.50", "AED 12", "n/a", "inf" -> None
    pub fn amount(&self, raw: &str) -> Option<f64> {
        let s = raw.trim();
        if !self.amount_re.is_match(s) {
            return None;
        }
        s.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Day-first dates with optional time, then ISO 8601 / RFC 3339.
    /// Date-only values land at midnight; offsets are dropped in favour of
    /// the wall-clock time.
    pub fn timestamp(&self, raw: &str) -> Option<NaiveDateTime> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        for fmt in DAY_FIRST_DATETIME {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt);
            }
        }
        for fmt in DAY_FIRST_DATE {
            if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
                return Some(d.and_time(chrono::NaiveTime::MIN));
            }
        }
        for fmt in ISO_DATETIME {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt);
            }
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(d.and_time(chrono::NaiveTime::MIN));
        }
        DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local())
    }
}
