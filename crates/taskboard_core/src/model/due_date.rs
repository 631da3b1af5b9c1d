//! Calendar due-date value type.
//!
//! # Responsibility
//! - Parse canonical `YYYY-MM-DD` input and legacy `DD/MM/YYYY` input.
//! - Render the canonical and display forms from one `NaiveDate`.
//!
//! # Invariants
//! - Only real calendar dates are representable.
//! - `display()` is a pure function of the wrapped date.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

const CANONICAL_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

static LEGACY_DISPLAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid legacy date regex")
});

/// Due date of a task, stored as a plain calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Wraps an already-validated calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses the canonical `YYYY-MM-DD` form.
    ///
    /// Surrounding whitespace is ignored. Returns `None` for anything that
    /// is not a real calendar date.
    pub fn parse_canonical(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(trimmed, CANONICAL_FORMAT)
            .ok()
            .map(Self)
    }

    /// Parses the legacy `DD/MM/YYYY` display form written by older builds.
    ///
    /// Day and month may be unpadded. Returns `None` when the value has no
    /// day/month/year shape or names an impossible date such as `31/02/2024`.
    pub fn parse_legacy_display(value: &str) -> Option<Self> {
        let captures = LEGACY_DISPLAY_RE.captures(value.trim())?;
        let day = captures[1].parse::<u32>().ok()?;
        let month = captures[2].parse::<u32>().ok()?;
        let year = captures[3].parse::<i32>().ok()?;
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Current calendar date in UTC.
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Canonical `YYYY-MM-DD` rendering.
    pub fn canonical(&self) -> String {
        self.0.format(CANONICAL_FORMAT).to_string()
    }

    /// Display `DD/MM/YYYY` rendering.
    pub fn display(&self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }
}

impl Display for DueDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::DueDate;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> DueDate {
        DueDate::from_date(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    #[test]
    fn canonical_input_renders_display_form() {
        let parsed = DueDate::parse_canonical("2024-03-05").unwrap();
        assert_eq!(parsed.display(), "05/03/2024");
        assert_eq!(parsed.canonical(), "2024-03-05");
        assert_eq!(parsed.to_string(), "2024-03-05");
    }

    #[test]
    fn canonical_parse_trims_and_rejects_garbage() {
        assert_eq!(DueDate::parse_canonical(" 2024-12-31 "), Some(date(2024, 12, 31)));
        assert_eq!(DueDate::parse_canonical(""), None);
        assert_eq!(DueDate::parse_canonical("not a date"), None);
        assert_eq!(DueDate::parse_canonical("2023-02-29"), None);
        assert_eq!(DueDate::parse_canonical("05/03/2024"), None);
    }

    #[test]
    fn legacy_display_is_reordered_into_calendar_date() {
        assert_eq!(
            DueDate::parse_legacy_display("05/03/2024"),
            Some(date(2024, 3, 5))
        );
        assert_eq!(
            DueDate::parse_legacy_display("5/3/2024"),
            Some(date(2024, 3, 5))
        );
    }

    #[test]
    fn legacy_display_rejects_impossible_or_unshaped_values() {
        assert_eq!(DueDate::parse_legacy_display("31/02/2024"), None);
        assert_eq!(DueDate::parse_legacy_display("2024-03-05"), None);
        assert_eq!(DueDate::parse_legacy_display("Invalid Date"), None);
        assert_eq!(DueDate::parse_legacy_display("05/03"), None);
    }

    #[test]
    fn leap_day_round_trips_through_both_forms() {
        let leap = DueDate::parse_canonical("2024-02-29").unwrap();
        assert_eq!(DueDate::parse_legacy_display(&leap.display()), Some(leap));
    }
}
