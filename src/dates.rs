//! Display formatting for content dates
//!
//! Locale is fixed to `en-GB` (day before month). Month style comes from
//! configuration.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const SUPPORTED_LOCALE: &str = "en-GB";

/// CLDR en-GB abbreviated month names
const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// How month names are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthStyle {
    /// "Mar"
    #[default]
    Short,
    /// "March"
    Long,
}

/// Date display settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFormat {
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default)]
    pub month: MonthStyle,
}

fn default_locale() -> String {
    SUPPORTED_LOCALE.to_string()
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            month: MonthStyle::default(),
        }
    }
}

impl DateFormat {
    pub fn with_month(month: MonthStyle) -> Self {
        Self {
            month,
            ..Default::default()
        }
    }

    fn month_name(&self, date: NaiveDate) -> String {
        match self.month {
            MonthStyle::Short => SHORT_MONTHS[date.month0() as usize].to_string(),
            MonthStyle::Long => date.format("%B").to_string(),
        }
    }
}

/// Month and year, e.g. "Mar 2024"
pub fn format_displayed_date(date: NaiveDate, format: &DateFormat) -> String {
    format!("{} {}", format.month_name(date), date.year())
}

/// Day, month and year, e.g. "15 Mar 2024"
pub fn format_displayed_full_date(date: NaiveDate, format: &DateFormat) -> String {
    format!("{} {} {}", date.day(), format.month_name(date), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_displayed_date_short_and_long() {
        let date = ymd(2024, 3, 15);
        assert_eq!(format_displayed_date(date, &DateFormat::default()), "Mar 2024");
        assert_eq!(
            format_displayed_date(date, &DateFormat::with_month(MonthStyle::Long)),
            "March 2024"
        );
    }

    #[test]
    fn test_displayed_full_date() {
        let date = ymd(2024, 3, 5);
        assert_eq!(format_displayed_full_date(date, &DateFormat::default()), "5 Mar 2024");
        assert_eq!(
            format_displayed_full_date(date, &DateFormat::with_month(MonthStyle::Long)),
            "5 March 2024"
        );
    }

    #[test]
    fn test_september_abbreviation() {
        let date = ymd(2024, 9, 1);
        assert_eq!(format_displayed_date(date, &DateFormat::default()), "Sept 2024");
        assert_eq!(format_displayed_full_date(date, &DateFormat::default()), "1 Sept 2024");
        assert_eq!(
            format_displayed_date(date, &DateFormat::with_month(MonthStyle::Long)),
            "September 2024"
        );
    }

    #[test]
    fn test_other_short_months() {
        let short: Vec<_> = (1..=12)
            .map(|m| format_displayed_date(ymd(2023, m, 1), &DateFormat::default()))
            .collect();
        assert_eq!(short[0], "Jan 2023");
        assert_eq!(short[5], "Jun 2023");
        assert_eq!(short[11], "Dec 2023");
    }

    #[test]
    fn test_date_format_deserializes_with_defaults() {
        let format: DateFormat = serde_json::from_str("{}").unwrap();
        assert_eq!(format, DateFormat::default());
        assert_eq!(format.locale, "en-GB");

        let format: DateFormat = serde_json::from_str(r#"{"month": "long"}"#).unwrap();
        assert_eq!(format.month, MonthStyle::Long);
    }
}
