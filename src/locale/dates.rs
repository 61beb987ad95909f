//! Localized date text built from the string table

use chrono::{Datelike, NaiveDate, Weekday};

use super::{fill, Locale, LocaleError, StringTable};

fn weekday_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

/// Formats dates for one locale
#[derive(Debug, Clone, Copy)]
pub struct DateFormatter<'a> {
    strings: &'a StringTable,
    locale: &'a Locale,
}

impl<'a> DateFormatter<'a> {
    pub fn new(strings: &'a StringTable, locale: &'a Locale) -> Self {
        Self { strings, locale }
    }

    fn get(&self, key: &str) -> Result<&'a str, LocaleError> {
        self.strings.get(key, self.locale)
    }

    pub fn weekday_short(&self, day: Weekday) -> Result<&'a str, LocaleError> {
        self.get(&format!("weekday.{}", weekday_key(day)))
    }

    pub fn weekday_full(&self, day: Weekday) -> Result<&'a str, LocaleError> {
        self.get(&format!("weekday.full.{}", weekday_key(day)))
    }

    pub fn month(&self, month: u32) -> Result<&'a str, LocaleError> {
        self.get(&format!("month.{}", month))
    }

    pub fn month_short(&self, month: u32) -> Result<&'a str, LocaleError> {
        self.get(&format!("month.short.{}", month))
    }

    /// Day cell date: `June 11`, or just `12` when `prev` is in the same month
    pub fn calendar_date(&self, date: NaiveDate, prev: Option<NaiveDate>) -> Result<String, LocaleError> {
        let day = date.day().to_string();
        if prev.map(|p| p.month() == date.month()).unwrap_or(false) {
            return Ok(day);
        }
        Ok(fill(
            self.get("page.format.month-day")?,
            &[("month", self.month(date.month())?), ("day", day.as_str())],
        ))
    }

    /// Bracket cell date: `Sat, Jul 4`
    pub fn short_date(&self, date: NaiveDate) -> Result<String, LocaleError> {
        Ok(fill(
            self.get("page.format.weekday-date")?,
            &[
                ("weekday", self.weekday_short(date.weekday())?),
                ("month", self.month_short(date.month())?),
                ("day", date.day().to_string().as_str()),
            ],
        ))
    }

    /// Final card date: `Sunday, July 19`
    pub fn long_date(&self, date: NaiveDate) -> Result<String, LocaleError> {
        Ok(fill(
            self.get("page.format.weekday-date")?,
            &[
                ("weekday", self.weekday_full(date.weekday())?),
                ("month", self.month(date.month())?),
                ("day", date.day().to_string().as_str()),
            ],
        ))
    }

    /// Header range: `Jun 11 - Jul 19`, or `Dec 2026 - Jan 2027` across years
    pub fn date_range(&self, first: NaiveDate, last: NaiveDate) -> Result<String, LocaleError> {
        let end = |date: NaiveDate| -> Result<String, LocaleError> {
            if first.year() == last.year() {
                Ok(fill(
                    self.get("page.format.month-day")?,
                    &[
                        ("month", self.month_short(date.month())?),
                        ("day", date.day().to_string().as_str()),
                    ],
                ))
            } else {
                Ok(fill(
                    self.get("page.format.month-year")?,
                    &[
                        ("month", self.month_short(date.month())?),
                        ("year", date.year().to_string().as_str()),
                    ],
                ))
            }
        };
        Ok(fill(
            self.get("page.format.date-range")?,
            &[("start", end(first)?.as_str()), ("end", end(last)?.as_str())],
        ))
    }
}
