//! Timezone abbreviations and the poster's timezone header

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::{OffsetComponents, Tz};
use tracing::warn;

use super::LocaleError;

/// IANA name -> (standard, daylight) abbreviation
const ABBREVIATIONS: &[(&str, &str, &str)] = &[
    ("Pacific/Auckland", "NZST", "NZDT"),
    ("Pacific/Fiji", "FJT", "FJST"),
    ("Pacific/Honolulu", "HST", "HDT"),
    ("Asia/Tehran", "IRST", "IRDT"),
    ("Asia/Dubai", "GST", "GST"),
    ("Asia/Shanghai", "CST", "CST"),
    ("Asia/Tokyo", "JST", "JST"),
    ("Asia/Kolkata", "IST", "IST"),
    ("America/New_York", "EST", "EDT"),
    ("America/Chicago", "CST", "CDT"),
    ("America/Denver", "MST", "MDT"),
    ("America/Los_Angeles", "PST", "PDT"),
    ("America/Sao_Paulo", "BRT", "BRST"),
    ("US/Eastern", "EST", "EDT"),
    ("US/Central", "CST", "CDT"),
    ("US/Mountain", "MST", "MDT"),
    ("US/Pacific", "PST", "PDT"),
    ("Europe/London", "GMT", "BST"),
    ("Europe/Paris", "CET", "CEST"),
    ("Europe/Athens", "EET", "EEST"),
    ("Europe/Moscow", "MSK", "MSK"),
    ("Africa/Cairo", "EET", "EEST"),
    ("Africa/Johannesburg", "SAST", "SAST"),
    ("Australia/Sydney", "AEST", "AEDT"),
    ("Australia/Perth", "AWST", "AWST"),
];

/// Look up an IANA timezone by name
pub fn parse_tz(name: &str) -> Result<Tz, LocaleError> {
    name.parse::<Tz>().map_err(|_| LocaleError::UnknownTimezone {
        name: name.to_string(),
    })
}

/// Abbreviation in effect at `at`, e.g. `PDT` or `IRST`
///
/// Zones missing from the table use the tz database abbreviation, which for
/// many zones is only a numeric offset such as `+0330`.
pub fn tz_abbreviation(tz: Tz, at: DateTime<Utc>) -> String {
    let local = at.with_timezone(&tz);
    if let Some((_, standard, daylight)) = ABBREVIATIONS.iter().find(|(n, _, _)| *n == tz.name())
    {
        let is_dst = local.offset().dst_offset().num_seconds() > 0;
        return if is_dst { daylight } else { standard }.to_string();
    }

    let abbreviation = local.format("%Z").to_string();
    if abbreviation.chars().any(|c| c.is_ascii_digit()) {
        warn!(timezone = tz.name(), abbreviation = %abbreviation, "no abbreviation for timezone");
    }
    abbreviation
}

/// Header text for the timezone: `PDT (UTC-7)`, `IRST (UTC+3:30)`, `UTC+0330`
///
/// Zero offsets print the abbreviation alone.
pub fn tz_header(tz: Tz, at: DateTime<Utc>) -> String {
    let abbreviation = tz_abbreviation(tz, at);
    if abbreviation.starts_with('+') || abbreviation.starts_with('-') {
        return format!("UTC{}", abbreviation);
    }

    let seconds = tz.offset_from_utc_datetime(&at.naive_utc()).fix().local_minus_utc();
    if seconds == 0 {
        return abbreviation;
    }

    let hours = seconds / 3600;
    let minutes = (seconds.abs() % 3600) / 60;
    if minutes == 0 {
        format!("{} (UTC{:+})", abbreviation, hours)
    } else {
        let sign = if seconds < 0 { '-' } else { '+' };
        format!("{} (UTC{}{}:{:02})", abbreviation, sign, hours.abs(), minutes)
    }
}
