//! HTTP-date rendering and lenient parsing.
//!
//! `Expires` is always rendered as an IMF-fixdate. `Last-Modified` defaults to
//! [`LastModifiedFormat::Legacy`], which puts a comma between the date and the
//! time (`Sun, 06 Nov 1994, 08:49:37 GMT`). Older deployments rendered the
//! same layout with an ordinal day (`Sun, 6th Nov 1994, 08:49:37 GMT`), and
//! clients echo either value back in `If-Modified-Since`. The parser accepts
//! both next to the three formats HTTP recipients must understand.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// `Sun, 06 Nov 1994 08:49:37 GMT`
pub const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// `Sun, 06 Nov 1994, 08:49:37 GMT`
pub const LEGACY_DATE: &str = "%a, %d %b %Y, %H:%M:%S GMT";

/// `Sunday, 06-Nov-94 08:49:37 GMT`
const RFC_850: &str = "%A, %d-%b-%y %H:%M:%S GMT";

/// `Sun Nov  6 08:49:37 1994`
const ASCTIME: &str = "%a %b %e %H:%M:%S %Y";

/// Rendering used for the `Last-Modified` header.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Default)]
pub enum LastModifiedFormat {
    /// Comma between date and time, zero-padded day.
    #[default]
    Legacy,
    /// Strict IMF-fixdate.
    HttpDate,
}

impl LastModifiedFormat {
    pub fn format(&self, timestamp: DateTime<Utc>) -> String {
        match self {
            Self::Legacy => timestamp.format(LEGACY_DATE).to_string(),
            Self::HttpDate => format_http_date(timestamp),
        }
    }
}

/// Render a timestamp as an IMF-fixdate with second precision.
pub fn format_http_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format(IMF_FIXDATE).to_string()
}

/// Parse any accepted HTTP-date form. Returns `None` for anything else.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    [LEGACY_DATE, IMF_FIXDATE, RFC_850, ASCTIME]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            let cardinal = strip_day_ordinal(value)?;
            NaiveDateTime::parse_from_str(&cardinal, LEGACY_DATE).ok()
        })
        .map(|naive| naive.and_utc())
}

/// `Sun, 18th Oct 2026, ...` -> `Sun, 18 Oct 2026, ...`
fn strip_day_ordinal(value: &str) -> Option<String> {
    let (weekday, rest) = value.split_once(", ")?;
    let (day, rest) = rest.split_once(' ')?;
    let digits = day.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &day[digits.len()..];

    if digits.is_empty()
        || !digits.bytes().all(|b| b.is_ascii_digit())
        || !matches!(suffix, "st" | "nd" | "rd" | "th")
    {
        return None;
    }
    Some(format!("{weekday}, {digits} {rest}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap()
    }

    #[test]
    fn renders_imf_fixdate() {
        assert_eq!(format_http_date(sample()), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn renders_legacy_last_modified() {
        assert_eq!(
            LastModifiedFormat::Legacy.format(sample()),
            "Sun, 06 Nov 1994, 08:49:37 GMT"
        );
        assert_eq!(
            LastModifiedFormat::HttpDate.format(sample()),
            "Sun, 06 Nov 1994 08:49:37 GMT"
        );
    }

    #[test]
    fn parses_every_accepted_form() {
        for value in [
            "Sun, 06 Nov 1994 08:49:37 GMT",
            "Sun, 06 Nov 1994, 08:49:37 GMT",
            "Sunday, 06-Nov-94 08:49:37 GMT",
            "Sun Nov  6 08:49:37 1994",
            "  Sun, 06 Nov 1994 08:49:37 GMT  ",
        ] {
            assert_eq!(parse_http_date(value), Some(sample()), "{value}");
        }
    }

    #[test]
    fn parses_ordinal_legacy_days() {
        let at = |day, hour| Some(Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap());

        assert_eq!(parse_http_date("Sun, 18th Oct 2026, 12:00:00 GMT"), at(18, 12));
        assert_eq!(parse_http_date("Wed, 21st Oct 2026, 08:00:00 GMT"), at(21, 8));
        assert_eq!(parse_http_date("Thu, 22nd Oct 2026, 08:00:00 GMT"), at(22, 8));
        assert_eq!(parse_http_date("Fri, 23rd Oct 2026, 08:00:00 GMT"), at(23, 8));
    }

    #[test]
    fn rejects_malformed_ordinals() {
        assert_eq!(parse_http_date("Sun, 18xx Oct 2026, 12:00:00 GMT"), None);
        assert_eq!(parse_http_date("Sun, th Oct 2026, 12:00:00 GMT"), None);
        assert_eq!(parse_http_date("Sun, 18th Oct 2026 12:00:00 GMT"), None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_http_date(""), None);
        assert_eq!(parse_http_date("yesterday"), None);
        assert_eq!(parse_http_date("Sun, 32 Nov 1994 08:49:37 GMT"), None);
    }

    #[test]
    fn rendering_drops_sub_second_precision() {
        let precise = sample() + chrono::Duration::milliseconds(750);
        let rendered = LastModifiedFormat::Legacy.format(precise);
        assert_eq!(parse_http_date(&rendered), Some(sample()));
    }
}
