//! Timestamp parsing and rendering for the `created_at` column.

use time::format_description::well_known::Rfc3339;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// `Wed Jun 30 12:34:56 +0000 2021`
const TWITTER: &[FormatItem<'static>] = format_description!(
    "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute] [year]"
);

/// `2021-06-30 12:34:56+00:00`, the form timestamps are exported in.
const RENDERED: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
);

const NAIVE_SPACE: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const NAIVE_T: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const DATE_ONLY: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse any of the accepted timestamp shapes. Naive values are taken as UTC;
/// a bare date is UTC midnight.
pub fn parse_timestamp(s: &str) -> Option<OffsetDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = OffsetDateTime::parse(s, TWITTER) {
        return Some(dt);
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(dt);
    }
    if let Ok(dt) = OffsetDateTime::parse(s, RENDERED) {
        return Some(dt);
    }
    for fmt in [NAIVE_SPACE, NAIVE_T] {
        if let Ok(dt) = PrimitiveDateTime::parse(s, fmt) {
            return Some(dt.assume_utc());
        }
    }
    Date::parse(s, DATE_ONLY).ok().map(|d| d.midnight().assume_utc())
}

pub fn render_timestamp(dt: &OffsetDateTime) -> String {
    dt.format(RENDERED).unwrap_or_else(|_| dt.to_string())
}

/// Parse a `YYYY-MM-DD` cutoff date.
pub fn parse_date(s: &str) -> Result<Date, String> {
    Date::parse(s.trim(), DATE_ONLY).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// The first instant (UTC) that passes a cutoff of `d`.
pub fn cutoff_instant(d: Date) -> OffsetDateTime {
    d.midnight().assume_utc()
}
