//! Per-table freshness: has data landed since the trigger last fired?

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};

/// True when the table was imported after the trigger's last run, i.e. the
/// import is still pending for the flow.
///
/// A trigger that never ran expects every imported table; a table that was
/// never imported is never expected. Timestamps that cannot be parsed are
/// compared as raw strings.
pub fn is_expected(last_run: Option<&str>, last_import: Option<&str>) -> bool {
    let Some(last_import) = last_import else {
        return false;
    };
    let Some(last_run) = last_run else {
        return true;
    };
    match (parse_timestamp(last_run), parse_timestamp(last_import)) {
        (Some(run), Some(import)) => run < import,
        _ => last_run < last_import,
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%z"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN).and_utc().into())
        })
}
