//! Parsing of the timestamp text stored in the source database.
//!
//! Accepted shapes: `YYYY-MM-DD HH:MM:SS[.ffffff]` or the same with a `T`
//! separator, optionally followed by `Z`, `+HH`, `+HHMM` or `+HH:MM`, and a
//! bare `YYYY-MM-DD` meaning midnight. Values without an offset are UTC.
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

const DATE_LEN: usize = 10;

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if raw.len() == DATE_LEN {
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| e.to_string())?;
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| format!("invalid date {raw}"))?;
        return Ok(Utc.from_utc_datetime(&midnight));
    }

    let (local, offset) = split_offset(raw)?;
    let local = local.replacen('T', " ", 1);
    let naive = NaiveDateTime::parse_from_str(&local, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&local, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(&local, "%Y-%m-%d %H:%M"))
        .map_err(|e| e.to_string())?;

    match offset {
        None => Ok(Utc.from_utc_datetime(&naive)),
        Some(offset) => offset
            .from_local_datetime(&naive)
            .single()
            .map(|at| at.with_timezone(&Utc))
            .ok_or_else(|| format!("ambiguous local time {raw}")),
    }
}

/// Splits `raw` into the local date-time part and its trailing UTC offset, if any.
fn split_offset(raw: &str) -> Result<(&str, Option<FixedOffset>), String> {
    if let Some(local) = raw.strip_suffix('Z') {
        return Ok((local, FixedOffset::east_opt(0)));
    }

    // The date part owns the first two '-' characters, so only look past it.
    let time_part = raw.get(DATE_LEN..).unwrap_or_default();
    let Some(position) = time_part.rfind(['+', '-']) else {
        return Ok((raw, None));
    };
    let split = DATE_LEN + position;
    let (local, offset) = raw.split_at(split);
    Ok((local, Some(parse_offset(offset)?)))
}

fn parse_offset(offset: &str) -> Result<FixedOffset, String> {
    let invalid = || format!("invalid UTC offset {offset:?}");

    let sign = match offset.chars().next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Err(invalid()),
    };
    let digits: String = offset[1..].chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let (hours, minutes) = match digits.len() {
        2 => (&digits[..2], "0"),
        4 => (&digits[..2], &digits[2..]),
        _ => return Err(invalid()),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
