use std::fmt::Write;
use time::{Date, PrimitiveDateTime, Time, UtcOffset};

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {{
        let query: &str = &$query;
        let end = query
            .char_indices()
            .nth(497)
            .map(|(i, _)| i)
            .unwrap_or(query.len());
        format!(
            "{}{}",
            query[..end].trim_end(),
            if end < query.len() { "..." } else { "" },
        )
    }};
}

/// Writes `yyyy-MM-dd`.
pub fn write_date(out: &mut String, value: &Date) {
    let _ = write!(
        out,
        "{:04}-{:02}-{:02}",
        value.year(),
        value.month() as u8,
        value.day()
    );
}

/// Writes `HH:mm:ss`, the sub second part is dropped.
pub fn write_time(out: &mut String, value: &Time) {
    let _ = write!(
        out,
        "{:02}:{:02}:{:02}",
        value.hour(),
        value.minute(),
        value.second()
    );
}

/// Writes `.f` with trailing zeros trimmed but at least one digit.
pub fn write_fraction(out: &mut String, nanosecond: u32) {
    let mut subsecond = nanosecond;
    let mut width = 9;
    while width > 1 && subsecond % 10 == 0 {
        subsecond /= 10;
        width -= 1;
    }
    let _ = write!(out, ".{:0width$}", subsecond);
}

/// Writes `yyyy-MM-dd HH:mm:ss.f`, the canonical timestamp string form.
pub fn write_timestamp(out: &mut String, value: &PrimitiveDateTime) {
    write_date(out, &value.date());
    out.push(' ');
    write_time(out, &value.time());
    write_fraction(out, value.nanosecond());
}

/// Writes `+HH:MM`.
pub fn write_offset(out: &mut String, value: &UtcOffset) {
    let (hours, minutes, _) = value.as_hms();
    let sign = if value.is_negative() { '-' } else { '+' };
    let _ = write!(out, "{}{:02}:{:02}", sign, hours.abs(), minutes.abs());
}
