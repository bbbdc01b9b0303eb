use chrono::{NaiveDate, NaiveDateTime};

/// Interpret a cell as a date or timestamp, returning the Excel serial and
/// its number format.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    let dt_formats = [
        ("%Y-%m-%d %H:%M:%S", "yyyy-mm-dd hh:mm:ss"),
        ("%Y-%m-%dT%H:%M:%S", "yyyy-mm-dd hh:mm:ss"),
        ("%Y-%m-%d %H:%M", "yyyy-mm-dd hh:mm"),
    ];

    for (fmt, num_format) in dt_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some((num_format, naive_datetime_to_excel_serial(&dt)?));
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(("yyyy-mm-dd", naive_datetime_to_excel_serial(&d.and_hms_opt(0, 0, 0)?)?));
    }

    None
}

fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> Option<f64> {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;

    let duration = *dt - excel_epoch;

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    Some(days + secs / 86400.0)
}
