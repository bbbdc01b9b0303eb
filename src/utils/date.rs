use chrono::{DateTime, Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local time as stored in the database.
pub fn now_stamp(now: &DateTime<Local>) -> String {
    now.to_rfc3339()
}

/// Whole seconds from the stored timestamp `since` to `now`.
pub fn seconds_since(since: &str, now: &DateTime<Local>) -> Option<i64> {
    let then = DateTime::parse_from_rfc3339(since).ok()?;
    Some((*now - then.with_timezone(&Local)).num_seconds())
}

/// `Saturday, 18 October 2025` style heading.
pub fn long_date(d: &NaiveDate) -> String {
    d.format("%A, %-d %B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn seconds_since_local_stamp() {
        let t0 = Local.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap();
        let t1 = Local.with_ymd_and_hms(2025, 9, 1, 8, 0, 7).unwrap();
        assert_eq!(seconds_since(&now_stamp(&t0), &t1), Some(7));
        assert_eq!(seconds_since("nonsense", &t1), None);
    }
}
