use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

fn invalid(r: &str, why: &str) -> AppError {
    AppError::InvalidDate(format!("{} ({})", r, why))
}

/// First and last day of one `YYYY`, `YYYY-MM` or `YYYY-MM-DD` period.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid(p, "invalid year"))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid(p, "invalid year"))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid(p, "invalid year"))?;
            Ok((d1, d2))
        }
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{}-01", p), "%Y-%m-%d")
                .map_err(|_| invalid(p, "invalid month"))?;
            let last = month_last_day(d1).ok_or_else(|| invalid(p, "invalid month"))?;
            Ok((d1, last))
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid(p, "invalid date"))?;
            Ok((d, d))
        }
        _ => Err(invalid(p, "use YYYY, YYYY-MM or YYYY-MM-DD")),
    }
}

/// Parse a `--range` expression into inclusive bounds.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or two of the same form joined
/// by `:` (e.g. `2025-08:2025-10`).
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let Some((start_raw, end_raw)) = r.split_once(':') else {
        return period_bounds(r);
    };

    let start = start_raw.trim();
    let end = end_raw.trim();
    if start.len() != end.len() {
        return Err(invalid(r, "start and end must have the same format"));
    }

    let (d1, _) = period_bounds(start)?;
    let (_, d2) = period_bounds(end)?;
    if d2 < d1 {
        return Err(invalid(r, "end is before start"));
    }
    Ok((d1, d2))
}

fn month_last_day(first: NaiveDate) -> Option<NaiveDate> {
    let next = first.checked_add_months(chrono::Months::new(1))?;
    next.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_periods() {
        assert_eq!(parse_range("2025").unwrap(), (d(2025, 1, 1), d(2025, 12, 31)));
        assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(parse_range("2025-09-02").unwrap(), (d(2025, 9, 2), d(2025, 9, 2)));
    }

    #[test]
    fn intervals() {
        assert_eq!(
            parse_range("2025-08:2025-10").unwrap(),
            (d(2025, 8, 1), d(2025, 10, 31))
        );
        assert!(parse_range("2025:2025-10").is_err());
        assert!(parse_range("2025-10:2025-08").is_err());
        assert!(parse_range("2025-13").is_err());
    }
}
