use super::program::Program;
use super::session::Session;
use crate::utils::formatting::mins2readable;
use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub event_id: i64,
    pub member_id: i64,
    pub session: Session,
    pub time_in: String,          // ⇔ attendance.time_in (RFC 3339)
    pub time_out: Option<String>, // ⇔ attendance.time_out (NULL while open)
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.time_out.is_none()
    }
}

/// An attendance record joined with the member it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRow {
    pub id: i64,
    pub event_id: i64,
    pub school_id: String,
    pub name: String,
    pub program: Program,
    pub block: Option<u8>,
    pub session: Session,
    pub time_in: String,
    pub time_out: Option<String>,
}

impl AttendanceRow {
    /// Wall-clock time of the check-in, local time.
    pub fn time_in_label(&self) -> String {
        format_clock(Some(&self.time_in))
    }

    pub fn time_out_label(&self) -> String {
        format_clock(self.time_out.as_deref())
    }

    /// `1h 05m`, or `-` while the record is still open.
    pub fn duration_label(&self) -> String {
        duration_minutes(&self.time_in, self.time_out.as_deref())
            .map(mins2readable)
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Whole minutes between time-in and time-out, floored.
pub fn duration_minutes(time_in: &str, time_out: Option<&str>) -> Option<i64> {
    let tin = DateTime::parse_from_rfc3339(time_in).ok()?;
    let tout = DateTime::parse_from_rfc3339(time_out?).ok()?;
    Some((tout - tin).num_minutes().max(0))
}

fn format_clock(ts: Option<&str>) -> String {
    ts.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}
