use crate::models::attendance::{AttendanceRow, duration_minutes};
use crate::models::event::Event;
use crate::models::member::block_label;
use crate::utils::mins2readable;
use chrono::{DateTime, Local};
use serde::Serialize;

/// One attendance record flattened for export.
#[derive(Serialize, Clone, Debug)]
pub struct AttendanceExport {
    pub event: String,
    pub event_date: String,
    pub school_id: String,
    pub name: String,
    pub program: String,
    pub block: String,
    pub session: String,
    pub time_in: String,
    pub time_out: String,
    pub duration: String,
}

fn local_stamp(ts: &str) -> String {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| ts.to_string())
}

impl AttendanceExport {
    pub fn from_row(event: &Event, r: &AttendanceRow) -> Self {
        Self {
            event: event.name.clone(),
            event_date: event.date_str(),
            school_id: r.school_id.clone(),
            name: r.name.clone(),
            program: r.program.code().to_string(),
            block: block_label(r.block),
            session: r.session.to_string(),
            time_in: local_stamp(&r.time_in),
            time_out: r.time_out.as_deref().map(local_stamp).unwrap_or_default(),
            duration: duration_minutes(&r.time_in, r.time_out.as_deref())
                .map(mins2readable)
                .unwrap_or_default(),
        }
    }
}

/// Header for CSV / XLSX / PDF, in field order.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "event",
        "event_date",
        "school_id",
        "name",
        "program",
        "block",
        "session",
        "time_in",
        "time_out",
        "duration",
    ]
}

/// Columns whose values are always written as text.
pub(crate) fn is_text_column(header: &str) -> bool {
    header != "block"
}

pub(crate) fn record_to_row(e: &AttendanceExport) -> Vec<String> {
    vec![
        e.event.clone(),
        e.event_date.clone(),
        e.school_id.clone(),
        e.name.clone(),
        e.program.clone(),
        e.block.clone(),
        e.session.clone(),
        e.time_in.clone(),
        e.time_out.clone(),
        e.duration.clone(),
    ]
}

pub(crate) fn records_to_table(records: &[AttendanceExport]) -> Vec<Vec<String>> {
    records.iter().map(record_to_row).collect()
}
