use crate::core::events::EventLogic;
use crate::core::report::{summarize_by_block, summarize_by_program};
use crate::db::attendance::load_event_rows;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::AttendanceExport;
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::models::attendance::AttendanceRow;
use crate::models::event::Event;
use crate::ui::messages::warning;
use rusqlite::Connection;
use std::path::Path;

/// Which attendance goes into the file.
#[derive(Debug, Clone)]
pub enum ExportSelection {
    /// One event; `None` means the most recent one.
    Event(Option<i64>),
    /// Every event dated inside a `--range` expression.
    Range(String),
}

impl ExportSelection {
    fn title(&self, events: &[Event]) -> String {
        match (self, events) {
            (ExportSelection::Event(_), [ev]) => format!("Attendance - {}", ev.label()),
            (ExportSelection::Range(r), _) => format!("Attendance for {}", r),
            _ => "Attendance".to_string(),
        }
    }

    fn sheet_name(&self, events: &[Event]) -> String {
        match (self, events) {
            (ExportSelection::Event(_), [ev]) => ev.name.clone(),
            (ExportSelection::Range(r), _) => r.clone(),
            _ => "Attendance".to_string(),
        }
    }
}

pub struct ExportLogic;

impl ExportLogic {
    /// Write the selected attendance to `file` (absolute path).
    /// Returns the number of records written; zero means no file was created.
    pub fn export(
        conn: &Connection,
        format: ExportFormat,
        file: &str,
        selection: &ExportSelection,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let mut events = match selection {
            ExportSelection::Event(id) => vec![EventLogic::resolve(conn, *id)?],
            ExportSelection::Range(r) => EventLogic::list(conn, Some(r))?,
        };
        // oldest event first in the file
        events.reverse();

        let (records, rows) = collect(conn, &events)?;

        if records.is_empty() {
            warning("No attendance records found for the selected events.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&records, path)?,
            ExportFormat::Json => export_json(&records, path)?,
            ExportFormat::Xlsx => export_xlsx(&records, path, &selection.sheet_name(&events))?,
            ExportFormat::Pdf => export_pdf(
                &records,
                path,
                &selection.title(&events),
                &summarize_by_program(&rows),
                &summarize_by_block(&rows),
            )?,
        }

        ttlog(
            conn,
            "export",
            file,
            &format!("{} record(s) as {}", records.len(), format.as_str()),
        )?;

        Ok(records.len())
    }
}

/// Flattened records plus the joined rows they came from, check-in order.
fn collect(conn: &Connection, events: &[Event]) -> AppResult<(Vec<AttendanceExport>, Vec<AttendanceRow>)> {
    let mut records = Vec::new();
    let mut all_rows = Vec::new();

    for ev in events {
        let mut rows = load_event_rows(conn, ev.id, None)?;
        rows.reverse();
        records.extend(rows.iter().map(|r| AttendanceExport::from_row(ev, r)));
        all_rows.extend(rows);
    }

    Ok((records, all_rows))
}
