use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, records_to_table};
use crate::export::pdf::PdfManager;
use crate::export::{AttendanceExport, notify_export_success};
use crate::ui::messages::info;
use std::path::Path;

/// Attendance table followed by the program and block charts.
pub(crate) fn export_pdf(
    records: &[AttendanceExport],
    path: &Path,
    title: &str,
    by_program: &[(String, usize)],
    by_block: &[(String, usize)],
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let data_vec = records_to_table(records);

    let mut pdf = PdfManager::new();
    pdf.write_table(title, &headers, &data_vec);
    pdf.write_bar_charts(
        &format!("{} - summary", title),
        &[("Attendance by program", by_program), ("Attendance by block", by_block)],
    );

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
