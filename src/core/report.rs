use crate::core::events::EventLogic;
use crate::db::attendance;
use crate::errors::AppResult;
use crate::models::attendance::AttendanceRow;
use crate::models::event::Event;
use crate::models::member::block_label;
use crate::models::program::Program;
use crate::models::session::Session;
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, GREY, RESET, colorize_in_out, colorize_optional};
use crate::utils::formatting::{bar, pad_left, pad_right, percent};
use crate::utils::table::{Column, Table};
use rusqlite::Connection;
use std::collections::BTreeMap;

const BAR_WIDTH: usize = 30;

/// Attendance of one event with its per-program and per-block breakdown.
#[derive(Debug)]
pub struct EventReport {
    pub event: Event,
    pub session: Option<Session>,
    pub rows: Vec<AttendanceRow>,
    pub by_program: Vec<(String, usize)>,
    pub by_block: Vec<(String, usize)>,
}

impl EventReport {
    pub fn total(&self) -> usize {
        self.rows.len()
    }
}

/// Count rows per program, in catalogue order, skipping programs with no one present.
pub fn summarize_by_program(rows: &[AttendanceRow]) -> Vec<(String, usize)> {
    Program::ALL
        .iter()
        .map(|p| (p.code().to_string(), rows.iter().filter(|r| r.program == *p).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

/// Count rows per block; unassigned members come last.
pub fn summarize_by_block(rows: &[AttendanceRow]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<Option<u8>, usize> = BTreeMap::new();
    for r in rows {
        *counts.entry(r.block).or_default() += 1;
    }

    let mut out: Vec<(String, usize)> = counts
        .iter()
        .filter_map(|(b, n)| b.map(|b| (format!("Block {}", b), *n)))
        .collect();
    if let Some(n) = counts.get(&None) {
        out.push(("Unassigned".to_string(), *n));
    }
    out
}

/// Horizontal bar chart, one line per entry.
pub fn render_bars(entries: &[(String, usize)]) -> String {
    let max = entries.iter().map(|(_, n)| *n).max().unwrap_or(0);
    let total: usize = entries.iter().map(|(_, n)| *n).sum();
    let label_w = entries
        .iter()
        .map(|(l, _)| unicode_width::UnicodeWidthStr::width(l.as_str()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (label, n) in entries {
        out.push_str(&format!(
            "  {} {}{}{} {} ({}%)\n",
            pad_right(label, label_w),
            CYAN,
            pad_right(&bar(*n, max, BAR_WIDTH), BAR_WIDTH),
            RESET,
            pad_left(&n.to_string(), 4),
            percent(*n, total)
        ));
    }
    out
}

pub struct ReportLogic;

impl ReportLogic {
    pub fn build(conn: &Connection, event_id: Option<i64>, session: Option<Session>) -> AppResult<EventReport> {
        let event = EventLogic::resolve(conn, event_id)?;
        let rows = attendance::load_event_rows(conn, event.id, session)?;

        Ok(EventReport {
            by_program: summarize_by_program(&rows),
            by_block: summarize_by_block(&rows),
            event,
            session,
            rows,
        })
    }

    pub fn print(report: &EventReport, separator: &str) {
        let scope = match report.session {
            Some(s) => format!(" ({} session)", s),
            None => String::new(),
        };
        header(format!("📋 {}{}", report.event.label(), scope));

        if !report.event.description.is_empty() {
            println!("{GREY}{}{RESET}", report.event.description);
        }
        println!("{} total attendees\n", report.total());

        if report.rows.is_empty() {
            info("No attendance records for this event yet.");
            return;
        }

        let mut table = Table::new(vec![
            Column::new("School ID", 14),
            Column::new("Name", 28),
            Column::new("Program", 10),
            Column::new("Block", 5),
            Column::new("Session", 9),
            Column::new("Time In", 8),
            Column::new("Time Out", 8),
            Column::new("Duration", 8),
        ])
        .with_separator(separator);
        for r in &report.rows {
            table.add_row(vec![
                r.school_id.clone(),
                r.name.clone(),
                r.program.code().to_string(),
                block_label(r.block),
                r.session.to_string(),
                r.time_in_label(),
                r.time_out_label(),
                r.duration_label(),
            ]);
        }

        print!(
            "{}",
            table.render_styled(|col, cell| match col {
                5 => colorize_in_out(cell, true),
                6 => colorize_in_out(cell, false),
                7 => colorize_optional(cell),
                _ => cell.to_string(),
            })
        );

        println!("\nBy program:");
        print!("{}", render_bars(&report.by_program));
        println!("\nBy block:");
        print!("{}", render_bars(&report.by_block));

        let open = report.rows.iter().filter(|r| r.time_out.is_none()).count();
        if open > 0 {
            println!("\n{}{} record(s) still without a time-out{}", GREY, open, RESET);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(program: Program, block: Option<u8>) -> AttendanceRow {
        AttendanceRow {
            id: 1,
            event_id: 1,
            school_id: "25-1".into(),
            name: "Ana Cruz".into(),
            program,
            block,
            session: Session::Morning,
            time_in: "2025-09-02T08:00:00+08:00".into(),
            time_out: None,
        }
    }

    #[test]
    fn program_summary_follows_catalogue_order() {
        let rows = vec![
            row(Program::Bsit, Some(1)),
            row(Program::Bscs, Some(2)),
            row(Program::Bsit, None),
        ];
        assert_eq!(
            summarize_by_program(&rows),
            vec![("BSCS".to_string(), 1), ("BSIT".to_string(), 2)]
        );
        assert_eq!(
            summarize_by_block(&rows),
            vec![
                ("Block 1".to_string(), 1),
                ("Block 2".to_string(), 1),
                ("Unassigned".to_string(), 1)
            ]
        );
    }

    #[test]
    fn bars_include_share() {
        let out = render_bars(&[("BSCS".into(), 3), ("BSIT".into(), 1)]);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("(75%)"));
        assert!(lines[1].contains("(25%)"));
        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH);
    }
}
