use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::{pad_right, truncate};
use ansi_term::Colour;

const OP_MAX: usize = 60;

/// ANSI color for an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "member_add" | "event_add" | "time_in" | "member_import" => Colour::Green,
        "member_del" | "event_del" => Colour::Red,
        "member_edit" | "event_edit" | "time_out" | "year_recalc" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "signup" | "signin" | "signout" => Colour::Cyan,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rows: Vec<(i64, String, String, String, String)> = entries
            .into_iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(e.date);
                let op_target = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };
                (e.id, date, e.operation, truncate(&op_target, OP_MAX), e.message)
            })
            .collect();

        let id_w = rows.iter().map(|r| r.0.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.1.len()).max().unwrap_or(10);
        let op_w = rows
            .iter()
            .map(|r| unicode_width::UnicodeWidthStr::width(r.3.as_str()))
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (id, date, operation, op_target, message) in rows {
            let color = color_for_operation(&operation);
            let padded = pad_right(&op_target, op_w);

            // only the operation word is colored
            let shown = match padded.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(padded.as_str()).to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {} => {}",
                id,
                date,
                shown,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
