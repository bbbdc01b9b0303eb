use crate::db::{conversion_error, is_unique_violation};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceRecord, AttendanceRow};
use crate::models::program::Program;
use crate::models::session::Session;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn parse_session(idx: usize, raw: String) -> rusqlite::Result<Session> {
    Session::from_db_str(&raw).ok_or_else(|| conversion_error(idx, AppError::InvalidSession(raw)))
}

fn map_record(row: &Row) -> rusqlite::Result<AttendanceRecord> {
    Ok(AttendanceRecord {
        id: row.get("id")?,
        event_id: row.get("event_id")?,
        member_id: row.get("member_id")?,
        session: parse_session(3, row.get("session")?)?,
        time_in: row.get("time_in")?,
        time_out: row.get("time_out")?,
    })
}

fn map_joined(row: &Row) -> rusqlite::Result<AttendanceRow> {
    let program_str: String = row.get("program")?;
    let program = Program::from_db_str(&program_str)
        .ok_or_else(|| conversion_error(4, AppError::InvalidProgram(program_str.clone())))?;

    Ok(AttendanceRow {
        id: row.get("id")?,
        event_id: row.get("event_id")?,
        school_id: row.get("school_id")?,
        name: row.get("name")?,
        program,
        block: row.get("block")?,
        session: parse_session(6, row.get("session")?)?,
        time_in: row.get("time_in")?,
        time_out: row.get("time_out")?,
    })
}

/// The record for one (member, event, session) triple, if any.
pub fn find_record(
    conn: &Connection,
    member_id: i64,
    event_id: i64,
    session: Session,
) -> AppResult<Option<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, event_id, member_id, session, time_in, time_out
         FROM attendance
         WHERE member_id = ?1 AND event_id = ?2 AND session = ?3",
    )?;

    Ok(stmt
        .query_row(params![member_id, event_id, session.to_db_str()], map_record)
        .optional()?)
}

/// Open a record. Returns `None` when the (member, event, session) triple
/// already has one, e.g. written by another scanning station.
pub fn insert_time_in(
    conn: &Connection,
    member_id: i64,
    event_id: i64,
    session: Session,
    time_in: &str,
) -> AppResult<Option<i64>> {
    match conn.execute(
        "INSERT INTO attendance (event_id, member_id, session, time_in)
         VALUES (?1, ?2, ?3, ?4)",
        params![event_id, member_id, session.to_db_str(), time_in],
    ) {
        Ok(_) => Ok(Some(conn.last_insert_rowid())),
        Err(e) if is_unique_violation(&e) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Close an open record. Returns false when the record was already closed.
pub fn set_time_out(conn: &Connection, id: i64, time_out: &str) -> AppResult<bool> {
    let n = conn.execute(
        "UPDATE attendance SET time_out = ?1 WHERE id = ?2 AND time_out IS NULL",
        params![time_out, id],
    )?;
    Ok(n > 0)
}

/// Attendance of one event joined with members, latest check-in first.
pub fn load_event_rows(
    conn: &Connection,
    event_id: i64,
    session: Option<Session>,
) -> AppResult<Vec<AttendanceRow>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.event_id, m.school_id, m.name, m.program, m.block,
                a.session, a.time_in, a.time_out
         FROM attendance a
         JOIN members m ON m.id = a.member_id
         WHERE a.event_id = ?1 AND (?2 IS NULL OR a.session = ?2)
         ORDER BY a.time_in DESC, a.id DESC",
    )?;

    let rows = stmt.query_map(
        params![event_id, session.map(|s| s.to_db_str())],
        map_joined,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_attendance(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM attendance", [], |r| r.get(0))?)
}

/// Check-ins whose local calendar date is `date`.
pub fn count_time_ins_on(conn: &Connection, date: &NaiveDate) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM attendance WHERE substr(time_in, 1, 10) = ?1",
        [date.format("%Y-%m-%d").to_string()],
        |r| r.get(0),
    )?)
}
