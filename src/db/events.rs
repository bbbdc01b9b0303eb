use crate::db::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::event::{Event, NewEvent};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str = "id, name, description, event_date, created_by, created_at";

pub fn map_row(row: &Row) -> rusqlite::Result<Event> {
    let date_str: String = row.get("event_date")?;
    let event_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(3, AppError::InvalidDate(date_str.clone())))?;

    Ok(Event {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        event_date,
        created_by: row.get("created_by")?,
        created_at: row.get("created_at")?,
    })
}

/// All events, most recent date first. With `bounds`, only events whose
/// date falls inside the inclusive range.
pub fn load_events(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<Event>> {
    let mut events = Vec::new();

    match bounds {
        None => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM events ORDER BY event_date DESC, id DESC"
            ))?;
            let rows = stmt.query_map([], map_row)?;
            for r in rows {
                events.push(r?);
            }
        }
        Some((start, end)) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM events
                 WHERE event_date BETWEEN ?1 AND ?2
                 ORDER BY event_date DESC, id DESC"
            ))?;
            let rows = stmt.query_map(
                params![
                    start.format("%Y-%m-%d").to_string(),
                    end.format("%Y-%m-%d").to_string()
                ],
                map_row,
            )?;
            for r in rows {
                events.push(r?);
            }
        }
    }

    Ok(events)
}

pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Option<Event>> {
    let mut stmt = conn.prepare_cached(&format!("SELECT {COLUMNS} FROM events WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// The event with the latest date, if any.
pub fn most_recent(conn: &Connection) -> AppResult<Option<Event>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {COLUMNS} FROM events ORDER BY event_date DESC, id DESC LIMIT 1"
    ))?;
    Ok(stmt.query_row([], map_row).optional()?)
}

pub fn insert_event(conn: &Connection, ev: &NewEvent, created_by: Option<i64>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO events (name, description, event_date, created_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ev.name,
            ev.description,
            ev.event_date.format("%Y-%m-%d").to_string(),
            created_by,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_event(conn: &Connection, id: i64, ev: &NewEvent) -> AppResult<bool> {
    let n = conn.execute(
        "UPDATE events SET name = ?1, description = ?2, event_date = ?3 WHERE id = ?4",
        params![
            ev.name,
            ev.description,
            ev.event_date.format("%Y-%m-%d").to_string(),
            id
        ],
    )?;
    Ok(n > 0)
}

pub fn delete_event(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM events WHERE id = ?1", [id])?;
    Ok(n > 0)
}

pub fn count_events(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM events", [], |r| r.get(0))?)
}

pub fn count_events_on(conn: &Connection, date: &NaiveDate) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM events WHERE event_date = ?1",
        [date.format("%Y-%m-%d").to_string()],
        |r| r.get(0),
    )?)
}
