use crate::db::is_unique_violation;
use crate::errors::{AppError, AppResult};
use crate::models::officer::Officer;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Officer> {
    Ok(Officer {
        id: row.get("id")?,
        email: row.get("email")?,
        full_name: row.get("full_name")?,
        password_hash: row.get("password_hash")?,
        salt: row.get("salt")?,
        iterations: row.get("iterations")?,
        created_at: row.get("created_at")?,
    })
}

pub struct NewOfficer<'a> {
    pub email: &'a str,
    pub full_name: &'a str,
    pub password_hash: &'a str,
    pub salt: &'a str,
    pub iterations: u32,
}

pub fn insert_officer(conn: &Connection, o: &NewOfficer<'_>) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO officers (email, full_name, password_hash, salt, iterations, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            o.email,
            o.full_name,
            o.password_hash,
            o.salt,
            o.iterations,
            Local::now().to_rfc3339()
        ],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(AppError::DuplicateOfficer(o.email.to_string())),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_email(conn: &Connection, email: &str) -> AppResult<Option<Officer>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, email, full_name, password_hash, salt, iterations, created_at
         FROM officers WHERE email = ?1",
    )?;
    Ok(stmt.query_row([email], map_row).optional()?)
}

/// Replace the active sign-in with `officer_id`.
pub fn set_active(conn: &Connection, officer_id: i64) -> AppResult<()> {
    conn.execute(
        "INSERT INTO active_session (id, officer_id, signed_in_at) VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET officer_id = excluded.officer_id,
                                       signed_in_at = excluded.signed_in_at",
        params![officer_id, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

/// Returns false when nobody was signed in.
pub fn clear_active(conn: &Connection) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM active_session", [])?;
    Ok(n > 0)
}

/// The signed-in officer and the sign-in time.
pub fn active_officer(conn: &Connection) -> AppResult<Option<(Officer, String)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT o.id, o.email, o.full_name, o.password_hash, o.salt, o.iterations,
                o.created_at, s.signed_in_at
         FROM active_session s
         JOIN officers o ON o.id = s.officer_id
         WHERE s.id = 1",
    )?;

    Ok(stmt
        .query_row([], |row| Ok((map_row(row)?, row.get("signed_in_at")?)))
        .optional()?)
}

pub fn count_officers(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM officers", [], |r| r.get(0))?)
}
