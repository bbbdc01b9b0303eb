use crate::db::{conversion_error, is_unique_violation};
use crate::errors::{AppError, AppResult};
use crate::models::member::{Member, NewMember};
use crate::models::program::Program;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str = "id, school_id, name, program, block, year_level, created_at";

pub fn map_row(row: &Row) -> rusqlite::Result<Member> {
    let program_str: String = row.get("program")?;
    let program = Program::from_db_str(&program_str)
        .ok_or_else(|| conversion_error(3, AppError::InvalidProgram(program_str.clone())))?;

    Ok(Member {
        id: row.get("id")?,
        school_id: row.get("school_id")?,
        name: row.get("name")?,
        program,
        block: row.get("block")?,
        year_level: row.get("year_level")?,
        created_at: row.get("created_at")?,
    })
}

/// Whole roster ordered by name.
pub fn load_members(conn: &Connection) -> AppResult<Vec<Member>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM members ORDER BY name COLLATE NOCASE ASC, id ASC"
    ))?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Option<Member>> {
    let mut stmt = conn.prepare_cached(&format!("SELECT {COLUMNS} FROM members WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn find_by_school_id(conn: &Connection, school_id: &str) -> AppResult<Option<Member>> {
    let mut stmt =
        conn.prepare_cached(&format!("SELECT {COLUMNS} FROM members WHERE school_id = ?1"))?;
    Ok(stmt.query_row([school_id], map_row).optional()?)
}

pub fn insert_member(conn: &Connection, m: &NewMember) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO members (school_id, name, program, block, year_level, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            m.school_id,
            m.name,
            m.program.to_db_str(),
            m.block,
            m.year_level,
            Local::now().to_rfc3339(),
        ],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(AppError::DuplicateSchoolId),
        Err(e) => Err(e.into()),
    }
}

/// Update every editable field of a member. Returns false when no row matched.
pub fn update_member(conn: &Connection, id: i64, m: &NewMember) -> AppResult<bool> {
    let res = conn.execute(
        "UPDATE members
         SET school_id = ?1, name = ?2, program = ?3, block = ?4, year_level = ?5
         WHERE id = ?6",
        params![
            m.school_id,
            m.name,
            m.program.to_db_str(),
            m.block,
            m.year_level,
            id
        ],
    );

    match res {
        Ok(n) => Ok(n > 0),
        Err(e) if is_unique_violation(&e) => Err(AppError::DuplicateSchoolId),
        Err(e) => Err(e.into()),
    }
}

pub fn set_year_level(conn: &Connection, id: i64, year_level: u8) -> AppResult<()> {
    conn.execute(
        "UPDATE members SET year_level = ?1 WHERE id = ?2",
        params![year_level, id],
    )?;
    Ok(())
}

/// Delete a member (and, by cascade, their attendance). Returns false when no row matched.
pub fn delete_member(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM members WHERE id = ?1", [id])?;
    Ok(n > 0)
}

pub fn count_members(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM members", [], |r| r.get(0))?)
}
