use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::models::session::Session;
use chrono::{DateTime, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, params};

const INITIAL_SCHEMA: &str = "20250901_0001_initial_schema";
const ATTENDANCE_SESSIONS: &str = "20250915_0002_attendance_sessions";

/// Ensure that the `log` table exists; applied migrations are recorded there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Officers, the active sign-in, the roster, events and attendance.
fn create_initial_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS officers (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            email         TEXT NOT NULL UNIQUE,
            full_name     TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            salt          TEXT NOT NULL,
            iterations    INTEGER NOT NULL,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS active_session (
            id           INTEGER PRIMARY KEY CHECK (id = 1),
            officer_id   INTEGER NOT NULL REFERENCES officers(id) ON DELETE CASCADE,
            signed_in_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS members (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            school_id   TEXT NOT NULL UNIQUE,
            name        TEXT NOT NULL,
            program     TEXT NOT NULL CHECK(program IN ('BSCS','BSIT','BSIS','BTVTED-CSS')),
            block       INTEGER CHECK(block BETWEEN 1 AND 5),
            year_level  INTEGER CHECK(year_level BETWEEN 1 AND 4),
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS events (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            event_date  TEXT NOT NULL,
            created_by  INTEGER REFERENCES officers(id) ON DELETE SET NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS attendance (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id   INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            member_id  INTEGER NOT NULL REFERENCES members(id) ON DELETE CASCADE,
            session    TEXT NOT NULL DEFAULT 'morning' CHECK(session IN ('morning','afternoon')),
            time_in    TEXT NOT NULL,
            time_out   TEXT,
            UNIQUE(member_id, event_id, session)
        );

        CREATE INDEX IF NOT EXISTS idx_members_name ON members(name);
        CREATE INDEX IF NOT EXISTS idx_events_date ON events(event_date);
        CREATE INDEX IF NOT EXISTS idx_attendance_event ON attendance(event_id, time_in);
        "#,
    )?;
    Ok(())
}

/// Session of a legacy row: the wall-clock time of its check-in, as
/// recorded, against the default noon cutoff.
fn legacy_session(time_in: &str) -> Session {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    DateTime::parse_from_rfc3339(time_in)
        .map(|t| Session::for_time(t.time(), noon))
        .unwrap_or(Session::Morning)
}

/// Rebuild a pre-session `attendance` table. Each row gets the session of
/// its check-in; rows still colliding on (member, event, session) are
/// dropped and counted.
fn add_session_to_attendance(conn: &Connection) -> AppResult<()> {
    if !table_exists(conn, "attendance")? || has_column(conn, "attendance", "session")? {
        return Ok(());
    }

    warning("Attendance table without sessions detected: creating safety backup...");

    let db_path: String = conn
        .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default();

    if db_path.is_empty() {
        warning("Could not determine DB path: backup skipped.");
    } else {
        backup_before_migration(&db_path)?;
    }

    // foreign_keys cannot change inside a transaction
    conn.execute_batch("PRAGMA foreign_keys=OFF;")?;
    let rebuilt = rebuild_attendance(conn);
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    let dropped = rebuilt?;

    if dropped > 0 {
        warning(format!(
            "{} legacy attendance row(s) discarded: same member, event and session as an earlier row.",
            dropped
        ));
    }
    success("'session' column added to attendance.");
    Ok(())
}

fn rebuild_attendance(conn: &Connection) -> AppResult<usize> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        r#"
        ALTER TABLE attendance RENAME TO attendance_old;

        CREATE TABLE attendance (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id   INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            member_id  INTEGER NOT NULL REFERENCES members(id) ON DELETE CASCADE,
            session    TEXT NOT NULL DEFAULT 'morning' CHECK(session IN ('morning','afternoon')),
            time_in    TEXT NOT NULL,
            time_out   TEXT,
            UNIQUE(member_id, event_id, session)
        );
        "#,
    )?;

    let legacy: Vec<(i64, i64, i64, String, Option<String>)> = {
        let mut stmt = tx.prepare(
            "SELECT id, event_id, member_id, time_in, time_out
             FROM attendance_old
             ORDER BY time_in ASC, id ASC",
        )?;
        stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)))?
            .collect::<Result<_>>()?
    };

    let mut dropped = 0;
    {
        let mut insert = tx.prepare(
            "INSERT OR IGNORE INTO attendance (id, event_id, member_id, session, time_in, time_out)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for (id, event_id, member_id, time_in, time_out) in &legacy {
            let session = legacy_session(time_in);
            let n = insert.execute(params![
                id,
                event_id,
                member_id,
                session.to_db_str(),
                time_in,
                time_out
            ])?;
            if n == 0 {
                dropped += 1;
            }
        }
    }

    tx.execute_batch(
        r#"
        DROP TABLE attendance_old;
        CREATE INDEX IF NOT EXISTS idx_attendance_event ON attendance(event_id, time_in);
        "#,
    )?;
    tx.commit()?;

    Ok(dropped)
}

fn backup_before_migration(db_path: &str) -> AppResult<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_name = format!(
        "{}-backup_db_pre_sessions.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = std::path::Path::new(db_path)
        .parent()
        .ok_or_else(|| AppError::Migration(format!("no parent directory for {}", db_path)))?
        .join(&backup_name);

    let file = File::create(&backup_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| AppError::Migration(format!("Backup failed (start_file): {}", e)))?;

    let db_content = fs::read(db_path)?;
    zip.write_all(&db_content)?;

    zip.finish()
        .map_err(|e| AppError::Migration(format!("Backup failed (finish): {}", e)))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    if !is_applied(conn, INITIAL_SCHEMA)? {
        create_initial_schema(conn)?;
        mark_applied(conn, INITIAL_SCHEMA, "Created officers, members, events and attendance")?;
        success(format!("Migration applied: {}", INITIAL_SCHEMA));
    }

    if !is_applied(conn, ATTENDANCE_SESSIONS)? {
        add_session_to_attendance(conn)?;
        mark_applied(conn, ATTENDANCE_SESSIONS, "Attendance split into morning/afternoon sessions")?;
    }

    Ok(())
}
