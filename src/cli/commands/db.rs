use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, header, info, success, warning};
use rusqlite::Connection;
use std::fs;

fn applied_migrations(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
        [],
        |r| r.get(0),
    )?)
}

fn file_kb(path: &str) -> f64 {
    fs::metadata(path).map(|m| m.len() as f64 / 1024.0).unwrap_or(0.0)
}

/// `PRAGMA integrity_check` plus orphaned attendance (dangling member or
/// event references left by edits made with foreign keys off).
fn check_attendance_db(conn: &Connection) -> AppResult<bool> {
    let integrity: String = conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    if integrity != "ok" {
        error(format!("Integrity check failed: {}", integrity));
        return Ok(false);
    }

    let orphans: usize = conn
        .prepare("PRAGMA foreign_key_check;")?
        .query_map([], |_| Ok(()))?
        .count();
    if orphans > 0 {
        warning(format!(
            "{} row(s) point to a member, event or officer that no longer exists",
            orphans
        ));
        return Ok(false);
    }

    Ok(true)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if *migrate {
            header("🗄️  Attendance database schema");
            let before = applied_migrations(&pool.conn).unwrap_or(0);
            run_pending_migrations(&pool.conn)?;
            let after = applied_migrations(&pool.conn)?;

            if after > before {
                success(format!("{} migration(s) applied.", after - before));
            } else {
                info(format!("Schema is up to date ({} migrations).", after));
            }
        }

        if *show_info {
            header(format!("🗄️  {}", cfg.database));
            stats::print_db_info(&mut pool, &cfg.database)?;
        }

        if *check && check_attendance_db(&pool.conn)? {
            success("Database check passed: no corruption, no orphaned attendance.");
        }

        if *vacuum {
            let before = file_kb(&cfg.database);
            pool.conn.execute_batch("VACUUM;")?;
            success(format!(
                "Database compacted: {:.1} KB → {:.1} KB",
                before,
                file_kb(&cfg.database)
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_passes_the_check() {
        let pool = DbPool::in_memory().unwrap();
        assert_eq!(applied_migrations(&pool.conn).unwrap(), 2);
        assert!(check_attendance_db(&pool.conn).unwrap());
    }

    #[test]
    fn orphaned_attendance_fails_the_check() {
        let pool = DbPool::in_memory().unwrap();
        pool.conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
        pool.conn
            .execute(
                "INSERT INTO attendance (event_id, member_id, session, time_in)
                 VALUES (7, 9, 'morning', '2025-09-02T08:00:00+08:00')",
                [],
            )
            .unwrap();
        assert!(!check_attendance_db(&pool.conn).unwrap());
    }
}
