use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::time::Duration;

/// Connection settings every command relies on: cascading deletes for
/// members and events, and a short wait when a scanner window and another
/// command touch the file at the same time.
pub fn configure(conn: &Connection) -> AppResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    Ok(())
}

/// Bring the schema up to date. Tables are only ever created by migrations.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    configure(conn)?;
    run_pending_migrations(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_keys_are_enforced_after_init() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        let on: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |r| r.get(0))
            .unwrap();
        assert_eq!(on, 1);
    }
}
