//! SQLite connection wrapper (lightweight for CLI usage).

use crate::db::initialize::{configure, init_db};
use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        configure(&conn)?;
        Ok(Self { conn })
    }

    /// In-memory database with the full schema, used by unit tests.
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self { conn })
    }
}
