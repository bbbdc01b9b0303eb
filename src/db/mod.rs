pub mod attendance;
pub mod events;
pub mod initialize;
pub mod log;
pub mod members;
pub mod migrate;
pub mod officers;
pub mod pool;
pub mod stats;

/// True when `err` is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Convert a TEXT column that failed to parse into a rusqlite conversion error.
pub(crate) fn conversion_error(idx: usize, err: crate::errors::AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}
