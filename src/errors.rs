//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing / validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid program: {0}")]
    InvalidProgram(String),

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("{0}")]
    Validation(String),

    // ---------------------------
    // Auth
    // ---------------------------
    #[error("Not signed in. Run `rattendance auth signin` first")]
    NotSignedIn,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An officer account already exists for {0}")]
    DuplicateOfficer(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("A member with this school ID already exists")]
    DuplicateSchoolId,

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Event not found: {0}")]
    EventNotFound(i64),

    #[error("No events yet. Create your first event to get started")]
    NoEvents,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Build a validation error from a list of field messages.
    pub fn from_messages(messages: &[String]) -> Self {
        AppError::Validation(messages.join(", "))
    }
}

pub type AppResult<T> = Result<T, AppError>;
