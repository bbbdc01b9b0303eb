pub mod auth;
pub mod backup;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod event;
pub mod export;
pub mod init;
pub mod log;
pub mod member;
pub mod report;
pub mod scan;

pub(crate) use crate::ui::messages::confirm;

use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::officer::Officer;

/// Open the configured database with every migration applied.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// Open the database and require a signed-in officer.
pub(crate) fn open_signed_in(cfg: &Config) -> AppResult<(DbPool, Officer)> {
    let pool = open_db(cfg)?;
    let officer = AuthLogic::require_officer(&pool.conn)?;
    Ok((pool, officer))
}
