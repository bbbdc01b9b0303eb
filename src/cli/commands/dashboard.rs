use crate::config::Config;
use crate::core::dashboard::DashboardLogic;
use crate::errors::AppResult;
use crate::utils::date::today;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let (pool, officer) = super::open_signed_in(cfg)?;
    let today = today();
    let stats = DashboardLogic::stats(&pool.conn, today)?;
    DashboardLogic::print(&stats, today, &officer.full_name);
    Ok(())
}
