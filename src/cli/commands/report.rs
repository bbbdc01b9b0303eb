use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { event, session } = cmd {
        let (pool, _officer) = super::open_signed_in(cfg)?;
        let report = ReportLogic::build(&pool.conn, *event, *session)?;
        ReportLogic::print(&report, &cfg.separator_char);
    }
    Ok(())
}
