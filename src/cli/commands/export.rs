use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportSelection};
use crate::utils::path::expand_tilde_str;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        event,
        range,
        force,
    } = cmd
    {
        let (pool, _officer) = super::open_signed_in(cfg)?;

        let selection = match range {
            Some(r) => ExportSelection::Range(r.clone()),
            None => ExportSelection::Event(*event),
        };

        ExportLogic::export(
            &pool.conn,
            *format,
            &expand_tilde_str(file),
            &selection,
            *force,
        )?;
    }
    Ok(())
}
