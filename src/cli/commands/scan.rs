use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::events::EventLogic;
use crate::core::scanner::{ScanLogic, ScanOutcome, ScanTally};
use crate::errors::AppResult;
use crate::ui::messages::{error, header, info, success, warning};
use crate::utils::colors::{GREY, RESET};
use chrono::Local;
use std::io::{self, BufRead};

fn show(outcome: &ScanOutcome) {
    if outcome.is_error() {
        error(outcome.headline());
    } else if let ScanOutcome::Ignored { .. } = outcome {
        warning(outcome.headline());
    } else {
        success(outcome.headline());
    }
    if let Some(detail) = outcome.detail() {
        println!("   {}{}{}", GREY, detail, RESET);
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan {
        event,
        session,
        codes,
    } = cmd
    {
        let (pool, _officer) = super::open_signed_in(cfg)?;
        let ev = EventLogic::find(&pool.conn, *event)?;
        let mut tally = ScanTally::default();

        // a failed write is reported and the run goes on with the next card
        let mut handle_code = |code: &str| match ScanLogic::scan(
            &pool.conn,
            cfg,
            &ev,
            code,
            *session,
            Local::now(),
        ) {
            Ok(outcome) => {
                show(&outcome);
                tally.record(&outcome);
            }
            Err(e) => {
                error(format!("Failed to record attendance for {}: {}", code.trim(), e));
                tally.failed += 1;
            }
        };

        if codes.is_empty() {
            header(format!("📷 Scanning for {}", ev.label()));
            info("Scan a card (one school ID per line); type q to stop.");

            for line in io::stdin().lock().lines() {
                let line = line?;
                let code = line.trim();
                if code.eq_ignore_ascii_case("q") {
                    break;
                }
                if code.is_empty() {
                    continue;
                }
                handle_code(code);
            }
        } else {
            for code in codes.iter().filter(|c| !c.trim().is_empty()) {
                handle_code(code);
            }
        }

        println!(
            "\n{} timed in · {} timed out · {} ignored · {} completed · {} not found",
            tally.timed_in, tally.timed_out, tally.ignored, tally.completed, tally.not_found
        );
        if tally.failed > 0 {
            warning(format!("{} scan(s) could not be recorded", tally.failed));
        }
    }
    Ok(())
}
