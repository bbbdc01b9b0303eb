use crate::cli::parser::EventAction;
use crate::config::Config;
use crate::core::events::{EventLogic, EventPatch};
use crate::errors::AppResult;
use crate::models::event::EventForm;
use crate::ui::messages::{info, success};
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::date::today;

pub fn handle(action: &EventAction, cfg: &Config) -> AppResult<()> {
    let (pool, officer) = super::open_signed_in(cfg)?;

    match action {
        EventAction::Add {
            name,
            date,
            description,
        } => {
            let form = EventForm {
                name: name.clone(),
                description: description.clone(),
                event_date: date.clone(),
            };
            let ev = EventLogic::add(&pool.conn, &officer, &form)?;
            success(format!("Event created: {} [id {}]", ev.label(), ev.id));
        }

        EventAction::Edit {
            id,
            name,
            date,
            description,
        } => {
            let patch = EventPatch {
                name: name.clone(),
                description: description.clone(),
                event_date: date.clone(),
            };
            let ev = EventLogic::edit(&pool.conn, *id, &patch)?;
            success(format!("Event updated: {}", ev.label()));
        }

        EventAction::Del { id, yes } => {
            let ev = EventLogic::find(&pool.conn, *id)?;
            if !*yes && !super::confirm(&format!("Delete {} and all of its attendance?", ev.label()))? {
                info("Deletion cancelled.");
                return Ok(());
            }
            EventLogic::delete(&pool.conn, *id)?;
            success(format!("Event deleted: {}", ev.label()));
        }

        EventAction::List { range } => {
            let events = EventLogic::list(&pool.conn, range.as_deref())?;
            if events.is_empty() {
                info("No events yet. Create your first event to get started.");
                return Ok(());
            }

            let today = today();
            let wrap = textwrap::Options::new(72)
                .initial_indent("      ")
                .subsequent_indent("      ");

            for ev in &events {
                let marker = if ev.event_date == today { " (today)" } else { "" };
                println!(
                    "{}{:>4}{}  {}  {}{}",
                    CYAN,
                    ev.id,
                    RESET,
                    ev.date_str(),
                    ev.name,
                    marker
                );
                if !ev.description.is_empty() {
                    for line in textwrap::wrap(&ev.description, &wrap) {
                        println!("{}{}{}", GREY, line, RESET);
                    }
                }
            }
            println!("\n{} event(s)", events.len());
        }
    }

    Ok(())
}
