use crate::db::events;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::models::event::{Event, EventForm};
use crate::models::officer::Officer;
use rusqlite::Connection;

/// Fields given to `event edit`; absent ones keep the stored value.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<String>,
}

pub struct EventLogic;

impl EventLogic {
    pub fn add(conn: &Connection, officer: &Officer, form: &EventForm) -> AppResult<Event> {
        let new = form.validate().map_err(|e| AppError::from_messages(&e))?;
        let id = events::insert_event(conn, &new, Some(officer.id))?;

        ttlog(
            conn,
            "event_add",
            &id.to_string(),
            &format!("{} on {} by {}", new.name, new.event_date, officer.email),
        )?;

        Self::find(conn, id)
    }

    pub fn edit(conn: &Connection, id: i64, patch: &EventPatch) -> AppResult<Event> {
        let current = Self::find(conn, id)?;

        let mut form = EventForm::from_event(&current);
        if let Some(n) = &patch.name {
            form.name = n.clone();
        }
        if let Some(d) = &patch.description {
            form.description = d.clone();
        }
        if let Some(d) = &patch.event_date {
            form.event_date = d.clone();
        }

        let new = form.validate().map_err(|e| AppError::from_messages(&e))?;
        events::update_event(conn, id, &new)?;
        ttlog(conn, "event_edit", &id.to_string(), &format!("Updated {}", new.name))?;

        Self::find(conn, id)
    }

    pub fn delete(conn: &Connection, id: i64) -> AppResult<Event> {
        let current = Self::find(conn, id)?;
        events::delete_event(conn, id)?;
        ttlog(
            conn,
            "event_del",
            &id.to_string(),
            &format!("Deleted {} and its attendance", current.label()),
        )?;
        Ok(current)
    }

    pub fn find(conn: &Connection, id: i64) -> AppResult<Event> {
        events::find_by_id(conn, id)?.ok_or(AppError::EventNotFound(id))
    }

    /// The requested event, or the most recent one when none is given.
    pub fn resolve(conn: &Connection, id: Option<i64>) -> AppResult<Event> {
        match id {
            Some(id) => Self::find(conn, id),
            None => events::most_recent(conn)?.ok_or(AppError::NoEvents),
        }
    }

    /// Events by date, newest first, optionally limited to a `--range` expression.
    pub fn list(conn: &Connection, range: Option<&str>) -> AppResult<Vec<Event>> {
        let bounds = range.map(parse_range).transpose()?;
        events::load_events(conn, bounds)
    }
}
