use chrono::NaiveDate;
use serde::Serialize;

pub const EVENT_NAME_MAX: usize = 200;

#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: i64,
    pub name: String,               // ⇔ events.name
    pub description: String,        // ⇔ events.description (default '')
    pub event_date: NaiveDate,      // ⇔ events.event_date (TEXT "YYYY-MM-DD")
    pub created_by: Option<i64>,    // ⇔ events.created_by → officers.id
    pub created_at: String,         // ⇔ events.created_at (RFC 3339)
}

impl Event {
    pub fn date_str(&self) -> String {
        self.event_date.format("%Y-%m-%d").to_string()
    }

    /// "<name> - <date>", as shown in event pickers and report titles.
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.date_str())
    }
}

/// A validated event, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub event_date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct EventForm {
    pub name: String,
    pub description: String,
    pub event_date: String,
}

impl EventForm {
    pub fn from_event(ev: &Event) -> Self {
        Self {
            name: ev.name.clone(),
            description: ev.description.clone(),
            event_date: ev.date_str(),
        }
    }

    pub fn validate(&self) -> Result<NewEvent, Vec<String>> {
        let name = self.name.trim();
        let date_raw = self.event_date.trim();

        if name.is_empty() || date_raw.is_empty() {
            return Err(vec!["Please fill in required fields".to_string()]);
        }

        let mut errors = Vec::new();
        if name.chars().count() > EVENT_NAME_MAX {
            errors.push("Event name is too long".to_string());
        }

        let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d").ok();
        if date.is_none() {
            errors.push(format!("Invalid event date '{}': use YYYY-MM-DD", date_raw));
        }

        match date {
            Some(event_date) if errors.is_empty() => Ok(NewEvent {
                name: name.to_string(),
                description: self.description.trim().to_string(),
                event_date,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_name_and_date() {
        let f = EventForm {
            name: "  ".into(),
            description: String::new(),
            event_date: "2025-10-01".into(),
        };
        assert_eq!(f.validate().unwrap_err(), vec!["Please fill in required fields"]);
    }

    #[test]
    fn rejects_malformed_date() {
        let f = EventForm {
            name: "General Assembly".into(),
            description: String::new(),
            event_date: "10/01/2025".into(),
        };
        let err = f.validate().unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err[0].contains("YYYY-MM-DD"));
    }

    #[test]
    fn accepts_valid_event() {
        let f = EventForm {
            name: " General Assembly ".into(),
            description: " Opening ".into(),
            event_date: "2025-10-01".into(),
        };
        let ev = f.validate().unwrap();
        assert_eq!(ev.name, "General Assembly");
        assert_eq!(ev.description, "Opening");
        assert_eq!(ev.event_date, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
    }
}
