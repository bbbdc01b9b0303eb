use chrono::NaiveTime;
use serde::Serialize;

/// Time-of-day partition allowing two check-in cycles per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    Morning,
    Afternoon,
}

impl Session {
    pub fn as_str(&self) -> &'static str {
        match self {
            Session::Morning => "morning",
            Session::Afternoon => "afternoon",
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        self.as_str()
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "morning" => Some(Session::Morning),
            "afternoon" => Some(Session::Afternoon),
            _ => None,
        }
    }

    /// Accepts `m`, `am`, `morning`, `a`, `pm`, `afternoon` in any case.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "m" | "am" | "morning" => Some(Session::Morning),
            "a" | "pm" | "afternoon" => Some(Session::Afternoon),
            _ => None,
        }
    }

    /// Morning strictly before the cutoff, afternoon from the cutoff on.
    pub fn for_time(time: NaiveTime, cutoff: NaiveTime) -> Self {
        if time < cutoff {
            Session::Morning
        } else {
            Session::Afternoon
        }
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn cutoff_belongs_to_afternoon() {
        let cutoff = t("12:00");
        assert_eq!(Session::for_time(t("11:59"), cutoff), Session::Morning);
        assert_eq!(Session::for_time(t("12:00"), cutoff), Session::Afternoon);
        assert_eq!(Session::for_time(t("16:30"), cutoff), Session::Afternoon);
    }

    #[test]
    fn parses_short_codes() {
        assert_eq!(Session::from_code("AM"), Some(Session::Morning));
        assert_eq!(Session::from_code("afternoon"), Some(Session::Afternoon));
        assert_eq!(Session::from_code("evening"), None);
    }
}
