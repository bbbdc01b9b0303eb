use super::program::Program;
use serde::Serialize;

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const BLOCKS: std::ops::RangeInclusive<u8> = 1..=5;
pub const YEAR_LEVELS: std::ops::RangeInclusive<u8> = 1..=4;

#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub id: i64,
    pub school_id: String,      // ⇔ members.school_id (UNIQUE)
    pub name: String,           // ⇔ members.name
    pub program: Program,       // ⇔ members.program
    pub block: Option<u8>,      // ⇔ members.block (NULL = unassigned)
    pub year_level: Option<u8>, // ⇔ members.year_level
    pub created_at: String,     // ⇔ members.created_at (RFC 3339)
}

impl Member {
    pub fn block_label(&self) -> String {
        block_label(self.block)
    }

    pub fn year_label(&self) -> String {
        match self.year_level {
            Some(y) => format!("{}{} Year", y, ordinal_suffix(y)),
            None => "-".to_string(),
        }
    }

    /// Calendar date the member joined the roster.
    pub fn joined(&self) -> String {
        self.created_at.chars().take(10).collect()
    }
}

pub fn block_label(block: Option<u8>) -> String {
    block.map(|b| b.to_string()).unwrap_or_else(|| "-".into())
}

fn ordinal_suffix(n: u8) -> &'static str {
    match n {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// A validated member, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub school_id: String,
    pub name: String,
    pub program: Program,
    pub block: Option<u8>,
    pub year_level: Option<u8>,
}

/// Raw member input as typed on the command line.
#[derive(Debug, Clone, Default)]
pub struct MemberForm {
    pub school_id: String,
    pub name: String,
    pub program: String,
    pub block: String,
    pub year_level: String,
}

impl MemberForm {
    pub fn from_member(m: &Member) -> Self {
        Self {
            school_id: m.school_id.clone(),
            name: m.name.clone(),
            program: m.program.code().to_string(),
            block: m.block.map(|b| b.to_string()).unwrap_or_default(),
            year_level: m.year_level.map(|y| y.to_string()).unwrap_or_default(),
        }
    }

    /// Full roster form: every field is required.
    pub fn validate(&self) -> Result<NewMember, Vec<String>> {
        let mut errors = Vec::new();

        let identity = validate_identity(&self.school_id, &self.name, &self.program);
        let block = parse_in_range(&self.block, BLOCKS);
        let year_level = parse_in_range(&self.year_level, YEAR_LEVELS);

        if let Err(e) = &identity {
            errors.extend(e.iter().cloned());
        }
        if block.is_none() {
            errors.push("Please select a block".to_string());
        }
        if year_level.is_none() {
            errors.push("Please select a year level".to_string());
        }

        match identity {
            Ok((school_id, name, program)) if errors.is_empty() => Ok(NewMember {
                school_id,
                name,
                program,
                block,
                year_level,
            }),
            _ => Err(errors),
        }
    }
}

/// Validate the three fields every roster entry carries, including bulk imports.
pub fn validate_identity(
    school_id: &str,
    name: &str,
    program: &str,
) -> Result<(String, String, Program), Vec<String>> {
    let mut errors = Vec::new();

    let school_id = school_id.trim();
    if school_id.is_empty() {
        errors.push("School ID is required".to_string());
    }

    let name = name.trim();
    let name_len = name.chars().count();
    if name_len < NAME_MIN {
        errors.push("Name must be at least 2 characters".to_string());
    } else if name_len > NAME_MAX {
        errors.push("Name is too long".to_string());
    }

    let program = Program::from_code(program);
    if program.is_none() {
        errors.push("Please select a valid program".to_string());
    }

    match program {
        Some(p) if errors.is_empty() => Ok((school_id.to_string(), name.to_string(), p)),
        _ => Err(errors),
    }
}

fn parse_in_range(raw: &str, range: std::ops::RangeInclusive<u8>) -> Option<u8> {
    raw.trim().parse::<u8>().ok().filter(|v| range.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> MemberForm {
        MemberForm {
            school_id: " 25-197015 ".into(),
            name: "  Rexter Bailon ".into(),
            program: "bscs".into(),
            block: "2".into(),
            year_level: "1".into(),
        }
    }

    #[test]
    fn valid_form_is_trimmed() {
        let m = form().validate().unwrap();
        assert_eq!(m.school_id, "25-197015");
        assert_eq!(m.name, "Rexter Bailon");
        assert_eq!(m.program, Program::Bscs);
        assert_eq!(m.block, Some(2));
        assert_eq!(m.year_level, Some(1));
    }

    #[test]
    fn collects_every_message() {
        let f = MemberForm {
            school_id: "   ".into(),
            name: "A".into(),
            program: "BSED".into(),
            block: "6".into(),
            year_level: "".into(),
        };
        let errors = f.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "School ID is required",
                "Name must be at least 2 characters",
                "Please select a valid program",
                "Please select a block",
                "Please select a year level",
            ]
        );
    }

    #[test]
    fn name_upper_bound() {
        let mut f = form();
        f.name = "x".repeat(101);
        assert_eq!(f.validate().unwrap_err(), vec!["Name is too long"]);
        f.name = "x".repeat(100);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn year_label_uses_ordinals() {
        let mut m = Member {
            id: 1,
            school_id: "23-1".into(),
            name: "Test".into(),
            program: Program::Bsit,
            block: None,
            year_level: Some(3),
            created_at: "2025-09-01T08:00:00+08:00".into(),
        };
        assert_eq!(m.year_label(), "3rd Year");
        m.year_level = None;
        assert_eq!(m.year_label(), "-");
        assert_eq!(m.block_label(), "-");
        assert_eq!(m.joined(), "2025-09-01");
    }
}
