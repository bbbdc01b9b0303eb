use serde::Serialize;

/// Degree programs a member can be enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Program {
    Bscs,
    Bsit,
    Bsis,
    BtvtedCss,
}

impl Program {
    pub const ALL: [Program; 4] = [
        Program::Bscs,
        Program::Bsit,
        Program::Bsis,
        Program::BtvtedCss,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Program::Bscs => "BSCS",
            Program::Bsit => "BSIT",
            Program::Bsis => "BSIS",
            Program::BtvtedCss => "BTVTED-CSS",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.code()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "BSCS" => Some(Program::Bscs),
            "BSIT" => Some(Program::Bsit),
            "BSIS" => Some(Program::Bsis),
            "BTVTED-CSS" => Some(Program::BtvtedCss),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        Program::from_db_str(&code.trim().to_uppercase())
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_is_case_insensitive() {
        assert_eq!(Program::from_code("bscs"), Some(Program::Bscs));
        assert_eq!(Program::from_code(" btvted-css "), Some(Program::BtvtedCss));
        assert_eq!(Program::from_code("BSED"), None);
    }
}
