/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey for placeholder values ("", "-"), unchanged otherwise.
pub fn colorize_optional(value: &str) -> String {
    if is_placeholder(value) {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Green for a time-in, red for a time-out, grey when missing.
pub fn colorize_in_out(value: &str, is_in: bool) -> String {
    if is_placeholder(value) {
        return format!("{GREY}{value}{RESET}");
    }

    if is_in {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}

fn is_placeholder(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v == "-"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_grey() {
        assert_eq!(colorize_optional("-"), format!("{GREY}-{RESET}"));
        assert_eq!(colorize_optional("BSCS"), "BSCS");
        assert_eq!(colorize_in_out("08:00:00", true), format!("{GREEN}08:00:00{RESET}"));
        assert_eq!(colorize_in_out("", false), format!("{GREY}{RESET}"));
    }
}
