use crate::errors::AppResult;
use std::fmt;
use std::io::{self, Write};

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

/// Section header followed by a rule as wide as the title.
pub fn header<T: fmt::Display>(msg: T) {
    let title = msg.to_string();
    let rule = "=".repeat(unicode_width::UnicodeWidthStr::width(title.as_str()).max(8));
    println!("{}{}{}\n{}{}", FG_BLUE, BOLD, title, rule, RESET);
}

/// Print each validation problem on its own line.
pub fn errors(messages: &[String]) {
    for m in messages {
        error(m);
    }
}

/// Ask a yes/no question on stdin; anything but y/yes is a no.
pub fn confirm(question: &str) -> AppResult<bool> {
    print!("{} [y/N]: ", question);
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Warn that `path` exists and ask whether to overwrite it.
pub fn confirm_overwrite(path: &std::path::Path) -> AppResult<bool> {
    warning(format!("The file '{}' already exists.", path.display()));
    confirm("Overwrite?")
}
