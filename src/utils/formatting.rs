//! Formatting utilities used for CLI and export outputs.

use unicode_width::UnicodeWidthStr;

/// Pad to `width` terminal columns, counting wide characters correctly.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

pub fn pad_left(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - w), s)
    }
}

/// Cut `s` to at most `width` columns, ending with `…` when shortened.
pub fn truncate(s: &str, width: usize) -> String {
    if UnicodeWidthStr::width(s) <= width {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + cw + 1 > width {
            break;
        }
        out.push(c);
        used += cw;
    }
    out.push('…');
    out
}

/// `2h 05m` style duration.
pub fn mins2readable(mins: i64) -> String {
    let m = mins.max(0);
    format!("{}h {:02}m", m / 60, m % 60)
}

/// Horizontal bar of at most `width` cells, scaled against `max`.
pub fn bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }
    let cells = ((value * width) as f64 / max as f64).round().max(1.0) as usize;
    "█".repeat(cells.min(width))
}

/// Share of `part` in `total` as a whole percentage.
pub fn percent(part: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        ((part as f64 / total as f64) * 100.0).round() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_the_largest_value() {
        assert_eq!(bar(10, 10, 20).chars().count(), 20);
        assert_eq!(bar(5, 10, 20).chars().count(), 10);
        assert_eq!(bar(1, 1000, 20).chars().count(), 1);
        assert_eq!(bar(0, 10, 20), "");
    }

    #[test]
    fn truncate_keeps_width() {
        assert_eq!(truncate("Juan dela Cruz", 8), "Juan de…");
        assert_eq!(truncate("Ana", 8), "Ana");
    }

    #[test]
    fn readable_minutes() {
        assert_eq!(mins2readable(125), "2h 05m");
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(0, 0), 0);
    }
}
