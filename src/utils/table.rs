//! Table rendering utilities for CLI outputs.

use super::formatting::{pad_right, truncate};
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub max_width: usize,
}

impl Column {
    pub fn new(header: &str, max_width: usize) -> Self {
        Self {
            header: header.to_string(),
            max_width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    /// Character repeated for the rule under the header.
    pub separator: char,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separator: '-',
        }
    }

    /// Use the first character of `sep` for the header rule; blank keeps `-`.
    pub fn with_separator(mut self, sep: &str) -> Self {
        if let Some(c) = sep.trim().chars().next() {
            self.separator = c;
        }
        self
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let data = self
                    .rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| UnicodeWidthStr::width(c.as_str()))
                    .max()
                    .unwrap_or(0);
                data.max(UnicodeWidthStr::width(col.header.as_str()))
                    .min(col.max_width)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        self.render_styled(|_, cell| cell.to_string())
    }

    /// Render with `style(column, padded_cell)` applied after layout, so
    /// ANSI codes do not affect column widths.
    pub fn render_styled<F: Fn(usize, &str) -> String>(&self, style: F) -> String {
        let widths = self.widths();
        let mut out = String::new();

        // Header
        for (col, w) in self.columns.iter().zip(&widths) {
            out.push_str(&pad_right(&col.header, *w));
            out.push_str("  ");
        }
        out = out.trim_end().to_string();
        out.push('\n');

        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&self.separator.to_string().repeat(total));
        out.push('\n');

        // Rows
        for row in &self.rows {
            let mut line = String::new();
            for (i, w) in widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                line.push_str(&style(i, &pad_right(&truncate(cell, *w), *w)));
                line.push_str("  ");
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_fit_their_content() {
        let mut t = Table::new(vec![Column::new("ID", 10), Column::new("Name", 6)]);
        t.add_row(vec!["25-0001".into(), "Juan dela Cruz".into()]);
        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID       Name");
        assert_eq!(lines[2], "25-0001  Juan …");
    }

    #[test]
    fn style_sees_padded_cells() {
        let mut t = Table::new(vec![Column::new("A", 4), Column::new("B", 4)]);
        t.add_row(vec!["x".into(), "y".into()]);
        let out = t.render_styled(|col, cell| if col == 0 { format!("<{}>", cell) } else { cell.to_string() });
        assert_eq!(out.lines().nth(2).unwrap(), "<x>  y");
    }

    #[test]
    fn header_rule_uses_configured_separator() {
        let mut t = Table::new(vec![Column::new("ID", 4), Column::new("Name", 4)]).with_separator("=");
        t.add_row(vec!["1".into(), "Ana".into()]);
        assert_eq!(t.render().lines().nth(1).unwrap(), "==========");

        let blank = Table::new(vec![Column::new("ID", 4)]).with_separator("  ");
        assert_eq!(blank.render().lines().nth(1).unwrap(), "--");
    }
}
