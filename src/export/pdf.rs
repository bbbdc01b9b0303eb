use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Bar colors cycled through the chart entries.
const PALETTE: [(f32, f32, f32); 5] = [
    (0.20, 0.40, 0.73),
    (0.85, 0.45, 0.15),
    (0.25, 0.60, 0.35),
    (0.60, 0.30, 0.65),
    (0.75, 0.25, 0.30),
];

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,

    page_count: usize,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Helvetica only covers ASCII here; anything else is replaced.
fn pdf_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            'ñ' => 'n',
            'Ñ' => 'N',
            '·' | '•' => '-',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect::<String>()
        .into_bytes()
}

impl PdfManager {
    /// A4 landscape document.
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let next_id = 4;

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w: 842.0,
            page_h: 595.0,
            margin: 40.0,
            row_h: 18.0,

            next_id,
            font_id,

            font_size: 9.0,
            header_font_size: 10.0,
            title_font_size: 14.0,

            page_count: 0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Open a page; its content is written by `finalize_page`.
    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);
        self.page_count += 1;

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        page.resources().fonts().pair(Name(b"F1"), self.font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        let bytes = pdf_text(text);
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn fill_rect(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32, rgb: (f32, f32, f32)) {
        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        content.rect(x, y, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn draw_row(&self, content: &mut Content, y: f32, col_widths: &[f32], row: &[String], font_size: f32) {
        let mut x = self.margin;

        for (text, w) in row.iter().zip(col_widths) {
            // clip roughly to the cell
            let max_chars = ((w - 6.0) / (font_size * 0.5)).max(1.0) as usize;
            let shown: String = if text.chars().count() > max_chars {
                let mut s: String = text.chars().take(max_chars.saturating_sub(1)).collect();
                s.push('~');
                s
            } else {
                text.clone()
            };

            self.draw_text(content, x + 3.0, y + 5.0, font_size, &shown);
            self.draw_cell_borders(content, x, y, *w, self.row_h);
            x += w;
        }
    }

    /// Column widths from header and content length, scaled to the page.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.0 + 8.0).collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = (cell.chars().count() as f32 * 5.2 + 8.0).max(widths[i]);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_page_header_footer(&self, content: &mut Content, title: &str) {
        self.draw_text(
            content,
            self.margin,
            self.page_h - self.margin + 10.0,
            self.title_font_size,
            title,
        );

        let pg = format!("Page {}", self.page_count);
        self.draw_text(
            content,
            self.page_w - self.margin - 50.0,
            self.margin - 25.0,
            self.font_size,
            &pg,
        );
    }

    fn draw_header_row(&self, content: &mut Content, y: f32, col_widths: &[f32], headers: &[&str]) {
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        self.fill_rect(content, self.margin, y, col_widths.iter().sum(), self.row_h, (0.85, 0.87, 0.90));
        self.draw_row(content, y, col_widths, &header_row, self.header_font_size);
    }

    /// Multi-page table with repeated header and zebra stripes.
    pub fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let col_widths = self.compute_col_widths(headers, rows);

        let mut remaining: &[Vec<String>] = rows;
        loop {
            let mut content = self.new_page();
            self.draw_page_header_footer(&mut content, title);

            let mut y = self.page_h - self.margin - 30.0;
            self.draw_header_row(&mut content, y, &col_widths, headers);
            y -= self.row_h;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y - self.row_h < self.margin {
                    break;
                }

                if i % 2 == 0 {
                    self.fill_rect(&mut content, self.margin, y, col_widths.iter().sum(), self.row_h, (0.96, 0.96, 0.96));
                }

                self.draw_row(&mut content, y, &col_widths, row, self.font_size);

                y -= self.row_h;
                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            if remaining.is_empty() {
                break;
            }
        }
    }

    /// One page of horizontal bar charts, one chart per `(heading, entries)` pair.
    pub fn write_bar_charts(&mut self, title: &str, charts: &[(&str, &[(String, usize)])]) {
        let mut content = self.new_page();
        self.draw_page_header_footer(&mut content, title);

        let label_w = 110.0;
        let bar_max_w = self.page_w - 2.0 * self.margin - label_w - 60.0;
        let bar_h = 14.0;
        let mut y = self.page_h - self.margin - 40.0;

        for (heading, entries) in charts {
            if y - (entries.len() as f32 + 2.0) * (bar_h + 6.0) < self.margin {
                self.finalize_page(content);
                content = self.new_page();
                self.draw_page_header_footer(&mut content, title);
                y = self.page_h - self.margin - 40.0;
            }

            self.draw_text(&mut content, self.margin, y, self.header_font_size + 1.0, heading);
            y -= bar_h + 10.0;

            let max = entries.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1) as f32;
            for (i, (label, n)) in entries.iter().enumerate() {
                let w = (*n as f32 / max) * bar_max_w;
                self.draw_text(&mut content, self.margin, y + 3.0, self.font_size, label);
                self.fill_rect(&mut content, self.margin + label_w, y, w.max(1.0), bar_h, PALETTE[i % PALETTE.len()]);
                self.draw_text(
                    &mut content,
                    self.margin + label_w + w + 6.0,
                    y + 3.0,
                    self.font_size,
                    &n.to_string(),
                );
                y -= bar_h + 6.0;
            }

            y -= 20.0;
        }

        self.finalize_page(content);
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_ascii_safe() {
        assert_eq!(pdf_text("Peñafrancia · BSCS"), b"Penafrancia - BSCS".to_vec());
    }

    #[test]
    fn long_tables_span_pages() {
        let rows: Vec<Vec<String>> = (0..100).map(|i| vec![i.to_string(), "x".into()]).collect();
        let mut pdf = PdfManager::new();
        pdf.write_table("t", &["n", "x"], &rows);
        assert!(pdf.page_count > 1);

        let by_program = vec![("BSCS".to_string(), 3)];
        pdf.write_bar_charts("t", &[("By program", by_program.as_slice())]);
        let path = std::env::temp_dir().join("rattendance_pdf_unit.pdf");
        pdf.save(&path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
        std::fs::remove_file(path).ok();
    }
}
