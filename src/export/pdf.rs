use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

// Helvetica at 1pt is roughly this wide per average glyph.
const GLYPH_W: f32 = 0.55;

/// Multi-page table writer on landscape A4.
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_refs: Vec<Ref>,
    next_id: i32,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            page_refs: Vec::new(),
            next_id: 4,

            page_w: 842.0,
            page_h: 595.0,
            margin: 40.0,
            row_h: 18.0,

            font_size: 8.5,
            header_font_size: 9.0,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Register a page and return the id its content stream must use.
    fn new_page(&mut self) -> Ref {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);
        page.resources().fonts().pair(Name(b"F1"), self.font_id);

        content_id
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        let bytes = latin1(text);
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn fill_band(&self, content: &mut Content, y: f32, width: f32, grey: f32) {
        content.save_state();
        content.set_fill_rgb(grey, grey, grey + 0.03);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(&self, content: &mut Content, y: f32, col_widths: &[f32], row: &[String], font_size: f32) {
        let mut x = self.margin;

        for (text, w) in row.iter().zip(col_widths) {
            let fitted = fit(text, *w - 8.0, font_size);
            self.draw_text(content, x + 4.0, y + 5.0, font_size, &fitted);

            content.save_state();
            content.set_stroke_rgb(0.65, 0.65, 0.65);
            content.rect(x, y, *w, self.row_h);
            content.stroke();
            content.restore_state();

            x += w;
        }
    }

    /// Widths from the longest cell per column, scaled down to the page.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let text_w = |s: &str, size: f32| s.chars().count() as f32 * size * GLYPH_W + 10.0;

        let mut widths: Vec<f32> = headers.iter().map(|h| text_w(h, self.header_font_size)).collect();
        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = w.max(text_w(cell, self.font_size));
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;
        if total > max {
            let scale = max / total;
            widths.iter_mut().for_each(|w| *w *= scale);
        }

        widths
    }

    pub fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let col_widths = self.compute_col_widths(headers, rows);
        let table_w: f32 = col_widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        let mut remaining: &[Vec<String>] = rows;
        let mut page_no = 1;

        // at least one page, even without rows
        loop {
            let content_id = self.new_page();
            let mut content = Content::new();

            self.draw_text(&mut content, self.margin, self.page_h - self.margin + 10.0, self.title_font_size, title);
            self.draw_text(
                &mut content,
                self.page_w - self.margin - 50.0,
                self.margin - 25.0,
                self.font_size,
                &format!("Page {page_no}"),
            );

            let mut y = self.page_h - self.margin - 30.0;
            self.fill_band(&mut content, y, table_w, 0.85);
            self.draw_row(&mut content, y, &col_widths, &header_row, self.header_font_size);
            y -= self.row_h;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y < self.margin {
                    break;
                }
                if i % 2 == 0 {
                    self.fill_band(&mut content, y, table_w, 0.95);
                }
                self.draw_row(&mut content, y, &col_widths, row, self.font_size);
                y -= self.row_h;
                consumed += 1;
            }

            self.pdf.stream(content_id, &content.finish());

            remaining = &remaining[consumed..];
            page_no += 1;

            if remaining.is_empty() {
                break;
            }
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);

        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.iter().copied());
        drop(pages);

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

/// Characters outside Latin-1 are shown as `?`.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Cut `text` so it fits `width` points, marking the cut with `..`.
fn fit(text: &str, width: f32, size: f32) -> String {
    let max_chars = (width / (size * GLYPH_W)).floor().max(2.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut s: String = text.chars().take(max_chars.saturating_sub(2)).collect();
    s.push_str("..");
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_cells_are_cut() {
        assert_eq!(fit("Press", 100.0, 10.0), "Press");
        let cut = fit("a very long comment about the hydraulic press", 40.0, 10.0);
        assert!(cut.ends_with(".."));
        assert!(cut.chars().count() <= 7);
    }

    #[test]
    fn latin1_keeps_nordic_letters() {
        assert_eq!(latin1("Kø"), vec![b'K', 0xF8]);
        assert_eq!(latin1("→"), vec![b'?']);
    }
}
