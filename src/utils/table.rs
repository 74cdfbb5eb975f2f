//! Plain-text tables for CLI output. Columns size themselves to the widest
//! cell, measured in terminal columns.

use unicode_width::UnicodeWidthStr;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    separator: char,
}

impl Table {
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: Vec::new(),
            separator: '-',
        }
    }

    /// Character used for the rule under the header (config `separator_char`).
    pub fn with_separator(mut self, sep: &str) -> Self {
        self.separator = sep.chars().next().unwrap_or('-');
        self
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.width());
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        push_line(&mut out, &self.headers, &widths);

        let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&self.separator.to_string().repeat(rule_len));
        out.push('\n');

        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }

        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        line.push_str(cell);
        if i + 1 < widths.len() {
            line.push_str(&" ".repeat(w.saturating_sub(cell.width()) + 2));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_widest_cell() {
        let mut t = Table::new(&["Machine", "Min"]);
        t.add_row(vec!["Press".into(), "10".into()]);
        t.add_row(vec!["Omposting/Korigering".into(), "5".into()]);

        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], format!("{:<22}Min", "Machine"));
        assert_eq!(lines[2], format!("{:<22}10", "Press"));
        assert_eq!(lines[1], "-".repeat(20 + 2 + 3));
    }
}
