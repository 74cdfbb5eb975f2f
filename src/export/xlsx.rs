use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::ExportRecord;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const HEADER_BG: u32 = 0x2F75B5;
const BAND: [u32; 2] = [0xEAF3FB, 0xFFFFFF];

/// One styled sheet: bold header, frozen first row, banded rows, fitted columns.
pub(crate) fn export_xlsx<T: ExportRecord>(records: &[T], path: &Path, sheet: &str) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).map_err(to_export_error)?;

    let headers = T::headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(HEADER_BG))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();

    for (row_index, record) in records.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = Color::RGB(BAND[row_index % 2]);

        for (col, value) in record.to_row().iter().enumerate() {
            write_cell(worksheet, row, col as u16, value, band)?;
            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(value.width());
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Timestamps become Excel dates and numbers stay numeric; the rest is text.
fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, s: &str, bg: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if let Some((num_format, serial)) = parse_to_excel_date(s) {
        worksheet
            .write_with_format(row, col, serial, &base.set_num_format(num_format))
            .map_err(to_export_error)?;
    } else if let Ok(num) = s.parse::<f64>() {
        worksheet
            .write_with_format(row, col, num, &base.set_align(FormatAlign::Right))
            .map_err(to_export_error)?;
    } else {
        worksheet
            .write_with_format(row, col, s, &base)
            .map_err(to_export_error)?;
    }

    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
