use crate::errors::{AppError, AppResult};
use crate::export::model::{ExportRecord, records_to_table};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::ui::messages::info;
use std::path::Path;

pub(crate) fn export_pdf<T: ExportRecord>(records: &[T], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let rows = records_to_table(records);

    let mut pdf = PdfManager::new();
    pdf.write_table(title, T::headers(), &rows);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
