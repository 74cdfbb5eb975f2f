use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest`, optionally zipped. Returns the final path.
    pub fn backup(pool: &DbPool, db_path: &str, dest: &Path, compress: bool, force: bool) -> AppResult<PathBuf> {
        let src = Path::new(db_path);

        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        let final_target = if compress { dest.with_extension("zip") } else { dest.to_path_buf() };
        if final_target.exists() && !force {
            return Err(AppError::Conflict(format!(
                "'{}' already exists (use --force to overwrite).",
                final_target.display()
            )));
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if compress {
            compress_backup(src, &final_target)?;
        } else {
            fs::copy(src, &final_target)?;
        }

        audit(
            &pool.conn,
            "backup",
            &final_target.to_string_lossy(),
            if compress { "Backup created and compressed" } else { "Backup created" },
        )?;

        Ok(final_target)
    }
}

/// Write `src` as the single entry of a deflated zip archive at `zip_path`.
fn compress_backup(src: &Path, zip_path: &Path) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry_name = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rdowntime.sqlite".to_string());

    let mut f = fs::File::open(src)?;
    zip.start_file(entry_name, options).map_err(std::io::Error::other)?;
    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(())
}
