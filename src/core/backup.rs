use crate::config::Config;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm_overwrite, info, success, warning};
use rusqlite::Connection;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database to `dest_file`, optionally zipped.
    /// Returns the final path, or `None` when the user declined to overwrite.
    pub fn backup(cfg: &Config, dest_file: &Path, compress: bool, force: bool) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&cfg.database);

        if !src.exists() {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        if let Some(parent) = dest_file.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if dest_file.exists() && !force && !confirm_overwrite(dest_file)? {
            warning("Backup cancelled by user.");
            return Ok(None);
        }

        fs::copy(src, dest_file)?;
        success(format!("Backup created: {}", dest_file.display()));

        let final_path = if compress {
            let zipped = compress_backup(dest_file)?;
            match fs::remove_file(dest_file) {
                Ok(()) => info(format!("Removed uncompressed backup: {}", dest_file.display())),
                Err(e) => warning(format!("Failed to remove uncompressed backup: {}", e)),
            }
            zipped
        } else {
            dest_file.to_path_buf()
        };

        let conn = Connection::open(src)?;
        ttlog(
            &conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        )?;

        Ok(Some(final_path))
    }
}

/// Compress a backup into a sibling `.zip`.
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let entry = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "rattendance.sqlite".to_string());

    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    zip.start_file(entry, options).map_err(io::Error::other)?;

    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    info(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;
    use std::env;

    #[test]
    fn backup_copies_and_zips() {
        let dir = env::temp_dir().join("rattendance_backup_unit");
        fs::create_dir_all(&dir).unwrap();
        let db = dir.join("src.sqlite");
        let _ = fs::remove_file(&db);
        {
            let pool = DbPool::new(db.to_str().unwrap()).unwrap();
            crate::db::initialize::init_db(&pool.conn).unwrap();
        }

        let cfg = Config {
            database: db.to_string_lossy().to_string(),
            ..Config::default()
        };

        let plain = dir.join("copy.sqlite");
        let out = BackupLogic::backup(&cfg, &plain, false, true).unwrap().unwrap();
        assert!(out.exists());

        let zipped = BackupLogic::backup(&cfg, &dir.join("copy2.sqlite"), true, true)
            .unwrap()
            .unwrap();
        assert_eq!(zipped.extension().unwrap(), "zip");
        assert!(!dir.join("copy2.sqlite").exists());

        fs::remove_dir_all(&dir).ok();
    }
}
