use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm_overwrite, info};
use std::path::Path;

/// Check that `path` may be written: absent files always, existing ones
/// with `force` or after the user confirms.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    if confirm_overwrite(path)? {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".to_string(),
        ))
    }
}
