//! Path utilities: expand ~ in user-supplied paths.

use std::path::PathBuf;

/// Resolve a leading `~/` against the home directory. Other paths are
/// returned unchanged, so relative paths stay relative.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Same as [`expand_tilde`], as a string for APIs that take `&str`.
pub fn expand_tilde_str(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}
