use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Every key the current configuration format knows about.
const KNOWN_KEYS: [&str; 7] = [
    "database",
    "email_domain",
    "page_size",
    "session_cutoff",
    "scan_cooldown_seconds",
    "academic_year",
    "separator_char",
];

fn read_mapping(path: &Path) -> AppResult<serde_yaml::Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(serde_yaml::Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: expected a YAML mapping at top level",
            path.display()
        ))),
    }
}

/// Return the configuration keys missing from the file at `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let map = read_mapping(path)?;

    Ok(KNOWN_KEYS
        .iter()
        .filter(|k| !map.contains_key(Value::String(k.to_string())))
        .map(|k| k.to_string())
        .collect())
}

/// Add the missing keys with their default values, keeping the values the
/// user already set. Returns the keys that were added.
pub fn add_missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let mut map = read_mapping(path)?;

    let defaults = serde_yaml::to_value(Config::default()).map_err(|_| AppError::ConfigSave)?;
    let Value::Mapping(defaults) = defaults else {
        return Err(AppError::ConfigSave);
    };

    let mut added = Vec::new();
    for key in KNOWN_KEYS {
        let k = Value::String(key.to_string());
        if !map.contains_key(&k) {
            let v = defaults.get(&k).cloned().unwrap_or(Value::Null);
            map.insert(k, v);
            added.push(key.to_string());
        }
    }

    if added.is_empty() {
        return Ok(added);
    }

    let serialized =
        serde_yaml::to_string(&Value::Mapping(map)).map_err(|_| AppError::ConfigSave)?;

    // Inject documentation right after the keys that need explaining
    let mut content = String::new();
    for line in serialized.lines() {
        content.push_str(line);
        content.push('\n');

        if line.starts_with("session_cutoff:") {
            content.push_str(
                "# scans before this HH:MM belong to the morning session,\n\
                 # scans at or after it to the afternoon session\n",
            );
        } else if line.starts_with("academic_year:") {
            content.push_str("# null → use the current calendar year\n");
        }
    }

    fs::write(path, content).map_err(|_| AppError::ConfigSave)?;
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_conf(name: &str, content: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(format!("{}_rattendance.conf", name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reports_missing_keys() {
        let path = temp_conf("cfg_missing", "database: /tmp/a.sqlite\npage_size: 20\n");
        let missing = missing_fields(&path).unwrap();
        assert!(missing.contains(&"email_domain".to_string()));
        assert!(!missing.contains(&"page_size".to_string()));
        fs::remove_file(path).ok();
    }

    #[test]
    fn migration_keeps_user_values() {
        let path = temp_conf("cfg_migrate", "database: /tmp/a.sqlite\npage_size: 20\n");

        let added = add_missing_fields(&path).unwrap();
        assert!(added.contains(&"session_cutoff".to_string()));

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.page_size, 20);
        assert_eq!(cfg.database, "/tmp/a.sqlite");
        assert_eq!(cfg.session_cutoff, "12:00");

        assert!(missing_fields(&path).unwrap().is_empty());
        assert!(add_missing_fields(&path).unwrap().is_empty());
        fs::remove_file(path).ok();
    }
}
