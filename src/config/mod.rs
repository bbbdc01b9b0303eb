use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveTime};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_session_cutoff")]
    pub session_cutoff: String,
    #[serde(default = "default_scan_cooldown")]
    pub scan_cooldown_seconds: i64,
    #[serde(default)]
    pub academic_year: Option<i32>,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_email_domain() -> String {
    "@sorsu.edu.ph".to_string()
}
fn default_page_size() -> usize {
    10
}
fn default_session_cutoff() -> String {
    "12:00".to_string()
}
fn default_scan_cooldown() -> i64 {
    10
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            email_domain: default_email_domain(),
            page_size: default_page_size(),
            session_cutoff: default_session_cutoff(),
            scan_cooldown_seconds: default_scan_cooldown(),
            academic_year: None,
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rattendance")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rattendance")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Boundary between the morning and afternoon sessions.
    pub fn cutoff(&self) -> AppResult<NaiveTime> {
        NaiveTime::parse_from_str(self.session_cutoff.trim(), "%H:%M")
            .map_err(|_| AppError::Config(format!("invalid session_cutoff '{}'", self.session_cutoff)))
    }

    /// Year used to derive year levels from school IDs.
    pub fn effective_academic_year(&self) -> i32 {
        self.academic_year
            .unwrap_or_else(|| crate::utils::date::today().year())
    }

    /// Page size, never zero.
    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            config.save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.email_domain, "@sorsu.edu.ph");
        assert_eq!(cfg.page_size, 10);
        assert_eq!(cfg.scan_cooldown_seconds, 10);
        assert_eq!(cfg.academic_year, None);
    }

    #[test]
    fn cutoff_must_be_hh_mm() {
        let mut cfg = Config::default();
        assert_eq!(cfg.cutoff().unwrap(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        cfg.session_cutoff = "noon".into();
        assert!(cfg.cutoff().is_err());
    }

    #[test]
    fn page_size_is_never_zero() {
        let cfg = Config {
            page_size: 0,
            ..Config::default()
        };
        assert_eq!(cfg.page_size(), 1);
    }
}
