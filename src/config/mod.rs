use crate::core::calculator::window::ProductionSchedule;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Dashboard refresh for operators and viewers (seconds)
    #[serde(default = "default_operator_refresh")]
    pub operator_refresh_secs: u64,
    /// Dashboard refresh for managers and admins (seconds)
    #[serde(default = "default_manager_refresh")]
    pub manager_refresh_secs: u64,
    /// Per-weekday window overrides, e.g. `friday: "06:00-14:00"`, `sunday: "off"`
    #[serde(default)]
    pub schedule: BTreeMap<String, String>,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

/// Keys written by `init`, used by `config --check`.
pub const CONFIG_KEYS: [&str; 5] = [
    "database",
    "operator_refresh_secs",
    "manager_refresh_secs",
    "schedule",
    "separator_char",
];

fn default_operator_refresh() -> u64 {
    5
}
fn default_manager_refresh() -> u64 {
    60
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            operator_refresh_secs: default_operator_refresh(),
            manager_refresh_secs: default_manager_refresh(),
            schedule: BTreeMap::new(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rdowntime")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rdowntime")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rdowntime.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rdowntime.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Production windows with the configured overrides applied.
    pub fn schedule(&self) -> AppResult<ProductionSchedule> {
        ProductionSchedule::standard().with_overrides(&self.schedule)
    }

    /// Dashboard polling interval for a role.
    pub fn refresh_secs(&self, role: Role) -> u64 {
        let secs = match role {
            Role::Operator | Role::Viewer => self.operator_refresh_secs,
            Role::Manager | Role::Admin => self.manager_refresh_secs,
        };
        secs.max(1)
    }

    /// Initialize configuration file and database file.
    /// In test mode the configuration file is left untouched.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = std::path::Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(format!("Cannot serialize configuration: {e}")))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(config)
    }

    /// Keys missing from the configuration file on disk.
    pub fn missing_keys() -> AppResult<Vec<&'static str>> {
        let path = Self::config_file();
        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

        let Some(map) = yaml.as_mapping() else {
            return Ok(CONFIG_KEYS.to_vec());
        };

        Ok(CONFIG_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(serde_yaml::Value::String(k.to_string())))
            .collect())
    }
}
