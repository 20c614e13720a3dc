//! Application configuration and persisted report settings

mod settings;

pub use settings::{Settings, SettingsUpdate};

use std::path::PathBuf;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "RVTOOLS_DATA_DIR";
/// Environment variable overriding the retention period (days)
pub const RETENTION_DAYS_ENV: &str = "RVTOOLS_RETENTION_DAYS";
pub const DEFAULT_RETENTION_DAYS: i64 = 180;

/// Where reports live and how long they are kept
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub retention_days: i64,
}

impl AppConfig {
    /// Resolve configuration: CLI flag, then environment, then platform default
    pub fn load(data_dir_override: Option<PathBuf>) -> Self {
        let data_dir = data_dir_override
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        let retention_days = match std::env::var(RETENTION_DAYS_ENV) {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!(
                    "Ignoring invalid {}='{}', using {} days",
                    RETENTION_DAYS_ENV,
                    raw,
                    DEFAULT_RETENTION_DAYS
                );
                DEFAULT_RETENTION_DAYS
            }),
            Err(_) => DEFAULT_RETENTION_DAYS,
        };

        log::debug!("Data directory: {}", data_dir.display());
        Self {
            data_dir,
            retention_days,
        }
    }

    #[cfg(test)]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir.join("reports")
    }

    pub fn static_dir(&self) -> PathBuf {
        self.data_dir.join("static")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }

    pub fn logo_path(&self) -> PathBuf {
        self.static_dir().join("custom_logo.png")
    }
}

/// `~/.local/share/rvtools-report` (or the platform equivalent), `./data` as a last resort
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("rvtools-report"))
        .unwrap_or_else(|| PathBuf::from("data"))
}
