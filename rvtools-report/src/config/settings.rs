//! Branding settings stored in `settings.json`

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Colours, company name and logo used when rendering reports
///
/// Keys missing from the stored file take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub primary_color: String,
    pub accent_color: String,
    pub company_name: String,
    pub logo_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            primary_color: "#0055b8".to_string(),
            accent_color: "#1268FB".to_string(),
            company_name: "Var Group".to_string(),
            logo_url: String::new(),
        }
    }
}

/// Partial settings change; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
    pub company_name: Option<String>,
    pub logo_url: Option<String>,
}

/// Accept a colour only if it looks like `#rrggbb`, otherwise keep `current`
pub fn pick_color(input: Option<&str>, current: &str) -> String {
    match input.map(str::trim) {
        Some(hex) if hex.len() == 7 && hex.starts_with('#') => hex.to_string(),
        _ => current.to_string(),
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;
        Ok(())
    }

    /// Return a copy with the update applied
    pub fn merged(&self, update: SettingsUpdate) -> Self {
        Self {
            primary_color: pick_color(update.primary_color.as_deref(), &self.primary_color),
            accent_color: pick_color(update.accent_color.as_deref(), &self.accent_color),
            company_name: update.company_name.unwrap_or_else(|| self.company_name.clone()),
            logo_url: update.logo_url.unwrap_or_else(|| self.logo_url.clone()),
        }
    }

    /// Merge an update over the stored settings and persist the result
    pub fn update(path: &Path, update: SettingsUpdate) -> Result<Self> {
        let settings = Self::load(path)?.merged(update);
        settings.save(path)?;
        log::info!("Saved settings to {}", path.display());
        Ok(settings)
    }
}
