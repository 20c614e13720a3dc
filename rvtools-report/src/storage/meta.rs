//! Report metadata and folder timestamps

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const META_FILE: &str = "meta.json";
pub const TIMESTAMP_FILE: &str = "timestamp.txt";
pub const REPORT_FILE: &str = "report.html";

/// Listing entry written next to every report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub id: String,
    /// Original workbook file name
    pub filename: String,
    /// Naive local ISO-8601 creation time
    pub created: String,
    #[serde(default)]
    pub custom_title: String,
    #[serde(default)]
    pub custom_date: Option<String>,
    pub vms_on: usize,
    pub vms_off: usize,
    pub total: usize,
}

impl ReportMeta {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report metadata: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report metadata: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write report metadata: {}", path.display()))
    }

    /// Title to show in listings
    pub fn display_title(&self) -> &str {
        if self.custom_title.is_empty() {
            &self.filename
        } else {
            &self.custom_title
        }
    }
}

/// Current local time in the stored timestamp format
pub fn now_timestamp() -> String {
    format_timestamp(Local::now().naive_local())
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Parse a stored timestamp, with or without fractional seconds
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    raw.trim().parse::<NaiveDateTime>().ok()
}

pub fn write_timestamp(dir: &Path, timestamp: &str) -> Result<()> {
    let path = dir.join(TIMESTAMP_FILE);
    fs::write(&path, timestamp)
        .with_context(|| format!("Failed to write timestamp: {}", path.display()))
}

/// Read a folder's timestamp; `None` when missing or unreadable
pub fn read_timestamp(dir: &Path) -> Option<NaiveDateTime> {
    let raw = fs::read_to_string(dir.join(TIMESTAMP_FILE)).ok()?;
    parse_timestamp(&raw)
}
