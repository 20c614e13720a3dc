//! Periodic removal of old uploads and reports

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDateTime};

use super::ReportStore;
use super::meta::read_timestamp;

/// Oldest timestamp that survives a sweep
pub fn retention_cutoff(retention_days: i64) -> NaiveDateTime {
    Local::now().naive_local() - Duration::days(retention_days)
}

/// Remove upload and report folders stamped before `cutoff`
///
/// Folders without a readable `timestamp.txt` are left alone. Returns how
/// many folders were removed.
pub fn sweep_expired(store: &ReportStore, cutoff: NaiveDateTime) -> Result<usize> {
    let mut removed = 0;
    for root in [store.uploads_dir(), store.reports_dir()] {
        removed += sweep_dir(root, cutoff)?;
    }
    if removed > 0 {
        log::info!("Retention sweep removed {} folders older than {}", removed, cutoff);
    } else {
        log::debug!("Retention sweep found nothing older than {}", cutoff);
    }
    Ok(removed)
}

fn sweep_dir(root: &Path, cutoff: NaiveDateTime) -> Result<usize> {
    let entries =
        fs::read_dir(root).with_context(|| format!("Failed to list {}", root.display()))?;

    let mut removed = 0;
    for entry in entries {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        match read_timestamp(&path) {
            Some(ts) if ts < cutoff => {
                fs::remove_dir_all(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
                log::info!("Removed expired folder {}", path.display());
                removed += 1;
            }
            Some(_) => {}
            None => log::debug!("No timestamp in {}, keeping it", path.display()),
        }
    }
    Ok(removed)
}
