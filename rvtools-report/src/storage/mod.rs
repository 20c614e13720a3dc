//! Flat-file report store
//!
//! Layout under the data directory:
//! - `uploads/<id>/` holds `timestamp.txt` and the original workbook
//! - `reports/<id>/` holds `timestamp.txt`, `report.html` and `meta.json`

mod ingest;
mod meta;
mod retention;

pub use ingest::{IngestRequest, ingest_workbook};
pub use meta::{META_FILE, REPORT_FILE, ReportMeta, now_timestamp};
pub use retention::{retention_cutoff, sweep_expired};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use uuid::Uuid;

use crate::config::AppConfig;

/// Handle on the uploads/reports folders
#[derive(Debug, Clone)]
pub struct ReportStore {
    uploads_dir: PathBuf,
    reports_dir: PathBuf,
}

/// Freshly created, not yet populated report folders
#[derive(Debug)]
pub struct StagedReport {
    pub id: String,
    pub created: String,
    pub upload_dir: PathBuf,
    pub report_dir: PathBuf,
}

impl StagedReport {
    /// Remove both folders; used when ingestion fails part-way
    pub fn discard(self) {
        for dir in [&self.upload_dir, &self.report_dir] {
            if let Err(e) = fs::remove_dir_all(dir) {
                log::warn!("Failed to remove {}: {}", dir.display(), e);
            }
        }
        log::info!("Discarded staged report {}", self.id);
    }
}

/// Report ids are generated hex uuids; anything else could escape the store
fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        bail!("Invalid report id: '{}'", id);
    }
    Ok(())
}

/// Create each folder with a timestamp file, recording the ones that were made
fn make_stamped_dirs<'a>(dirs: &[&'a Path], created: &str, made: &mut Vec<&'a Path>) -> Result<()> {
    for &dir in dirs {
        fs::create_dir(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        made.push(dir);
        meta::write_timestamp(dir, created)?;
    }
    Ok(())
}

impl ReportStore {
    /// Open the store, creating its folders if needed
    pub fn open(config: &AppConfig) -> Result<Self> {
        Self::new(config.uploads_dir(), config.reports_dir())
    }

    pub fn new(uploads_dir: PathBuf, reports_dir: PathBuf) -> Result<Self> {
        for dir in [&uploads_dir, &reports_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(Self {
            uploads_dir,
            reports_dir,
        })
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn upload_dir(&self, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.uploads_dir.join(id))
    }

    pub fn report_dir(&self, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.reports_dir.join(id))
    }

    /// Create the upload and report folders for a new id, stamped with the current time
    pub fn stage(&self) -> Result<StagedReport> {
        let id = Uuid::new_v4().simple().to_string();
        let created = now_timestamp();
        let upload_dir = self.uploads_dir.join(&id);
        let report_dir = self.reports_dir.join(&id);

        let dirs = [upload_dir.as_path(), report_dir.as_path()];
        let mut made: Vec<&Path> = Vec::new();
        if let Err(e) = make_stamped_dirs(&dirs, &created, &mut made) {
            for dir in made {
                if let Err(err) = fs::remove_dir_all(dir) {
                    log::warn!("Failed to remove {}: {}", dir.display(), err);
                }
            }
            return Err(e);
        }

        log::debug!("Staged report {}", id);
        Ok(StagedReport {
            id,
            created,
            upload_dir,
            report_dir,
        })
    }

    /// Path of the rendered HTML, if the report exists
    pub fn report_html(&self, id: &str) -> Result<Option<PathBuf>> {
        let path = self.report_dir(id)?.join(REPORT_FILE);
        Ok(path.exists().then_some(path))
    }

    pub fn meta(&self, id: &str) -> Result<Option<ReportMeta>> {
        let path = self.report_dir(id)?.join(META_FILE);
        if !path.exists() {
            return Ok(None);
        }
        ReportMeta::load(&path).map(Some)
    }

    /// All reports with readable metadata, newest first
    pub fn list(&self) -> Result<Vec<ReportMeta>> {
        let entries = fs::read_dir(&self.reports_dir).with_context(|| {
            format!("Failed to list reports in {}", self.reports_dir.display())
        })?;

        let mut reports = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let path = entry.path().join(META_FILE);
            if !path.exists() {
                continue;
            }
            match ReportMeta::load(&path) {
                Ok(meta) => reports.push(meta),
                Err(e) => log::warn!("Skipping report with unreadable metadata: {:#}", e),
            }
        }

        reports.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(reports)
    }

    /// The original workbook uploaded for a report
    pub fn find_upload(&self, id: &str) -> Result<Option<PathBuf>> {
        let dir = self.upload_dir(id)?;
        if !dir.exists() {
            return Ok(None);
        }
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
            {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    /// Delete both folders of a report; returns whether anything was removed
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut removed = false;
        for dir in [self.upload_dir(id)?, self.report_dir(id)?] {
            if dir.exists() {
                fs::remove_dir_all(&dir)
                    .with_context(|| format!("Failed to delete {}", dir.display()))?;
                removed = true;
            }
        }
        if removed {
            log::info!("Deleted report {}", id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::meta::TIMESTAMP_FILE;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> ReportStore {
        ReportStore::open(&AppConfig::with_data_dir(dir.path())).unwrap()
    }

    fn meta(id: &str, created: &str) -> ReportMeta {
        ReportMeta {
            id: id.to_string(),
            filename: "rvtools.xlsx".to_string(),
            created: created.to_string(),
            custom_title: String::new(),
            custom_date: None,
            vms_on: 1,
            vms_off: 0,
            total: 1,
        }
    }

    #[test]
    fn test_stage_creates_folders() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let staged = store.stage().unwrap();

        assert_eq!(staged.id.len(), 32);
        assert!(staged.upload_dir.join(TIMESTAMP_FILE).exists());
        assert!(staged.report_dir.join(TIMESTAMP_FILE).exists());

        let (upload, report) = (staged.upload_dir.clone(), staged.report_dir.clone());
        staged.discard();
        assert!(!upload.exists());
        assert!(!report.exists());
    }

    #[test]
    fn test_failed_stage_leaves_no_upload_folder() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        // A plain file where the reports folder should be makes the second mkdir fail
        fs::remove_dir_all(store.reports_dir()).unwrap();
        fs::write(store.reports_dir(), b"").unwrap();

        assert!(store.stage().is_err());
        assert_eq!(fs::read_dir(store.uploads_dir()).unwrap().count(), 0);
    }

    #[test]
    fn test_list_newest_first() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        for (id, created) in [
            ("aaa", "2026-01-01T10:00:00.000000"),
            ("bbb", "2026-03-01T10:00:00.000000"),
            ("ccc", "2026-02-01T10:00:00.000000"),
        ] {
            let report_dir = store.report_dir(id).unwrap();
            fs::create_dir_all(&report_dir).unwrap();
            meta(id, created).save(&report_dir.join(META_FILE)).unwrap();
        }
        // Folder without metadata is ignored
        fs::create_dir_all(store.report_dir("ddd").unwrap()).unwrap();

        let ids: Vec<_> = store.list().unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["bbb", "ccc", "aaa"]);
        assert_eq!(store.meta("ccc").unwrap().unwrap().created, "2026-02-01T10:00:00.000000");
        assert!(store.meta("ddd").unwrap().is_none());
    }

    #[test]
    fn test_find_upload_and_delete() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let staged = store.stage().unwrap();
        fs::write(staged.upload_dir.join("export.xlsx"), b"xlsx").unwrap();

        let found = store.find_upload(&staged.id).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "export.xlsx");

        assert!(store.delete(&staged.id).unwrap());
        assert!(!staged.upload_dir.exists());
        assert!(!store.delete(&staged.id).unwrap());
        assert!(store.find_upload(&staged.id).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ids_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(store.delete("../etc").is_err());
        assert!(store.report_html("").is_err());
        assert!(store.meta("a/b").is_err());
        assert!(store.report_html("abc").unwrap().is_none());
    }
}
