//! Store a workbook, analyze it and write its report

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDateTime};

use super::meta::{META_FILE, REPORT_FILE, ReportMeta};
use super::{ReportStore, StagedReport};
use crate::config::Settings;
use crate::inventory::{self, InventoryReport};
use crate::report::{REPORT_DATE_FORMAT, RenderOptions, render_report};

/// Input format of a custom report date
const CUSTOM_DATE_INPUT: &str = "%Y-%m-%dT%H:%M";

/// A workbook to turn into a stored report
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub source: PathBuf,
    pub title: String,
    /// Raw `YYYY-MM-DDTHH:MM` date to print instead of the generation time
    pub date: Option<String>,
}

/// Result of a successful ingestion
#[derive(Debug)]
pub struct IngestedReport {
    pub meta: ReportMeta,
    pub html_path: PathBuf,
    pub report: InventoryReport,
}

/// Reformat a custom date for display; unparseable input is ignored
pub fn parse_custom_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDateTime::parse_from_str(raw, CUSTOM_DATE_INPUT) {
        Ok(date) => Some(date.format(REPORT_DATE_FORMAT).to_string()),
        Err(e) => {
            log::warn!("Ignoring custom date '{}': {}", raw, e);
            None
        }
    }
}

fn is_xlsx(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.to_lowercase().ends_with(".xlsx"))
}

/// Copy the workbook into the store, analyze it and write the HTML report
///
/// If anything after staging fails, both folders are removed again so a
/// failed upload never shows up in the history.
pub fn ingest_workbook(
    store: &ReportStore,
    request: &IngestRequest,
    settings: &Settings,
) -> Result<IngestedReport> {
    if !is_xlsx(&request.source) {
        bail!(
            "Please provide a valid .xlsx file (got {})",
            request.source.display()
        );
    }
    if !request.source.is_file() {
        bail!("File does not exist: {}", request.source.display());
    }

    let staged = store.stage()?;
    match build_report(&staged, request, settings) {
        Ok(ingested) => {
            log::info!(
                "Stored report {} for '{}' ({} VMs)",
                ingested.meta.id,
                ingested.meta.filename,
                ingested.meta.total
            );
            Ok(ingested)
        }
        Err(e) => {
            staged.discard();
            Err(e)
        }
    }
}

fn build_report(
    staged: &StagedReport,
    request: &IngestRequest,
    settings: &Settings,
) -> Result<IngestedReport> {
    let filename = request
        .source
        .file_name()
        .and_then(|name| name.to_str())
        .context("Workbook path has no file name")?
        .to_string();

    let stored = staged.upload_dir.join(&filename);
    fs::copy(&request.source, &stored)
        .with_context(|| format!("Failed to copy {} into the store", request.source.display()))?;

    let report = inventory::parse_inventory(&stored)
        .with_context(|| format!("Failed to read workbook '{}'", filename))?;

    let custom_title = request.title.trim().to_string();
    let custom_date = request.date.as_deref().and_then(parse_custom_date);
    let generated_at = custom_date
        .clone()
        .unwrap_or_else(|| Local::now().format(REPORT_DATE_FORMAT).to_string());

    let options = RenderOptions {
        report_id: staged.id.clone(),
        filename: filename.clone(),
        title: custom_title.clone(),
        generated_at,
        settings: settings.clone(),
    };
    let html = render_report(&report, &options).context("Failed to render report")?;
    let html_path = staged.report_dir.join(REPORT_FILE);
    fs::write(&html_path, html)
        .with_context(|| format!("Failed to write report: {}", html_path.display()))?;

    let meta = ReportMeta {
        id: staged.id.clone(),
        filename,
        created: staged.created.clone(),
        custom_title,
        custom_date,
        vms_on: report.summary_on.count,
        vms_off: report.summary_off.count,
        total: report.summary_total.count,
    };
    meta.save(&staged.report_dir.join(META_FILE))?;

    Ok(IngestedReport {
        meta,
        html_path,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    fn write_workbook(path: &Path, sheet_name: &str) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name).unwrap();
        for (col, header) in ["VM", "Powerstate", "Host", "Datacenter", "CPUs", "Memory"]
            .iter()
            .enumerate()
        {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        let rows = [
            ("web01", "poweredOn", "esx01", "DC1", 4.0, 8192.0),
            ("old01", "poweredOff", "esx01", "DC1", 2.0, 4096.0),
        ];
        for (i, (name, power, host, dc, cpu, mem)) in rows.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_string(row, 0, *name).unwrap();
            sheet.write_string(row, 1, *power).unwrap();
            sheet.write_string(row, 2, *host).unwrap();
            sheet.write_string(row, 3, *dc).unwrap();
            sheet.write_number(row, 4, *cpu).unwrap();
            sheet.write_number(row, 5, *mem).unwrap();
        }
        workbook.save(path).unwrap();
    }

    fn setup() -> (TempDir, ReportStore) {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::open(&AppConfig::with_data_dir(dir.path().join("data"))).unwrap();
        (dir, store)
    }

    #[test]
    fn test_ingest_stores_everything() {
        let (dir, store) = setup();
        let source = dir.path().join("Export.XLSX");
        write_workbook(&source, "vInfo");

        let request = IngestRequest {
            source,
            title: " Q3 review ".to_string(),
            date: Some("2026-09-30T18:45".to_string()),
        };
        let ingested = ingest_workbook(&store, &request, &Settings::default()).unwrap();

        assert_eq!(ingested.meta.vms_on, 1);
        assert_eq!(ingested.meta.vms_off, 1);
        assert_eq!(ingested.meta.total, 2);
        assert_eq!(ingested.meta.custom_title, "Q3 review");
        assert_eq!(ingested.meta.custom_date.as_deref(), Some("30/09/2026 18:45"));

        let html = fs::read_to_string(&ingested.html_path).unwrap();
        assert!(html.contains("30/09/2026 18:45"));
        assert!(html.contains("web01"));

        assert_eq!(store.list().unwrap().len(), 1);
        let upload = store.find_upload(&ingested.meta.id).unwrap().unwrap();
        assert_eq!(upload.file_name().unwrap(), "Export.XLSX");
    }

    #[test]
    fn test_failed_parse_leaves_no_trace() {
        let (dir, store) = setup();
        let source = dir.path().join("wrong.xlsx");
        write_workbook(&source, "Sheet1");

        let request = IngestRequest {
            source,
            title: String::new(),
            date: None,
        };
        let err = ingest_workbook(&store, &request, &Settings::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("Sheet1"));

        assert!(store.list().unwrap().is_empty());
        assert_eq!(fs::read_dir(store.uploads_dir()).unwrap().count(), 0);
        assert_eq!(fs::read_dir(store.reports_dir()).unwrap().count(), 0);
    }

    #[test]
    fn test_rejects_non_xlsx() {
        let (dir, store) = setup();
        let source = dir.path().join("export.csv");
        fs::write(&source, "VM\nvm01\n").unwrap();
        let request = IngestRequest {
            source,
            title: String::new(),
            date: None,
        };
        assert!(ingest_workbook(&store, &request, &Settings::default()).is_err());
        assert_eq!(fs::read_dir(store.reports_dir()).unwrap().count(), 0);
    }

    #[test]
    fn test_parse_custom_date() {
        assert_eq!(
            parse_custom_date("2026-01-05T07:09"),
            Some("05/01/2026 07:09".to_string())
        );
        assert_eq!(parse_custom_date("05/01/2026"), None);
        assert_eq!(parse_custom_date(""), None);
    }
}
