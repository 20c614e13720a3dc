//! `history`, `show`, `download` and `delete` commands

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use colored::*;

use crate::config::AppConfig;
use crate::storage::ReportStore;

pub fn handle_history_command(config: &AppConfig) -> Result<()> {
    let store = ReportStore::open(config)?;
    let reports = store.list()?;

    if reports.is_empty() {
        println!("No reports yet.");
        return Ok(());
    }

    for meta in reports {
        println!(
            "{}  {}  {}  {} on / {} off / {} total",
            meta.id.bold(),
            meta.created.get(..16).unwrap_or(&meta.created).dimmed(),
            meta.display_title().cyan(),
            meta.vms_on,
            meta.vms_off,
            meta.total
        );
    }
    Ok(())
}

pub fn handle_show_command(id: &str, print: bool, config: &AppConfig) -> Result<()> {
    let store = ReportStore::open(config)?;
    let Some(path) = store.report_html(id)? else {
        bail!("Report not found: {}", id);
    };

    if print {
        let html = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read report: {}", path.display()))?;
        print!("{}", html);
        return Ok(());
    }

    if let Some(meta) = store.meta(id)? {
        println!("{}", meta.display_title().cyan().bold());
        println!("  file     {}", meta.filename);
        println!("  created  {}", meta.created);
        if let Some(date) = &meta.custom_date {
            println!("  date     {}", date);
        }
        println!(
            "  VMs      {} on / {} off / {} total",
            meta.vms_on, meta.vms_off, meta.total
        );
    }
    println!("{}", path.display());
    Ok(())
}

pub fn handle_download_command(id: &str, output: Option<PathBuf>, config: &AppConfig) -> Result<()> {
    let store = ReportStore::open(config)?;
    let Some(source) = store.find_upload(id)? else {
        bail!("No workbook stored for report {}", id);
    };
    let file_name = source
        .file_name()
        .context("Stored workbook has no file name")?;

    let destination = match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path,
        None => PathBuf::from(file_name),
    };

    fs::copy(&source, &destination)
        .with_context(|| format!("Failed to copy workbook to {}", destination.display()))?;
    println!("Saved {}", destination.display().to_string().cyan());
    Ok(())
}

pub fn handle_delete_command(id: &str, config: &AppConfig) -> Result<()> {
    let store = ReportStore::open(config)?;
    if !store.delete(id)? {
        bail!("Report not found: {}", id);
    }
    println!("{} {}", "Deleted".red(), id);
    Ok(())
}
