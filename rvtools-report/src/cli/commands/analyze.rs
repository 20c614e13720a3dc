//! `analyze` and `inspect` commands

use std::fs;

use anyhow::{Context, Result};
use colored::*;

use super::print_summary;
use crate::cli::{AnalyzeArgs, InspectArgs};
use crate::config::{AppConfig, Settings};
use crate::inventory::columns::{self, HOST_FIELDS, VM_FIELDS};
use crate::inventory::{self, InventoryTables};
use crate::storage::{IngestRequest, ReportStore, ingest_workbook};

/// Store a workbook and generate its report
pub fn handle_analyze_command(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let store = ReportStore::open(config)?;
    let settings = Settings::load(&config.settings_file())?;

    let request = IngestRequest {
        source: args.file,
        title: args.title,
        date: args.date,
    };
    let ingested = ingest_workbook(&store, &request, &settings)?;

    if let Some(json_path) = args.json {
        let json = serde_json::to_string_pretty(&ingested.report)
            .context("Failed to serialize analysis")?;
        fs::write(&json_path, json)
            .with_context(|| format!("Failed to write JSON: {}", json_path.display()))?;
        println!("JSON written to {}", json_path.display().to_string().cyan());
    }

    print_summary(&ingested.report);
    println!();
    println!("{} {}", "Report".green().bold(), ingested.meta.id.bold());
    println!("  {}", ingested.html_path.display());
    Ok(())
}

/// Analyze a workbook without touching the store
pub fn handle_inspect_command(args: InspectArgs) -> Result<()> {
    let tables = match inventory::read_inventory_tables(&args.file) {
        Ok(tables) => tables,
        Err(e) => {
            if let Some(sheets) = e.available_sheets() {
                eprintln!("{}", "Sheets in this workbook:".yellow());
                for sheet in sheets {
                    eprintln!("  {}", sheet);
                }
            }
            return Err(e)
                .with_context(|| format!("Failed to read workbook: {}", args.file.display()));
        }
    };

    if args.columns {
        print_columns(&tables);
    }

    let report = inventory::analyze(tables);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Sheets: {}", report.sheet_names.join(", ").dimmed());
        print_summary(&report);
    }
    Ok(())
}

fn print_columns(tables: &InventoryTables) {
    print_sheet_columns(&tables.inventory.name, &tables.inventory.headers, VM_FIELDS);
    if let Some(hosts) = &tables.hosts {
        print_sheet_columns(&hosts.name, &hosts.headers, HOST_FIELDS);
    }
}

fn print_sheet_columns(sheet: &str, headers: &[String], fields: &[(&'static str, &[&str])]) {
    println!("{}", format!("Columns in '{}'", sheet).bold());
    for (field, header) in columns::resolve_fields(headers, fields) {
        match header {
            Some(header) => println!("  {:<18} {}", field, header.green()),
            None => println!("  {:<18} {}", field, "not found".red()),
        }
    }
    println!();
}
