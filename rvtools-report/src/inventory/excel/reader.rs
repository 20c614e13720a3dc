//! Read the inventory and host sheets from an RVTools workbook
//!
//! Only the two sheets the analysis needs are decoded; RVTools exports carry
//! two dozen others that are ignored.

use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};

use super::cells::cell_string;
use crate::inventory::InventoryError;
use crate::inventory::columns::{HOST_SHEETS, INVENTORY_SHEETS};

/// One sheet as a header row plus data rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    pub name: String,
    /// Header cells, stringified and trimmed
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Data>>,
}

impl SheetTable {
    /// Build a table from raw rows, treating the first row as the header
    pub fn from_rows(name: impl Into<String>, mut rows: Vec<Vec<Data>>) -> Self {
        if rows.is_empty() {
            return Self {
                name: name.into(),
                ..Default::default()
            };
        }
        let headers = rows.remove(0).iter().map(cell_string).collect();
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    fn from_range(name: &str, range: &Range<Data>) -> Self {
        Self::from_rows(name, range.rows().map(|r| r.to_vec()).collect())
    }
}

/// Sheets the analysis runs on
#[derive(Debug, Clone, Default)]
pub struct InventoryTables {
    /// All sheet names in workbook order
    pub sheet_names: Vec<String>,
    pub inventory: SheetTable,
    /// Absent when the workbook has no host sheet
    pub hosts: Option<SheetTable>,
}

/// Which sheets to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSelection {
    pub inventory: String,
    pub hosts: Option<String>,
}

fn first_present(sheet_names: &[String], accepted: &[&str]) -> Option<String> {
    accepted
        .iter()
        .find(|name| sheet_names.iter().any(|s| s == *name))
        .map(|name| name.to_string())
}

/// Pick the inventory (required) and host (optional) sheets by exact name
pub fn select_sheets(sheet_names: &[String]) -> Result<SheetSelection, InventoryError> {
    let inventory = first_present(sheet_names, INVENTORY_SHEETS)
        .ok_or_else(|| InventoryError::missing_inventory_sheet(sheet_names))?;
    let hosts = first_present(sheet_names, HOST_SHEETS);

    Ok(SheetSelection { inventory, hosts })
}

/// Open an `.xlsx` workbook and load its inventory and host sheets
pub fn read_inventory_tables<P: AsRef<Path>>(path: P) -> Result<InventoryTables, InventoryError> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| InventoryError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let selection = select_sheets(&sheet_names)?;
    log::info!(
        "Reading '{}' (inventory sheet '{}', host sheet {:?})",
        path.display(),
        selection.inventory,
        selection.hosts
    );

    let inventory = read_table(&mut workbook, &selection.inventory)?;
    let hosts = match &selection.hosts {
        Some(name) => Some(read_table(&mut workbook, name)?),
        None => {
            log::info!("No host sheet found, hosts will be derived from VM rows");
            None
        }
    };

    Ok(InventoryTables {
        sheet_names,
        inventory,
        hosts,
    })
}

fn read_table<RS>(workbook: &mut Xlsx<RS>, sheet: &str) -> Result<SheetTable, InventoryError>
where
    RS: std::io::Read + std::io::Seek,
{
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|source| InventoryError::Sheet {
            sheet: sheet.to_string(),
            source,
        })?;
    let table = SheetTable::from_range(sheet, &range);
    log::debug!(
        "Sheet '{}': {} columns, {} data rows",
        sheet,
        table.headers.len(),
        table.rows.len()
    );
    Ok(table)
}
