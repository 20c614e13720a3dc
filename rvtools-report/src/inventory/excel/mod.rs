//! Workbook loading for RVTools exports

mod cells;
mod reader;

pub use cells::{cell_count, cell_float, cell_string, get_cell};
pub use reader::{InventoryTables, SheetTable, read_inventory_tables};
