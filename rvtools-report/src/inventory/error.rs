//! Errors raised while reading an inventory workbook

use std::path::PathBuf;

use thiserror::Error;

/// Failure that aborts a whole parse
///
/// Malformed cells never end up here, they degrade to defaults.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// No sheet matched any accepted inventory sheet name
    #[error("inventory sheet not found (expected one of {expected:?}); sheets present: {available:?}")]
    MissingInventorySheet {
        expected: Vec<String>,
        available: Vec<String>,
    },

    /// The workbook could not be opened or decoded
    #[error("failed to open workbook {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// A selected sheet could not be read
    #[error("failed to read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::XlsxError,
    },
}

impl InventoryError {
    pub fn missing_inventory_sheet(available: &[String]) -> Self {
        InventoryError::MissingInventorySheet {
            expected: super::columns::INVENTORY_SHEETS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            available: available.to_vec(),
        }
    }

    /// Sheet names present in the workbook, when the error carries them
    pub fn available_sheets(&self) -> Option<&[String]> {
        match self {
            InventoryError::MissingInventorySheet { available, .. } => Some(available),
            _ => None,
        }
    }
}
