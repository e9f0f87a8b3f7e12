//! Spreadsheet export of the registration collection.

pub mod xlsx;

pub use xlsx::Worksheet;

use crate::registry::Registration;
use crate::Result;
use std::fs;
use std::path::Path;
use tracing::info;

/// Default download name for the exported workbook
pub const DEFAULT_EXPORT_FILE: &str = "fun_run_registrations.xlsx";

/// Sheet holding the registrations
pub const SHEET_NAME: &str = "Registrations";

/// Header label and width (in character widths) of each exported column
pub const COLUMNS: [(&str, f64); 4] = [
    ("No. BIB", 10.0),
    ("NIK", 20.0),
    ("Nama", 30.0),
    ("Kategori", 15.0),
];

/// Lay the collection out as the four-column registrations sheet
pub fn registrations_sheet(registrations: &[Registration]) -> Result<Worksheet> {
    let mut sheet = Worksheet::new(SHEET_NAME)?;
    for (header, width) in COLUMNS {
        sheet.add_column(header, width);
    }

    for registration in registrations {
        sheet.add_row(vec![
            registration.bib_number.clone(),
            registration.nik.clone(),
            registration.name.clone(),
            registration.category.display_name().to_string(),
        ])?;
    }

    Ok(sheet)
}

/// Serialize the collection into `.xlsx` bytes
pub fn export_tabular(registrations: &[Registration]) -> Result<Vec<u8>> {
    registrations_sheet(registrations)?.to_xlsx()
}

/// Write the exported workbook to `path`
pub fn write_export(path: &Path, registrations: &[Registration]) -> Result<()> {
    let bytes = export_tabular(registrations)?;
    fs::write(path, &bytes)?;
    info!(
        path = %path.display(),
        rows = registrations.len(),
        bytes = bytes.len(),
        "Exported registrations"
    );
    Ok(())
}
