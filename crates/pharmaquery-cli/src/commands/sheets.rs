//! Sheets command - inspect the loaded workbook.

use std::path::PathBuf;

use colored::Colorize;
use pharmaquery::{AppConfig, Workbook};
use serde_json::json;

pub fn run(
    workbook: Option<PathBuf>,
    json: bool,
    config_path: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load_or_default(config_path.as_deref())?;
    if let Some(path) = workbook {
        config.workbook_path = path;
    }

    let workbook = Workbook::open(&config.workbook_path)?;

    if json {
        let payload = json!({
            "file": workbook.meta.file,
            "hash": workbook.meta.hash,
            "size_bytes": workbook.meta.size_bytes,
            "sheets": workbook
                .iter()
                .map(|sheet| json!({
                    "name": sheet.name,
                    "rows": sheet.row_count(),
                    "columns": sheet.column_count(),
                }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "{} {} ({} bytes)",
        "Workbook:".cyan().bold(),
        workbook.meta.file,
        workbook.meta.size_bytes
    );
    if verbose {
        println!("  {}", workbook.meta.hash);
    }
    for (i, sheet) in workbook.iter().enumerate() {
        println!(
            "  Table {}: {} ({} rows x {} columns)",
            i + 1,
            sheet.name,
            sheet.row_count(),
            sheet.column_count()
        );
    }

    Ok(())
}
