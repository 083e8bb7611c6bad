//! Shared fixture: a small pharma sales workbook written with rust_xlsxwriter.

use std::path::Path;

use rust_xlsxwriter::Workbook as XlsxWorkbook;

/// Write a three-sheet sales workbook to `path`.
///
/// Sheet order: TotalSales, GenericSalesCombined, DrugCatalog. The two
/// OseltamivirX rows in TotalSales sum to 1000 for 2025.
pub fn write_sales_workbook(path: &Path) {
    let mut workbook = XlsxWorkbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("TotalSales").expect("sheet name");
    for (col, header) in ["Totalname", "2024", "2025"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).expect("header");
    }
    let rows: &[(&str, f64, f64)] = &[
        ("OseltamivirX", 800.0, 600.0),
        ("OseltamivirX Plus", 120.0, 400.0),
        ("Cetirizine", 90.0, 55.0),
    ];
    for (i, (name, y2024, y2025)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, *name).expect("name cell");
        sheet.write_number(row, 1, *y2024).expect("2024 cell");
        sheet.write_number(row, 2, *y2025).expect("2025 cell");
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("GenericSalesCombined").expect("sheet name");
    sheet.write_string(0, 0, "Generic").expect("header");
    sheet.write_string(0, 1, "2025").expect("header");
    sheet.write_string(1, 0, "Oseltamivir").expect("cell");
    sheet.write_number(1, 1, 950.0).expect("cell");
    sheet.write_string(2, 0, "Cetirizine").expect("cell");
    sheet.write_number(2, 1, 70.0).expect("cell");

    let sheet = workbook.add_worksheet();
    sheet.set_name("DrugCatalog").expect("sheet name");
    sheet.write_string(0, 0, "Generic").expect("header");
    sheet.write_string(0, 1, "BodyPart").expect("header");
    sheet.write_string(1, 0, "Oseltamivir").expect("cell");
    sheet.write_string(1, 1, "respiratory").expect("cell");

    workbook.save(path).expect("save workbook");
}
