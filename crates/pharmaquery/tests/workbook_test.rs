//! Integration tests for workbook loading and the memoized cache.

mod common;

use std::sync::Arc;

use pharmaquery::{PharmaQueryError, Workbook, WorkbookCache};
use tempfile::tempdir;

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_returns_every_sheet_in_order() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("sales.xlsx");
    common::write_sales_workbook(&path);

    let workbook = Workbook::open(&path).expect("load workbook");

    assert_eq!(workbook.len(), 3);
    assert_eq!(
        workbook.sheet_names(),
        vec!["TotalSales", "GenericSalesCombined", "DrugCatalog"]
    );

    let totals = workbook.sheet("TotalSales").expect("TotalSales sheet");
    assert_eq!(totals.headers, vec!["Totalname", "2024", "2025"]);
    assert_eq!(totals.row_count(), 3);
    assert_eq!(totals.column_count(), 3);
}

#[test]
fn test_numeric_cells_read_as_text() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("sales.xlsx");
    common::write_sales_workbook(&path);

    let workbook = Workbook::open(&path).expect("load workbook");
    let totals = workbook.sheet("TotalSales").expect("sheet");

    assert_eq!(totals.get(0, 0), Some("OseltamivirX"));
    assert_eq!(totals.get(0, 1), Some("800"));
    assert_eq!(totals.get(1, 2), Some("400"));
}

#[test]
fn test_sheet_lookup_variants() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("sales.xlsx");
    common::write_sales_workbook(&path);

    let workbook = Workbook::open(&path).expect("load workbook");

    assert!(workbook.sheet("totalsales").is_some());
    assert_eq!(
        workbook.sheet_at(2).map(|s| s.name.as_str()),
        Some("DrugCatalog")
    );
    assert_eq!(
        workbook.sheet_containing("generic").map(|s| s.name.as_str()),
        Some("GenericSalesCombined")
    );
    assert!(workbook.sheet("Imaginary").is_none());
}

#[test]
fn test_meta_records_provenance() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("sales.xlsx");
    common::write_sales_workbook(&path);

    let workbook = Workbook::open(&path).expect("load workbook");

    assert_eq!(workbook.meta.sheet_count, 3);
    assert_eq!(workbook.meta.file, "sales.xlsx");
    assert!(workbook.meta.hash.starts_with("sha256:"));
    assert!(workbook.meta.size_bytes > 0);
}

// =============================================================================
// Load failures
// =============================================================================

#[test]
fn test_missing_file_is_a_load_error() {
    let err = Workbook::open("does_not_exist.xlsx").unwrap_err();
    assert!(matches!(err, PharmaQueryError::Io { .. }));
    assert!(err.to_string().contains("does_not_exist.xlsx"));
}

#[test]
fn test_malformed_workbook_is_a_load_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"this is not a spreadsheet").expect("write garbage");

    let err = Workbook::open(&path).unwrap_err();
    assert!(matches!(err, PharmaQueryError::Workbook { .. }));
}

// =============================================================================
// Memoized cache
// =============================================================================

#[test]
fn test_cached_load_does_not_reread_the_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("sales.xlsx");
    common::write_sales_workbook(&path);

    let cache = WorkbookCache::new();
    let first = cache.get_or_load(&path).expect("first load");

    // With the file gone, only the cache can satisfy the second call.
    std::fs::remove_file(&path).expect("remove file");
    let second = cache.get_or_load(&path).expect("cached load");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.sheet_names(), first.sheet_names());
}

#[test]
fn test_failed_load_is_not_cached() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("late.xlsx");

    let cache = WorkbookCache::new();
    assert!(cache.get_or_load(&path).is_err());
    assert!(cache.get().is_none());

    common::write_sales_workbook(&path);
    let workbook = cache.get_or_load(&path).expect("load after fix");
    assert_eq!(workbook.len(), 3);
}
