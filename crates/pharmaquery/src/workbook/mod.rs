//! Workbook loading and schema-less table access.
//!
//! The workbook is read in full exactly once and never mutated afterwards;
//! everything downstream shares it behind an `Arc`.

mod cache;
mod loader;
mod sheet;

pub use cache::WorkbookCache;
pub use loader::{Workbook, WorkbookMeta};
pub use sheet::{Sheet, parse_number};
