//! Memoized workbook load.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::loader::Workbook;
use crate::error::Result;

/// One-shot cache around [`Workbook::open`].
///
/// The first successful load is retained for the life of the cache; later
/// calls return the same `Arc` without touching the filesystem. A failed load
/// is not cached, so the caller may retry after fixing the file.
#[derive(Debug, Default)]
pub struct WorkbookCache {
    cell: OnceCell<Arc<Workbook>>,
}

impl WorkbookCache {
    /// Create an empty cache.
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the cached workbook, loading it from `path` on first use.
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<Arc<Workbook>> {
        self.cell
            .get_or_try_init(|| Workbook::open(path).map(Arc::new))
            .cloned()
    }

    /// The cached workbook, if a load has already succeeded.
    pub fn get(&self) -> Option<Arc<Workbook>> {
        self.cell.get().cloned()
    }
}
