use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::CohortError;
use crate::load::load_cohort;
use crate::source::CohortSource;
use crate::table::CohortTable;

/// Memoizes [`load_cohort`] per source. Failed loads are not cached, so a
/// corrected file can be picked up by the next call.
#[derive(Default)]
pub struct CohortCache {
    tables: Mutex<HashMap<CohortSource, Arc<CohortTable>>>,
}

impl CohortCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&self, source: &CohortSource) -> Result<Arc<CohortTable>, CohortError> {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(table) = tables.get(source) {
            tracing::debug!(path = %source.path.display(), "cohort cache hit");
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load_cohort(source)?);
        tables.insert(source.clone(), Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached table for `source`. Returns whether one was cached.
    pub fn invalidate(&self, source: &CohortSource) -> bool {
        self.tables
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(source)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.tables.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
