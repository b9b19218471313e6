//! In-memory data store holding the four base tables.
//!
//! The store starts empty, is populated by [`DataStore::load`], and is only
//! read afterwards. Every analysis works on slices borrowed from it or on
//! subsets produced by [`crate::filter`].

use crate::config::DataSources;
use crate::error::LoadError;
use crate::loader;
use crate::types::{DataSummary, Datasets, DateRange, GroupColumn};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct DataStore {
    sources: DataSources,
    data: Option<Datasets>,
}

impl DataStore {
    pub fn new(sources: DataSources) -> Self {
        Self {
            sources,
            data: None,
        }
    }

    /// Build a store around tables that are already in memory.
    pub fn from_datasets(sources: DataSources, data: Datasets) -> Self {
        Self {
            sources,
            data: Some(data),
        }
    }

    pub fn sources(&self) -> &DataSources {
        &self.sources
    }

    /// Load (or reload) all four tables.
    ///
    /// Tables are swapped in only after every file has been read. On failure
    /// the store ends up unloaded, even if an earlier load had succeeded.
    pub fn try_load(&mut self) -> Result<&Datasets, LoadError> {
        match loader::load_all(&self.sources) {
            Ok(data) => {
                log::info!(
                    "loaded {} complaints, {} employees, {} sentiment posts, {} department summaries",
                    data.complaints.len(),
                    data.employees.len(),
                    data.sentiment.len(),
                    data.departments.len()
                );
                let data = self.data.insert(data);
                Ok(&*data)
            }
            Err(e) => {
                log::warn!("data load failed: {e}");
                self.data = None;
                Err(e)
            }
        }
    }

    /// Status-and-message form of [`DataStore::try_load`].
    pub fn load(&mut self) -> (bool, String) {
        match self.try_load() {
            Ok(_) => (true, "Data loaded successfully".to_string()),
            Err(e) => (false, format!("Error loading data: {e}")),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    pub fn datasets(&self) -> Option<&Datasets> {
        self.data.as_ref()
    }

    /// Sorted distinct values of a complaint column, for filter selections.
    pub fn unique_values(&self, column: GroupColumn) -> Vec<String> {
        let Some(data) = &self.data else {
            return Vec::new();
        };
        data.complaints
            .iter()
            .map(|c| column.key(c))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn summary(&self) -> Option<DataSummary> {
        let data = self.data.as_ref()?;
        let dates = data.complaints.iter().map(|c| c.complaint_date);
        let date_range = match (dates.clone().min(), dates.max()) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        };
        Some(DataSummary {
            complaints_count: data.complaints.len(),
            employees_count: data.employees.len(),
            sentiment_posts: data.sentiment.len(),
            departments_count: data.departments.len(),
            date_range,
        })
    }
}
