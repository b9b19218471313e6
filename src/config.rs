use std::path::{Path, PathBuf};

pub const COMPLAINTS_FILE: &str = "citizen_complaints.csv";
pub const EMPLOYEES_FILE: &str = "employee_performance.csv";
pub const SENTIMENT_FILE: &str = "social_media_sentiment.csv";
pub const DEPARTMENTS_FILE: &str = "department_summary.csv";

/// Locations of the four input tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub complaints: PathBuf,
    pub employees: PathBuf,
    pub sentiment: PathBuf,
    pub departments: PathBuf,
}

impl DataSources {
    /// Default file names resolved against `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            complaints: dir.join(COMPLAINTS_FILE),
            employees: dir.join(EMPLOYEES_FILE),
            sentiment: dir.join(SENTIMENT_FILE),
            departments: dir.join(DEPARTMENTS_FILE),
        }
    }
}

impl Default for DataSources {
    fn default() -> Self {
        Self::from_dir(".")
    }
}
