use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

use crate::models::{EmployeeRecord, RawEmployeeRow};
use crate::roster::EmployeeRoster;

/// Loads a roster CSV. All-or-nothing: the first row that does not parse
/// aborts the whole load.
pub fn load_roster(path: &Path) -> Result<EmployeeRoster> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open roster file: {}", path.display()))?;

    let mut employees = Vec::new();
    for (idx, row) in reader.deserialize::<RawEmployeeRow>().enumerate() {
        let row =
            row.with_context(|| format!("Failed to read row {} of {}", idx + 1, path.display()))?;
        let record = EmployeeRecord::from_row(&row)
            .with_context(|| format!("Failed to parse row {} of {}", idx + 1, path.display()))?;
        employees.push(record);
    }

    debug!("loaded {} roster rows from {}", employees.len(), path.display());
    Ok(EmployeeRoster::new(employees))
}

/// Default roster location: the bundled `data/roster.csv` when running
/// from a checkout, else the platform data directory.
pub fn default_roster_path() -> PathBuf {
    let local = PathBuf::from("data/roster.csv");
    if local.exists() {
        return local;
    }
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "roster") {
        proj_dirs.data_dir().join("roster.csv")
    } else {
        local
    }
}

pub fn load_default_roster() -> Result<EmployeeRoster> {
    load_roster(&default_roster_path())
}
