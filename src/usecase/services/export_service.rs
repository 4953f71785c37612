use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;

use crate::domain::entities::row::ListRow;
use crate::infra::export::csv::export_rows_to_csv;

pub struct ExportService {
    export_dir: PathBuf,
}

impl ExportService {
    pub fn new(export_dir: PathBuf) -> Self {
        Self { export_dir }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// `events-20261019.csv` style name inside the export directory.
    pub fn default_path(&self, view: &str, today: NaiveDate) -> PathBuf {
        self.export_dir
            .join(format!("{view}-{}.csv", today.format("%Y%m%d")))
    }

    pub fn export_csv<R: ListRow>(&self, path: &Path, rows: &[R]) -> Result<usize> {
        let written = export_rows_to_csv(path, rows)?;
        tracing::info!(path = %path.display(), rows = written, "exported csv");
        Ok(written)
    }
}
