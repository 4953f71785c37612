use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::row::ListRow;

/// Writes the header line and one record per row. Returns the number of
/// data rows written.
pub fn export_rows_to_csv<R: ListRow>(csv_path: &Path, rows: &[R]) -> Result<usize> {
    if let Some(parent) = csv_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create export dir: {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(csv_path)
        .with_context(|| format!("failed to create csv: {}", csv_path.display()))?;
    writer
        .write_record(R::export_headers())
        .context("failed to write csv header")?;

    let mut row_count = 0_usize;
    for row in rows {
        writer
            .write_record(row.export_record())
            .with_context(|| format!("failed to write csv record for {}", row.id()))?;
        row_count += 1;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush csv: {}", csv_path.display()))?;

    Ok(row_count)
}
