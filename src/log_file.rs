use std::path::Path;

use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::{
    error::{RatesError, Result},
    exchange_rate::FormattedRecord,
};

/// One line per record, each terminated by a newline.
pub fn render_lines(records: &[FormattedRecord]) -> String {
    records.iter().map(|record| format!("{record}\n")).collect()
}

/// Appends the records to `path`, creating the file if needed. The file is
/// only held open for this one write.
pub async fn append_records(path: &Path, records: &[FormattedRecord]) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let filesystem = |source| RatesError::Filesystem {
        path: path.display().to_string(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(filesystem)?;

    file.write_all(render_lines(records).as_bytes())
        .await
        .map_err(filesystem)?;
    file.flush().await.map_err(filesystem)?;

    log::info!("Appended {} records to {}", records.len(), path.display());

    Ok(())
}
