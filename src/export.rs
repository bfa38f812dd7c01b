use crate::errors::ExportError;
use crate::models::RegionRecord;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct CityRow<'a> {
    cities: &'a str,
    confirmeds: u64,
    suspecteds: u64,
    cureds: u64,
    deads: u64,
}

impl<'a> From<&'a RegionRecord> for CityRow<'a> {
    fn from(record: &'a RegionRecord) -> Self {
        Self {
            cities: &record.name,
            confirmeds: record.confirmed,
            suspecteds: record.suspected,
            cureds: record.cured,
            deads: record.dead,
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Overwrites `path` with the city table. Rows go to a sibling file first and
/// are renamed into place, so the export is never half written.
pub async fn write_city_csv(path: &Path, rows: &[RegionRecord]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        writer.write_record(["cities", "confirmeds", "suspecteds", "cureds", "deads"])?;
    }
    for row in rows {
        writer.serialize(CityRow::from(row))?;
    }
    let payload = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let staging = staging_path(path);
    let placed = match tokio::fs::write(&staging, payload).await {
        Ok(()) => tokio::fs::rename(&staging, path).await,
        Err(err) => Err(err),
    };
    if let Err(err) = placed {
        tokio::fs::remove_file(&staging).await.ok();
        return Err(err.into());
    }
    Ok(())
}
