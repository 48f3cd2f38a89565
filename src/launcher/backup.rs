use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local, TimeZone};

use crate::error::BackupError;

// Same-minute runs overwrite each other's backup.
const TIMESTAMP_FORMAT: &str = "%d-%m-%Y--%H-%M";

pub fn backup(path: &Path) -> Result<PathBuf, BackupError> {
    backup_at(path, Local::now())
}

pub fn backup_at<Tz: TimeZone>(path: &Path, now: DateTime<Tz>) -> Result<PathBuf, BackupError>
where
    Tz::Offset: std::fmt::Display,
{
    let destination = backup_path(path, &now);
    fs::copy(path, &destination).map_err(|source| BackupError::Copy {
        from: path.to_path_buf(),
        to: destination.clone(),
        source,
    })?;

    tracing::info!(from = %path.display(), to = %destination.display(), "backed up config");
    Ok(destination)
}

fn backup_path<Tz: TimeZone>(path: &Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let mut name = OsString::from(path.as_os_str());
    name.push(now.format(TIMESTAMP_FORMAT).to_string());
    PathBuf::from(name)
}
