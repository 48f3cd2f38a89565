use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::error::WriteError;

// On a failed rename the temp file stays on disk and `path` is untouched.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), WriteError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(|source| WriteError::CreateTemp {
        target: path.to_path_buf(),
        source,
    })?;
    let temp_path = temp.path().to_path_buf();

    let permissions = fs::metadata(path).map(|metadata| metadata.permissions());
    temp.write_all(contents.as_bytes())
        .and_then(|()| match permissions {
            Ok(permissions) => temp.as_file().set_permissions(permissions),
            Err(_) => Ok(()),
        })
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|source| WriteError::WriteTemp {
            temp: temp_path.clone(),
            source,
        })?;

    if let Err(error) = temp.persist(path) {
        let temp = keep(error.file).unwrap_or(temp_path);
        return Err(WriteError::Persist {
            temp,
            target: path.to_path_buf(),
            source: error.error,
        });
    }

    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote config");
    Ok(())
}

fn keep(file: NamedTempFile) -> Option<PathBuf> {
    file.keep().ok().map(|(_, path)| path)
}
