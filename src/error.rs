use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ResolveError {
    #[error("The AppData directory could not be located")]
    AppDataUnavailable,
    #[error("The AppData directory resolved to an empty path")]
    EmptyPath,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("The config file doesn't exist at the path {}", .0.display())]
    Missing(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    IO {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: sonic_rs::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("Serialization error: {0}")]
    SerdeJson(#[from] sonic_rs::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("Failed to back up {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Failed to create a temp file next to {}: {source}", target.display())]
    CreateTemp {
        target: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write temp file {}: {source}", temp.display())]
    WriteTemp {
        temp: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to move {} over {}: {source}", temp.display(), target.display())]
    Persist {
        temp: PathBuf,
        target: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Dump(#[from] DumpError),
    #[error(transparent)]
    Backup(#[from] BackupError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error("Failed to write to stdout: {0}")]
    Stdout(std::io::Error),
}
