use std::{env, ffi::OsString, path::PathBuf};

use crate::error::ResolveError;

const LAUNCHER_DIR: &str = "XIVLauncher";
const CONFIG_FILE_NAME: &str = "dalamudConfig.json";

pub fn resolve_config_file() -> Result<PathBuf, ResolveError> {
    let app_data = if cfg!(windows) {
        app_data_dir_from(env::var_os("APPDATA"), None, None)
    } else {
        app_data_dir_from(None, env::var_os("XDG_CONFIG_HOME"), env::var_os("HOME"))
    }?;

    Ok(app_data.join(LAUNCHER_DIR).join(CONFIG_FILE_NAME))
}

fn app_data_dir_from(
    app_data: Option<OsString>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf, ResolveError> {
    if let Some(app_data) = app_data {
        return non_empty(app_data);
    }

    // Relative XDG values are invalid per the basedir spec and get ignored.
    if let Some(xdg) = xdg_config_home
        .map(PathBuf::from)
        .filter(|path| path.is_absolute())
    {
        return Ok(xdg);
    }

    match home {
        Some(home) => Ok(non_empty(home)?.join(".config")),
        None => Err(ResolveError::AppDataUnavailable),
    }
}

fn non_empty(value: OsString) -> Result<PathBuf, ResolveError> {
    if value.is_empty() {
        return Err(ResolveError::EmptyPath);
    }
    Ok(PathBuf::from(value))
}
