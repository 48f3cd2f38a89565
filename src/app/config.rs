use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

const SETTINGS_FILE_NAME: &str = ".dalamud-beta.toml";

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Settings {
    pub config_file: Option<PathBuf>,
    pub backup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_file: None,
            backup: true,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        let mut files = vec![PathBuf::from("/etc/dalamud-beta.toml")];
        if let Some(home) = env::var_os("HOME").or_else(|| env::var_os("USERPROFILE")) {
            files.push(Path::new(&home).join(SETTINGS_FILE_NAME));
        }
        files.push(PathBuf::from(SETTINGS_FILE_NAME));

        Self::default().patch_from_files(&files)
    }

    fn patch_from_files<P: AsRef<Path>>(self, files: &[P]) -> Self {
        files
            .iter()
            .filter_map(|file| fs::read_to_string(file).ok())
            .filter_map(|content| match toml::from_str(&content) {
                Ok(patch) => Some(patch),
                Err(error) => {
                    tracing::warn!(%error, "ignoring malformed settings file");
                    None
                }
            })
            .fold(self, Self::patch)
    }

    fn patch(mut self, patch: SettingsPatch) -> Self {
        if let Some(config_file) = patch.config_file {
            self.config_file = Some(config_file)
        }
        if let Some(backup) = patch.backup {
            self.backup = backup
        }

        self
    }
}

#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
struct SettingsPatch {
    config_file: Option<PathBuf>,
    backup: Option<bool>,
}
