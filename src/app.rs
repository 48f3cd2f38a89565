pub mod config;
pub mod telemetry;

use std::{
    fmt::Display,
    io::Write,
    path::{Path, PathBuf},
};

use config::Settings;

use crate::{
    error::Error,
    launcher::{
        backup,
        document::{self, Edit},
        location, writer,
    },
};

#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Options {
    pub beta_kind: Option<String>,
    pub beta_key: Option<String>,
    pub no_backup: bool,
    pub dry_run: bool,
    pub config_file: Option<PathBuf>,
}

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub enum Outcome {
    Unchanged,
    DryRun,
    Written { backup: Option<PathBuf> },
}

pub struct CliApp {
    options: Options,
    settings: Settings,
}

impl CliApp {
    pub fn new(options: Options, settings: Settings) -> Self {
        Self { options, settings }
    }

    pub fn run(&self, out: &mut impl Write) -> Result<Outcome, Error> {
        self.echo_options(out).map_err(Error::Stdout)?;

        let config_file = self.config_file()?;
        tracing::info!(path = %config_file.display(), "resolved config file");

        let contents = match document::update(
            &config_file,
            self.options.beta_kind.as_deref(),
            self.options.beta_key.as_deref(),
        )? {
            Edit::Changed(contents) => contents,
            Edit::Unchanged => {
                writeln!(out, "No change to config was made.").map_err(Error::Stdout)?;
                return Ok(Outcome::Unchanged);
            }
        };

        if self.options.dry_run {
            write!(out, "{contents}").map_err(Error::Stdout)?;
            return Ok(Outcome::DryRun);
        }

        let backup = if self.backup_enabled() {
            Some(backup::backup(&config_file)?)
        } else {
            None
        };

        writer::write_atomic(&config_file, &contents)?;
        Ok(Outcome::Written { backup })
    }

    fn config_file(&self) -> Result<PathBuf, Error> {
        let overridden = self
            .options
            .config_file
            .as_deref()
            .or(self.settings.config_file.as_deref())
            .map(Path::to_path_buf);

        match overridden {
            Some(path) => Ok(path),
            None => Ok(location::resolve_config_file()?),
        }
    }

    fn backup_enabled(&self) -> bool {
        !self.options.no_backup && self.settings.backup
    }

    fn echo_options(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "betaKind: {}", Shown(&self.options.beta_kind))?;
        writeln!(out, "betaKey: {}", Shown(&self.options.beta_key))?;
        writeln!(out, "noBackup: {}", self.options.no_backup)?;
        writeln!(out, "dryRun: {}", self.options.dry_run)
    }
}

struct Shown<'a>(&'a Option<String>);

impl Display for Shown<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => Ok(()),
        }
    }
}
