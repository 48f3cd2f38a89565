mod app;
mod error;
mod launcher;

use std::{ffi::OsString, io, path::PathBuf, process::ExitCode};

use app::{CliApp, Options, config::Settings, telemetry};
use clap::Parser;

/// Application to quickly and seamlessly edit and optionally back up your
/// Dalamud config.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The beta 'kind' to use.
    #[arg(long, default_value = "release")]
    beta_kind: String,
    /// The beta key to use.
    #[arg(long, default_value = "")]
    beta_key: String,
    /// Do not back up the config file before editing.
    #[arg(long)]
    no_backup: bool,
    /// Print the new contents of the file without editing or backing up.
    #[arg(short, long)]
    dry_run: bool,
    /// Edit this file instead of the launcher's dalamudConfig.json.
    #[arg(long, value_name = "PATH")]
    config_file: Option<PathBuf>,
}

impl From<Args> for Options {
    fn from(args: Args) -> Self {
        Self {
            beta_kind: Some(args.beta_kind),
            beta_key: Some(args.beta_key),
            no_backup: args.no_backup,
            dry_run: args.dry_run,
            config_file: args.config_file,
        }
    }
}

// clap short flags are single characters.
const LEGACY_ALIASES: [(&str, &str); 3] = [
    ("-bkind", "--beta-kind"),
    ("-bkey", "--beta-key"),
    ("-nb", "--no-backup"),
];

fn expand_legacy_aliases(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            LEGACY_ALIASES
                .iter()
                .find_map(|(alias, long)| {
                    if text == *alias {
                        return Some(OsString::from(*long));
                    }
                    let rest = text.strip_prefix(alias)?;
                    let value = rest.strip_prefix('=').or_else(|| rest.strip_prefix(':'))?;
                    Some(OsString::from(format!("{long}={value}")))
                })
                .unwrap_or(arg)
        })
        .collect()
}

fn main() -> ExitCode {
    let args = Args::parse_from(expand_legacy_aliases(std::env::args_os()));
    if let Err(error) = telemetry::init_tracing() {
        eprintln!("warning: {error}");
    }

    let app = CliApp::new(args.into(), Settings::load());
    match app.run(&mut io::stdout().lock()) {
        Ok(outcome) => {
            tracing::debug!(?outcome, "done");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::debug!(?error, "failed to update config");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
