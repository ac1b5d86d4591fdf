//! Command-line interface for termlayer.
//!
//! Reads the settings layers named on the command line, merges them and
//! prints some view of the result.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde_json::Value;
use termlayer_config::{LayeringOptions, Profile, ResolvedSettings};

use crate::logging;
use crate::store::{SettingsSources, SettingsStore, default_user_settings_path};

/// termlayer - inspect layered terminal settings
#[derive(Parser, Debug)]
#[command(name = "termlayer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Defaults file to use instead of the built-in defaults
    #[arg(long, value_name = "FILE", global = true)]
    pub defaults: Option<PathBuf>,

    /// User settings file (default: <config dir>/termlayer/settings.json, if it exists)
    #[arg(long, value_name = "FILE", global = true)]
    pub user: Option<PathBuf>,

    /// Generated profiles for a dynamic profile source (repeatable)
    #[arg(long = "generator", value_name = "NAMESPACE=FILE", value_parser = parse_generator, global = true)]
    pub generators: Vec<(String, PathBuf)>,

    /// Drop dynamic profiles whose generator was not given
    #[arg(long, global = true)]
    pub prune_orphans: bool,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level, global = true)]
    pub log_level: Option<LevelFilter>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List profiles in tab order (the default command)
    Profiles,
    /// Print one profile as JSON
    Show {
        /// Profile name or GUID
        profile: String,
    },
    /// Print global settings and color schemes as JSON
    Globals,
    /// List key bindings
    Bindings,
    /// Print stubs for generated profiles the user file doesn't mention yet
    Stubs,
    /// List load warnings; exits with 1 if there are any
    Warnings,
}

fn parse_generator(arg: &str) -> Result<(String, PathBuf), String> {
    match arg.split_once('=') {
        Some((namespace, path)) if !namespace.is_empty() && !path.is_empty() => {
            Ok((namespace.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAMESPACE=FILE, got '{}'", arg)),
    }
}

fn parse_log_level(arg: &str) -> Result<LevelFilter, String> {
    logging::parse_level(arg).ok_or_else(|| format!("unknown log level '{}'", arg))
}

impl Cli {
    /// Settings files to read. Falls back to the default user file when it
    /// exists and none was given.
    pub fn sources(&self) -> SettingsSources {
        let user = self
            .user
            .clone()
            .or_else(|| default_user_settings_path().filter(|path| path.is_file()));

        SettingsSources {
            defaults: self.defaults.clone(),
            user,
            generators: self.generators.clone(),
        }
    }

    pub fn options(&self) -> LayeringOptions {
        LayeringOptions {
            prune_orphaned_dynamic_profiles: self.prune_orphans,
        }
    }
}

/// Run the parsed command, writing to `out`. Returns the process exit code.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<i32> {
    let sources = cli.sources();
    if let Some(user) = &sources.user {
        log::info!("Using user settings {}", user.display());
    }

    let store = SettingsStore::load(sources, cli.options()).context("failed to load settings")?;
    let settings = store.snapshot();

    match cli.command.clone().unwrap_or(Commands::Profiles) {
        Commands::Profiles => print_profiles(&settings, out)?,
        Commands::Show { profile } => {
            let Some(found) = settings.find_profile(&profile) else {
                bail!("no profile named or identified by '{}'", profile);
            };
            print_json(&found.to_json(), out)?;
        }
        Commands::Globals => print_json(&settings.globals().to_json(), out)?,
        Commands::Bindings => {
            for (chord, action) in settings.globals().keybindings().iter() {
                writeln!(out, "{:<24} {}", chord.to_string(), action.generate_name())?;
            }
        }
        Commands::Stubs => {
            print_json(&Value::Array(settings.generated_profile_stubs()), out)?;
        }
        Commands::Warnings => {
            let warnings = store.warnings();
            for warning in &warnings {
                writeln!(out, "[{}] {}", warning.kind(), warning)?;
            }
            if !warnings.is_empty() {
                return Ok(1);
            }
        }
    }

    Ok(0)
}

fn print_profiles(settings: &ResolvedSettings, out: &mut impl Write) -> Result<()> {
    let default = settings.default_profile().map(Profile::guid);

    for profile in settings.profiles() {
        let marker = if Some(profile.guid()) == default { '*' } else { ' ' };
        let mut line = format!("{} {} {}", marker, profile.guid().braced(), profile.name());
        if let Some(source) = profile.source_namespace() {
            line.push_str(&format!(" ({})", source));
        }
        if profile.hidden() {
            line.push_str(" [hidden]");
        }
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn print_json(value: &Value, out: &mut impl Write) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize JSON")?;
    writeln!(out, "{}", text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generator() {
        assert_eq!(
            parse_generator("Wsl=/tmp/wsl.json"),
            Ok(("Wsl".to_string(), PathBuf::from("/tmp/wsl.json")))
        );
        assert!(parse_generator("Wsl").is_err());
        assert!(parse_generator("=file.json").is_err());
        assert!(parse_generator("Wsl=").is_err());
    }

    #[test]
    fn test_cli_parses_globals_after_subcommand() {
        let cli = Cli::try_parse_from([
            "termlayer",
            "show",
            "cmd",
            "--user",
            "settings.json",
            "--generator",
            "Wsl=wsl.json",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.command, Some(Commands::Show { profile: "cmd".into() }));
        assert_eq!(cli.user, Some(PathBuf::from("settings.json")));
        assert_eq!(cli.generators.len(), 1);
        assert_eq!(cli.log_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn test_cli_rejects_bad_log_level() {
        assert!(Cli::try_parse_from(["termlayer", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_explicit_user_file_wins() {
        let cli = Cli::try_parse_from(["termlayer", "--user", "mine.json"]).unwrap();
        assert_eq!(cli.sources().user, Some(PathBuf::from("mine.json")));
        assert!(!cli.options().prune_orphaned_dynamic_profiles);
    }
}
