//! Command-line driver for `chips_core`.
//!
//! # Responsibility
//! - Load chips from a JSON array file and drive them through the list
//!   controller without any UI.
//! - Print displayed and selected chips in a stable line format.

use chips_core::{init_logging, Chip, ChipStore, CoreConfig, ListController, StoreError};
use clap::Parser;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug)]
enum CliError {
    Config(String),
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
    Store(StoreError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "invalid configuration: {message}"),
            Self::Io { path, source } => write!(f, "cannot read `{}`: {source}", path.display()),
            Self::Json(err) => write!(f, "invalid chips file: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Filter a chip list and take items by position.
#[derive(Parser, Debug)]
#[command(name = "chips_cli", version)]
struct CliArgs {
    /// JSON array of chips (`title`, optional `id`, `subtitle`, `avatar`, `payload`)
    #[arg(value_name = "CHIPS_JSON")]
    chips_path: PathBuf,

    /// Constraint text; omitted or blank shows every chip
    constraint: Option<String>,

    /// Displayed position to take, applied in order (repeatable)
    #[arg(long = "take", value_name = "POSITION", action = clap::ArgAction::Append)]
    takes: Vec<usize>,
}

fn load_chips(path: &Path) -> Result<Vec<Arc<Chip>>, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let chips: Vec<Chip> = serde_json::from_str(&text).map_err(CliError::Json)?;
    Ok(chips.into_iter().map(Arc::new).collect())
}

fn format_chip(position: usize, chip: &Chip) -> String {
    match chip.subtitle() {
        Some(subtitle) => format!("{position}\t{}\t{subtitle}", chip.title()),
        None => format!("{position}\t{}", chip.title()),
    }
}

fn run(args: CliArgs) -> Result<(), CliError> {
    let store = Arc::new(ChipStore::with_chips(load_chips(&args.chips_path)?));
    let controller = ListController::new(
        Arc::clone(&store),
        Arc::new(|chip: &Arc<Chip>| println!("selected\t{}", chip.title())),
    );

    let count = controller.on_constraint_changed(args.constraint.as_deref().unwrap_or(""));
    info!("event=cli_filter module=cli status=ok displayed={count}");
    for position in &args.takes {
        controller.on_item_activated(*position)?;
    }

    println!("displayed {}", store.count());
    for (position, chip) in store.displayed_chips().iter().enumerate() {
        println!("{}", format_chip(position, chip));
    }
    let selected = store.selected_chips();
    println!("taken {}", selected.len());
    for (position, chip) in selected.iter().enumerate() {
        println!("{}", format_chip(position, chip));
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let outcome = CoreConfig::from_env()
        .map_err(CliError::Config)
        .and_then(|config| {
            init_logging(config.log_level, config.log_target).map_err(CliError::Config)
        })
        .and_then(|()| run(args));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn command_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_path_constraint_and_repeated_takes() {
        let parsed =
            CliArgs::try_parse_from(["chips_cli", "chips.json", "bo", "--take", "0", "--take", "2"])
                .expect("arguments should parse");
        assert_eq!(parsed.chips_path, PathBuf::from("chips.json"));
        assert_eq!(parsed.constraint.as_deref(), Some("bo"));
        assert_eq!(parsed.takes, vec![0, 2]);
    }

    #[test]
    fn constraint_is_optional() {
        let parsed =
            CliArgs::try_parse_from(["chips_cli", "chips.json"]).expect("arguments should parse");
        assert_eq!(parsed.constraint, None);
        assert!(parsed.takes.is_empty());
    }

    #[test]
    fn rejects_non_numeric_position() {
        let err = CliArgs::try_parse_from(["chips_cli", "chips.json", "--take", "first"])
            .expect_err("position must be numeric");
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_missing_chips_path() {
        let err = CliArgs::try_parse_from(["chips_cli"]).expect_err("path is required");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn rejects_extra_positionals() {
        let err = CliArgs::try_parse_from(["chips_cli", "chips.json", "bo", "extra"])
            .expect_err("only one constraint is accepted");
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
