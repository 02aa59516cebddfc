//! Settings of the `splitter` host.
//!
//! Layered in this order, later layers winning: built-in defaults, the
//! optional TOML file (`config/splitter.toml` or `--config`), `SPLITTER_*`
//! environment variables, command line flags.
use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/splitter.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// JSON snapshot holding the groups.
    pub snapshot: String,
    /// Group to report, by id or name. All groups when unset.
    pub group: Option<String>,
    /// Log level for the workspace crates.
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snapshot: "groups.json".to_string(),
            group: None,
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "splitter")]
#[command(about = "Compute who owes what in a group of shared expenses")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override the snapshot path.
    #[arg(long)]
    pub snapshot: Option<String>,
    /// Override the group to report (id or name).
    #[arg(long)]
    pub group: Option<String>,
    /// Person id whose detailed breakdown is added to the report.
    #[arg(long)]
    pub person: Option<String>,
    /// Override the log level.
    #[arg(long)]
    pub level: Option<String>,
}

pub fn load(args: &Args) -> Result<Settings> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let builder = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(config::Environment::with_prefix("SPLITTER"));
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(snapshot) = &args.snapshot {
        settings.snapshot = snapshot.clone();
    }
    if let Some(group) = &args.group {
        settings.group = Some(group.clone());
    }
    if let Some(level) = &args.level {
        settings.level = level.clone();
    }

    Ok(settings)
}
