use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CONFIG_ENV_VAR;

#[derive(Parser, Debug)]
#[command(name = "envkey", version, about)]
pub struct Args {
    /// Path to envkey.toml (falls back to ENVKEY_CONFIG, then ./envkey.toml)
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved JSON mapping for an environment
    Resolve {
        env: String,

        /// Read <env>.json from this directory instead of the project's config_dir
        #[arg(long)]
        config_dir: Option<PathBuf>,
    },

    /// Print KEY=value placeholder lines for a variant
    Placeholders {
        variant: String,

        /// Show secret-looking values instead of <redacted>
        #[arg(long = "no-redact", default_value_t = false)]
        no_redact: bool,
    },

    /// Substitute ${NAME} placeholders into a file
    Render {
        variant: String,

        #[arg(long)]
        input: PathBuf,

        /// Write here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List environments that have a JSON file in the config dir
    Envs,

    /// Build every configured variant and print a summary
    Check,
}
