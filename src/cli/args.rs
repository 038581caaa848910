//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode, ConfigSortOrder};
use crate::store::StoreSettings;

use super::commands::Commands;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub(crate) enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first (default)
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "bizdash")]
#[command(about = "Projects, tools, and employees dashboard", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Base URL of the REST data service (e.g. https://xyz.supabase.co)
    #[arg(long, global = true, env = "SUPABASE_URL", value_name = "URL")]
    pub(crate) url: Option<String>,

    /// API key sent with every request
    #[arg(
        long,
        global = true,
        env = "SUPABASE_ANON_KEY",
        hide_env_values = true,
        value_name = "KEY"
    )]
    pub(crate) api_key: Option<String>,

    /// Use a local directory of <table>.json files instead of the REST service
    #[arg(long, global = true, env = "BIZDASH_DATA_DIR", value_name = "DIR")]
    pub(crate) data_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub(crate) timeout: Option<u64>,

    /// Output as JSON
    #[arg(short, long, global = true, conflicts_with = "csv")]
    pub(crate) json: bool,

    /// Output as CSV
    #[arg(long, global = true)]
    pub(crate) csv: bool,

    /// Compact output (fewer columns)
    #[arg(short = 'c', long, global = true)]
    pub(crate) compact: bool,

    /// Sort order for the project list, by creation time
    #[arg(short, long, global = true, value_enum)]
    pub(crate) order: Option<SortOrder>,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub(crate) color: Option<ColorMode>,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Locale for number formatting (e.g., "en", "de", "fr")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args and env take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.compact && config.compact {
            self.compact = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }

        if self.order.is_none() {
            self.order = config.order.map(|o| match o {
                ConfigSortOrder::Asc => SortOrder::Asc,
                ConfigSortOrder::Desc => SortOrder::Desc,
            });
        }
        if self.color.is_none() {
            self.color = config.color.map(|c| match c {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            });
        }

        // The backend is one setting: the config file supplies it only when
        // neither the command line nor the environment picked one
        if self.url.is_none() && self.data_dir.is_none() {
            self.url = config.url.clone();
            self.data_dir = config.data_dir.clone();
            if self.api_key.is_none() {
                self.api_key = config.api_key.clone();
            }
        }
        if self.timeout.is_none() {
            self.timeout = config.timeout_secs;
        }
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color.unwrap_or_default() {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn sort_order(&self) -> SortOrder {
        self.order.unwrap_or_default()
    }

    pub(crate) fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Table
        }
    }

    pub(crate) fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            url: self.url.clone(),
            api_key: self.api_key.clone(),
            data_dir: self.data_dir.clone(),
            timeout: Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}
