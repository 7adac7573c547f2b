//! Command-line configuration.

use crate::runtime::ProgramOptions;
use clap::Parser;
use paraboard_core::JsonFileStore;
use std::path::PathBuf;
use std::time::Duration;

/// CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "paraboard",
    version,
    about = "On-screen keyboard driven by a few switch keys"
)]
pub struct Args {
    /// Settings file (defaults to `<config dir>/paraboard/settings.json`).
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,
    /// How long a held key waits before it repeats.
    #[arg(long = "key-delay-ms", value_name = "MS", default_value_t = 500)]
    pub key_delay_ms: u64,
    /// Write logs to this file. Nothing is logged otherwise.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    /// Draw in the normal screen instead of the alternate screen.
    #[arg(long)]
    pub inline: bool,
    /// Start from the default settings and overwrite the stored ones.
    #[arg(long)]
    pub reset_settings: bool,
}

impl Args {
    pub fn key_delay(&self) -> Duration {
        Duration::from_millis(self.key_delay_ms)
    }

    /// The settings file to use, if any can be found.
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.settings.clone().or_else(JsonFileStore::default_path)
    }

    pub fn program_options(&self) -> ProgramOptions {
        ProgramOptions {
            alt_screen: !self.inline,
            ..ProgramOptions::default()
        }
    }
}
