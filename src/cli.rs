//! Command-line interface

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Tileline - a one-line tile word game for the terminal
#[derive(Parser, Debug)]
#[command(name = "tileline")]
#[command(about = "Place lettered tiles on a single line of bonus squares", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to tileline.toml in the user config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Tile catalog JSON to play with instead of the standard set
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Seed for reproducible deals
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter directive (e.g. "debug" or "tileline=trace")
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Log file (defaults to tileline.log in the user data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags given on the command line, as config overrides
    pub fn overrides(&self) -> Config {
        Config {
            catalog: self.catalog.clone(),
            seed: self.seed,
            log_filter: self.log_filter.clone(),
            log_file: self.log_file.clone(),
        }
    }
}
