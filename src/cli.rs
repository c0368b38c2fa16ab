//! Command-line interface parsing for dollm
//!
//! This module defines the clap command tree: `refresh`, `models`, and
//! `cache-info`, plus the global flag overriding the cache file location.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// dollm - DigitalOcean inference model catalog CLI
#[derive(Parser, Debug)]
#[command(name = "dollm")]
#[command(about = "Browse and cache the DigitalOcean inference model catalog")]
#[command(version)]
pub struct Cli {
    /// Override the cache file location (defaults to the user data directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub cache_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the dollm CLI
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Refresh the cached models from the DigitalOcean API
    Refresh,

    /// List DigitalOcean models
    Models {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show cache information
    CacheInfo,
}
