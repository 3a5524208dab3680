use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Heizen transcription gateway
#[derive(Debug, Parser)]
#[command(name = "heizen", about = "Speech-to-text gateway with bounded retries")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "heizen.toml", env = "HEIZEN_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "HEIZEN_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter used when the config file does not set one
    #[arg(long, default_value = "info", env = "HEIZEN_LOG")]
    pub log: String,
}
