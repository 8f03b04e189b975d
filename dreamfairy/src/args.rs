use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Dream Fairy function gateway
#[derive(Debug, Parser)]
#[command(
    name = "dreamfairy",
    about = "Authenticated story, illustration, transcription and narration endpoints"
)]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "dreamfairy.toml", env = "DREAMFAIRY_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "DREAMFAIRY_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directive, e.g. `info` or `dreamfairy=debug,tower_http=debug`
    #[arg(long, default_value = "info", env = "DREAMFAIRY_LOG")]
    pub log: String,
}
