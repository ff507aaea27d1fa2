use std::path::PathBuf;

use clap::Parser;

/// Escriba clinical dictation gateway
#[derive(Debug, Parser)]
#[command(name = "escriba", about = "Transcription and template-completion gateway for clinical dictation")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "escriba.toml", env = "ESCRIBA_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "ESCRIBA_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
