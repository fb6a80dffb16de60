use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "slim-server")]
#[command(about = "Serves echo, user-agent and file routes over HTTP/1.1", long_about = None)]
pub struct Cli {
    /// Directory that `/files/:name` reads from and writes to
    #[arg(short, long, default_value = "/tmp")]
    pub directory: PathBuf,

    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:4221")]
    pub address: String,

    /// Maximum level of the emitted logs
    #[arg(short, long, default_value = "info")]
    pub log_level: Level,
}
