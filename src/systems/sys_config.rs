//! Command-line and environment configuration.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Single-directory file store with a browser client",
    long_about = None
)]
pub struct Config {
    /// Interface to bind the HTTP listener to
    #[arg(long, env = "STORESAFE_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "STORESAFE_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Directory holding the stored files (created if missing)
    #[arg(long, env = "STORESAFE_UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Directory the browser client and its assets are served from
    #[arg(long, env = "STORESAFE_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Allow cross-origin requests from any origin
    #[arg(long, env = "STORESAFE_CORS", default_value_t = true, action = ArgAction::Set)]
    pub cors: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long = "log", env = "STORESAFE_LOG", default_value = "storesafe=info")]
    pub log_filter: String,
}

impl Config {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
