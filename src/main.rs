#![deny(unsafe_code)]

mod common;
mod config;
mod constants;
mod http;
mod kiosk;
mod session;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::KioskConfig;
use crate::constants::defaults;
use crate::http::AppState;

#[derive(Parser)]
#[command(name = "scan-kiosk")]
#[command(version)]
#[command(about = "Barcode scanning kiosk served over HTTP", long_about = None)]
struct Cli {
    /// Configuration file (default: ./config.ini, then the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, default_value = defaults::BIND_ADDR)]
    bind: SocketAddr,

    /// Fixed origin for generated links, e.g. when served behind a proxy
    #[arg(long)]
    public_origin: Option<String>,

    /// Drop sessions idle for this many minutes
    #[arg(long, default_value_t = defaults::SESSION_IDLE_MINUTES)]
    session_idle_minutes: u64,

    /// Keep at most this many sessions, dropping the least recently seen
    #[arg(long, default_value_t = defaults::MAX_SESSIONS)]
    max_sessions: usize,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let cli = Cli::parse();

    let path = config::resolve_path(cli.config);
    info!(path = %path.display(), "Loading configuration");
    let kiosk = KioskConfig::load(&path)
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    if cli.check {
        println!(
            "{}: \"{}\", {} button(s) in {} column(s)",
            path.display(),
            kiosk.general.title,
            kiosk.buttons.len(),
            kiosk.general.columns
        );
        for button in &kiosk.buttons {
            println!("  [{}] {} -> {}", button.number, button.code, button.label);
        }
        return Ok(());
    }

    let public_origin = match cli.public_origin.as_deref() {
        Some(raw) => match http::request::normalize_origin(raw) {
            Some(origin) => Some(origin),
            None => bail!("Invalid --public-origin \"{raw}\": expected http(s)://host[:port]"),
        },
        None => None,
    };

    let session_idle = Duration::from_secs(cli.session_idle_minutes.saturating_mul(60));
    let state = Arc::new(AppState::new(
        kiosk,
        session_idle,
        cli.max_sessions,
        public_origin,
    ));

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    rt.block_on(http::serve(state, cli.bind))
}
