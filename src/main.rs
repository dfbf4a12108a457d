//! Binary entrypoint for the Horizon gallery site.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use horizon_gallery::config::Configuration;
use horizon_gallery::gallery::{dry_run, pagination::Filter};
use horizon_gallery::lister::ImageLister;
use horizon_gallery::web;

#[derive(Debug, Parser)]
#[command(name = "horizon-gallery", version, about = "Portfolio site image server")]
struct Args {
    /// Path to YAML config (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Override the listen address
    #[arg(long, value_name = "ADDR")]
    bind: Option<SocketAddr>,
    /// Override the public asset root
    #[arg(long, value_name = "DIR")]
    public_root: Option<PathBuf>,
    /// Print the gallery pages for a filter (all, exterior, interior) and exit
    #[arg(long = "gallery-dry-run", value_name = "FILTER")]
    gallery_dry_run: Option<Filter>,
    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("info,horizon_gallery=debug,tower_http=debug"),
        _ => EnvFilter::new("debug,horizon_gallery=trace,tower_http=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        config,
        bind,
        public_root,
        gallery_dry_run,
        verbose,
    } = Args::parse();
    init_tracing(verbose);

    let mut cfg = match &config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(addr) = bind {
        cfg.bind_address = addr;
    }
    if let Some(root) = public_root {
        cfg.public_root = root;
    }
    let cfg = cfg.validated().context("invalid configuration values")?;
    tracing::debug!("effective configuration:\n{:#?}", cfg);

    if let Some(filter) = gallery_dry_run {
        return dry_run::run(&cfg, filter).await;
    }

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let cancel = cancel.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut term) => {
                    tokio::select! {
                        _ = cancel.cancelled() => {}
                        _ = term.recv() => {
                            tracing::info!("SIGTERM received; initiating shutdown");
                            cancel.cancel();
                        }
                    }
                }
                Err(err) => tracing::warn!("failed to register SIGTERM handler: {err}"),
            }
        });
    }

    let lister = ImageLister::new(cfg.public_root.clone());
    web::serve(lister, cfg.bind_address, cancel).await
}
