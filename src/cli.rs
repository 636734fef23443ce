//! Command-line entry point for the sample server.

use crate::controllers::{ApiController, AssetsController, PagesController};
use crate::dispatcher::Dispatcher;
use crate::registry::Registry;
use crate::server::{AppService, HttpServer};
use anyhow::Context as _;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "wildpath")]
#[command(about = "Minimal wildcard-pattern HTTP router", long_about = None)]
pub struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1:8080", env = "WILDPATH_ADDR")]
    pub addr: String,

    /// Directory holding pages/ and assets/ for the sample controllers
    #[arg(long, default_value = "webdata", env = "WILDPATH_WEB_DATA")]
    pub web_data: PathBuf,
}

/// Build the sample registry, start the server, and block until it exits.
///
/// Registration errors abort startup before the socket is bound: a
/// conflicting endpoint is a programming error, not something to serve
/// around.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut registry = Registry::new();
    registry
        .register_controller(&PagesController::new(cli.web_data.clone()))
        .context("registering page endpoints")?;
    registry
        .register_controller(&ApiController)
        .context("registering api endpoints")?;
    registry
        .register_controller(&AssetsController::new(cli.web_data))
        .context("registering asset endpoints")?;
    info!(endpoints = registry.len(), "Registration complete");

    let dispatcher = Dispatcher::new(Arc::new(registry));
    let service = AppService::new(dispatcher);
    let handle = HttpServer(service)
        .start(&cli.addr)
        .with_context(|| format!("binding {}", cli.addr))?;
    info!(addr = %cli.addr, "Server started");

    handle
        .join()
        .map_err(|_| anyhow::anyhow!("server coroutine panicked"))
}
