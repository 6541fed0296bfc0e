use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum_server::Handle;
use clap::Parser;
use tracing::info;

use crate::application::{
    http::server::http_server::{router, state},
    logger::init_logger,
};
use crate::args::Args;

mod application;
mod args;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log)?;

    let app_state = state(args.clone()).await?;
    let router = router(app_state)?;

    let addr: SocketAddr = format!("{}:{}", args.server.host, args.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                args.server.host, args.server.port
            )
        })?;

    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    info!(%addr, root_path = %args.server.root_path, "Starting server");

    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(handle: Handle) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }

    info!("Shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(std::time::Duration::from_secs(10)));
}
