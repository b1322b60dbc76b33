use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::routes::{Router, StaticFiles};

/// Pause before accepting again after a listener-level failure.
pub const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Binds the configured address and serves until the task is dropped.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!("Listening on {}", cfg.listen_addr);

    serve(listener, cfg).await
}

/// Accepts connections forever, one task per connection.
///
/// There is no cap on concurrent connections.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let router = Arc::new(Router::new(StaticFiles::new(cfg.directory.clone())));

    match router.files().base_dir() {
        Some(dir) => info!("Serving files from {}", dir.display()),
        None => info!("No directory configured, /files/ is disabled"),
    }

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                // Out of file descriptors repeats until a connection closes
                let delay = accept_retry_delay(&e);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                continue;
            }
        };
        debug!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}

/// How long to wait before the next `accept` after `err`.
///
/// A peer that gave up during the handshake only costs that one connection,
/// so accepting resumes at once. Anything else (EMFILE, ENFILE, ENOBUFS)
/// belongs to the listener and waits `ACCEPT_RETRY_DELAY`.
pub fn accept_retry_delay(err: &io::Error) -> Duration {
    match err.kind() {
        io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::Interrupted => Duration::ZERO,
        _ => ACCEPT_RETRY_DELAY,
    }
}
