use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::router::Router;

/// Binds the configured address and serves until the task is dropped.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", cfg.listen_addr))?;
    info!("Listening on {}", cfg.listen_addr);

    let router = Router::from_config(cfg);
    match router.files().root() {
        Some(dir) => info!(directory = %dir.display(), "Serving files"),
        None => info!("No directory configured, file endpoints will return 404"),
    }

    serve(listener, Arc::new(router)).await
}

/// Accepts connections forever, one task per connection.
///
/// Accept failures are logged and do not stop the loop.
pub async fn serve(listener: TcpListener, router: Arc<Router>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!(error = %e, "Error accepting connection");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
