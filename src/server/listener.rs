use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::files::handler::StaticFileHandler;
use crate::http::connection::Connection;

/// Binds the configured address and serves connections until the task is
/// cancelled or accept fails.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);

    let handler = Arc::new(StaticFileHandler::new(cfg.files.clone()));
    let read_timeout = match cfg.server.read_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    serve(listener, handler, read_timeout).await
}

/// Accept loop: each connection moves into its own task, so a slow or
/// broken client never stalls accepting. Connection failures are logged
/// and die with their task.
pub async fn serve(
    listener: TcpListener,
    handler: Arc<StaticFileHandler>,
    read_timeout: Option<Duration>,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let handler = handler.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, handler, read_timeout);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
